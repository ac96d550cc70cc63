#![allow(dead_code)]

use loris_model::{Automaton, Edge, Location, Network, NetworkBuilder};
use loris_zone::ClockConstraint;

pub const IDLE: usize = 0;
pub const REQ: usize = 1;
pub const WAIT: usize = 2;
pub const CS: usize = 3;

/// Fischer's mutual exclusion protocol: `n` symmetric processes racing for
/// a shared lock variable `id`, one clock each, delay constant `k`.
///
/// A process may only commit to the lock (`req -> wait`, writing `id`)
/// within `k` time units, and may only enter the critical section after
/// waiting strictly longer than `k` while still owning `id`.
pub fn fischer(n: usize, k: i32) -> Network {
    let mut b = NetworkBuilder::new();
    let id = b.var("id", 0);
    let clocks: Vec<_> = (0..n).map(|i| b.clock(format!("x{i}"), k)).collect();
    for pid in 0..n {
        let x = clocks[pid];
        let me = pid as i64 + 1;
        let mut a = Automaton::new(format!("p{pid}"));
        a.add_location(
            Location::new("idle").edge(Edge::to(REQ).when(move |v| v[id] == 0).reset(x)),
        );
        a.add_location(
            Location::new("req")
                .invariant(vec![ClockConstraint::upper(x, k, false)])
                .edge(
                    Edge::to(WAIT)
                        .guard(vec![ClockConstraint::upper(x, k, false)])
                        .update(move |v| v[id] = me)
                        .reset(x),
                ),
        );
        a.add_location(
            Location::new("wait")
                .edge(
                    Edge::to(CS)
                        .guard(vec![ClockConstraint::lower(x, k, true)])
                        .when(move |v| v[id] == me),
                )
                .edge(Edge::to(REQ).when(move |v| v[id] == 0).reset(x)),
        );
        a.add_location(Location::new("cs").edge(Edge::to(IDLE).update(move |v| v[id] = 0)));
        b.process(a);
    }
    b.build().expect("fischer network is well formed")
}
