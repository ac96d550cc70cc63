//! Proptest strategies for zone types.

use proptest::prelude::*;

use crate::constraint::ClockConstraint;
use crate::federation::Federation;
use crate::zone::Zone;

/// An arbitrary atomic constraint over `dim` clocks with bounds in
/// `-max_bound..=max_bound`. Constraints may contradict each other; that is
/// intentional, empty intersections are part of the test space.
pub fn arb_constraint(dim: usize, max_bound: i32) -> impl Strategy<Value = ClockConstraint> {
    let pairs = (0..dim, 0..dim).prop_filter("distinct clocks", |(i, j)| i != j);
    (pairs, -max_bound..=max_bound, any::<bool>()).prop_map(|((i, j), bound, strict)| {
        ClockConstraint {
            i,
            j,
            raw: crate::constraint::raw(bound, strict),
        }
    })
}

/// A federation built by elapsing and constraining the origin, unioned over
/// a few branches. Never empty by construction unless all branches die.
pub fn arb_federation(dim: usize, max_bound: i32) -> impl Strategy<Value = Federation> {
    let branch = proptest::collection::vec(arb_constraint(dim, max_bound), 0..4);
    proptest::collection::vec(branch, 1..4).prop_map(move |branches| {
        let mut fed = Federation::empty(dim);
        for cs in branches {
            let mut z = Federation::zero(dim);
            z.up();
            if z.constrain_all(&cs) {
                fed.union(&z);
            }
        }
        fed
    })
}
