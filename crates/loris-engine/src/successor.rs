use std::ops::ControlFlow;

use loris_model::automaton::{Edge, SyncLabel};
use loris_model::{Channel, ModelDefinitionError, Network, ProcessId, SymbolicState};
use loris_zone::Zone;

/// Produces the successors of one composite state.
///
/// Enumeration is deterministic: processes in declared order, edges in
/// declaration order, internal edges before rendezvous, emitters outer and
/// receivers inner. Every call recomputes from the input state; there is no
/// shared iteration state.
pub struct SuccessorGenerator<'a> {
    net: &'a Network,
}

impl<'a> SuccessorGenerator<'a> {
    pub fn new(net: &'a Network) -> Self {
        SuccessorGenerator { net }
    }

    /// All successors of `state`, freshly computed.
    pub fn successors<Z: Zone>(
        &self,
        state: &SymbolicState<Z>,
    ) -> Result<Vec<SymbolicState<Z>>, ModelDefinitionError> {
        let mut out = Vec::new();
        let _ = self.for_each(state, &mut |s| {
            out.push(s);
            ControlFlow::Continue(())
        })?;
        Ok(out)
    }

    /// Drive `f` over the successors of `state`, stopping early when it
    /// breaks (the engine breaks on a property violation).
    pub fn for_each<Z, F>(
        &self,
        state: &SymbolicState<Z>,
        f: &mut F,
    ) -> Result<ControlFlow<()>, ModelDefinitionError>
    where
        Z: Zone,
        F: FnMut(SymbolicState<Z>) -> ControlFlow<()>,
    {
        if state.zone.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }
        // Committed locations freeze the rest of the network: while any
        // process is committed, only transitions involving a committed
        // process may fire.
        let committed_phase = self.net.any_committed(&state.locations);

        for pid in 0..self.net.processes.len() {
            if committed_phase && !self.is_committed(state, pid) {
                continue;
            }
            let loc = self.net.location(pid, state.locations[pid]);
            for edge in &loc.edges {
                if !edge.sync.is_internal() {
                    continue;
                }
                if let Some(succ) = self.fire(state, &[(pid, edge)]) {
                    if f(succ).is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
            }
        }

        for ep in 0..self.net.processes.len() {
            let eloc = self.net.location(ep, state.locations[ep]);
            for (eid, eedge) in eloc.edges.iter().enumerate() {
                let SyncLabel::Emit(emit_channel) = &eedge.sync else {
                    continue;
                };
                // Resolved lazily so that edges never eligible in this
                // phase cannot fail channel resolution.
                let mut channel: Option<Channel> = None;
                for rp in 0..self.net.processes.len() {
                    if rp == ep {
                        continue;
                    }
                    if committed_phase
                        && !self.is_committed(state, ep)
                        && !self.is_committed(state, rp)
                    {
                        continue;
                    }
                    let rloc = self.net.location(rp, state.locations[rp]);
                    for (rid, redge) in rloc.edges.iter().enumerate() {
                        let SyncLabel::Recv(recv_channel) = &redge.sync else {
                            continue;
                        };
                        let ec = match channel {
                            Some(c) => c,
                            None => {
                                let c = emit_channel.resolve(&state.vars).ok_or_else(|| {
                                    self.unresolved(ep, state.locations[ep], eid)
                                })?;
                                channel = Some(c);
                                c
                            }
                        };
                        let rc = recv_channel
                            .resolve(&state.vars)
                            .ok_or_else(|| self.unresolved(rp, state.locations[rp], rid))?;
                        if rc != ec {
                            continue;
                        }
                        if let Some(succ) = self.fire(state, &[(ep, eedge), (rp, redge)]) {
                            if f(succ).is_break() {
                                return Ok(ControlFlow::Break(()));
                            }
                        }
                    }
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Fire the given edges in order on a copy of `state`. For a rendezvous
    /// the emitter comes first, so the receiver's precondition, guard, and
    /// effect observe the emitter's variable updates and clock resets.
    fn fire<Z: Zone>(
        &self,
        state: &SymbolicState<Z>,
        edges: &[(ProcessId, &Edge)],
    ) -> Option<SymbolicState<Z>> {
        let mut s = state.clone();
        for &(pid, edge) in edges {
            if let Some(when) = &edge.when {
                if !when(&s.vars) {
                    return None;
                }
            }
            if !edge.guard.apply(&mut s.zone, &s.vars) {
                return None;
            }
            if let Some(update) = &edge.update {
                update(&mut s.vars);
            }
            for &(clock, value) in &edge.resets {
                s.zone.assign(clock, value);
            }
            s.locations[pid] = edge.target;
        }
        self.close(&mut s).then_some(s)
    }

    /// Close a candidate: time elapse (unless some process is committed),
    /// every location invariant, max-bounds extrapolation, reduction.
    /// Returns false iff the zone became empty.
    pub fn close<Z: Zone>(&self, state: &mut SymbolicState<Z>) -> bool {
        if state.zone.is_empty() {
            return false;
        }
        if !self.net.any_committed(&state.locations) {
            state.zone.up();
        }
        for (a, &l) in self.net.processes.iter().zip(&state.locations) {
            if !a.locations[l].invariant.apply(&mut state.zone, &state.vars) {
                return false;
            }
        }
        state.zone.extrapolate_max_bounds(self.net.max_bounds());
        state.zone.reduce();
        true
    }

    fn is_committed<Z: Zone>(&self, state: &SymbolicState<Z>, pid: ProcessId) -> bool {
        self.net.location(pid, state.locations[pid]).committed
    }

    fn unresolved(&self, process: ProcessId, location: usize, edge: usize) -> ModelDefinitionError {
        ModelDefinitionError::UnresolvedChannel {
            process,
            name: self.net.processes[process].name.clone(),
            location,
            edge,
        }
    }
}
