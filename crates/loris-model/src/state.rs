use loris_zone::{Federation, Zone};

use crate::automaton::LocationId;

/// One symbolic state of the product: a location per process, the discrete
/// variables, and the zone over all clocks.
///
/// States own their zones; the successor generator always works on fresh
/// copies, so a stored zone is never mutated through another state.
#[derive(Debug, Clone)]
pub struct SymbolicState<Z: Zone = Federation> {
    pub locations: Vec<LocationId>,
    pub vars: Vec<i64>,
    pub zone: Z,
}

/// The discrete part of a state, used to key the passed list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    pub locations: Vec<LocationId>,
    pub vars: Vec<i64>,
}

impl<Z: Zone> SymbolicState<Z> {
    pub fn new(locations: Vec<LocationId>, vars: Vec<i64>, zone: Z) -> Self {
        SymbolicState {
            locations,
            vars,
            zone,
        }
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            locations: self.locations.clone(),
            vars: self.vars.clone(),
        }
    }
}
