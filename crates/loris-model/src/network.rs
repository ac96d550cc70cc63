use indexmap::IndexMap;
use std::fmt::Write as _;

use loris_zone::Zone;

use crate::automaton::{Automaton, ClockCondition, Location, LocationId, ProcessId, VarId};
use crate::error::ModelDefinitionError;
use crate::state::SymbolicState;

/// An ordered collection of automata sharing one clock set and one discrete
/// variable table, plus the per-clock maximum constants driving
/// extrapolation.
///
/// A network is immutable once built; the search engine receives it by
/// shared reference and keeps no other global state.
#[derive(Debug)]
pub struct Network {
    clock_names: Vec<String>,
    max_bounds: Vec<i32>,
    vars: IndexMap<String, i64>,
    pub processes: Vec<Automaton>,
}

impl Network {
    /// DBM dimension: declared clocks plus the reference clock 0.
    pub fn dim(&self) -> usize {
        self.clock_names.len()
    }

    pub fn clock_names(&self) -> &[String] {
        &self.clock_names
    }

    pub fn max_bounds(&self) -> &[i32] {
        &self.max_bounds
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    pub fn find_var(&self, name: &str) -> Option<VarId> {
        self.vars.get_index_of(name)
    }

    pub fn var_name(&self, id: VarId) -> &str {
        self.vars
            .get_index(id)
            .map(|(name, _)| name.as_str())
            .unwrap_or("?")
    }

    pub fn location(&self, process: ProcessId, location: LocationId) -> &Location {
        &self.processes[process].locations[location]
    }

    /// True iff any process occupies a committed location.
    pub fn any_committed(&self, locations: &[LocationId]) -> bool {
        self.processes
            .iter()
            .zip(locations)
            .any(|(a, &l)| a.locations[l].committed)
    }

    /// The declared initial composite state: every process at its initial
    /// location, variables at their initial values, the origin zone. Not
    /// yet closed; the engine closes it before searching.
    pub fn initial_state<Z: Zone>(&self) -> SymbolicState<Z> {
        SymbolicState::new(
            self.processes.iter().map(|a| a.initial).collect(),
            self.vars.values().copied().collect(),
            Z::zero(self.dim()),
        )
    }

    /// Human-readable rendering of a state: per-process locations, non-zero
    /// variables, and the zone formula.
    pub fn describe<Z: Zone>(&self, state: &SymbolicState<Z>) -> String {
        let mut out = String::new();
        for (a, &l) in self.processes.iter().zip(&state.locations) {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{}.{}", a.name, a.locations[l].name);
        }
        let assigned: Vec<String> = self
            .vars
            .keys()
            .zip(&state.vars)
            .filter(|(_, &v)| v != 0)
            .map(|(name, v)| format!("{name}={v}"))
            .collect();
        if !assigned.is_empty() {
            let _ = write!(out, " | {}", assigned.join(" "));
        }
        let _ = write!(out, " | {}", state.zone.formula(&self.clock_names));
        out
    }
}

/// Builder for [`Network`]. Registers clocks (with their extrapolation
/// constants), discrete variables (with initial values), and processes,
/// then validates the whole model.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    clock_names: Vec<String>,
    max_bounds: Vec<i32>,
    vars: IndexMap<String, i64>,
    processes: Vec<Automaton>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        NetworkBuilder {
            clock_names: vec!["0".to_string()],
            max_bounds: vec![0],
            vars: IndexMap::new(),
            processes: Vec::new(),
        }
    }

    /// Register a clock and the maximum constant it is ever compared to.
    pub fn clock(&mut self, name: impl Into<String>, max_bound: i32) -> loris_zone::ClockId {
        let id = self.clock_names.len();
        self.clock_names.push(name.into());
        self.max_bounds.push(max_bound);
        id
    }

    /// Register a discrete variable with its initial value.
    pub fn var(&mut self, name: impl Into<String>, init: i64) -> VarId {
        let (id, _) = self.vars.insert_full(name.into(), init);
        id
    }

    /// Register `len` variables `name[0]` .. `name[len-1]`, all starting at
    /// `init`. Returns the id of `name[0]`; the run is contiguous.
    pub fn var_array(&mut self, name: &str, len: usize, init: i64) -> VarId {
        let base = self.vars.len();
        for k in 0..len {
            self.vars.insert_full(format!("{name}[{k}]"), init);
        }
        base
    }

    pub fn process(&mut self, automaton: Automaton) -> ProcessId {
        let id = self.processes.len();
        self.processes.push(automaton);
        id
    }

    pub fn build(self) -> Result<Network, ModelDefinitionError> {
        if self.processes.is_empty() {
            return Err(ModelDefinitionError::NoProcesses);
        }
        let dim = self.clock_names.len();
        for (pid, a) in self.processes.iter().enumerate() {
            if a.initial >= a.locations.len() {
                return Err(ModelDefinitionError::BadInitialLocation {
                    process: pid,
                    name: a.name.clone(),
                    initial: a.initial,
                    count: a.locations.len(),
                });
            }
            for loc in &a.locations {
                check_condition(&loc.invariant, pid, a, &loc.name, dim)?;
                for (eid, e) in loc.edges.iter().enumerate() {
                    if e.target >= a.locations.len() {
                        return Err(ModelDefinitionError::BadEdgeTarget {
                            process: pid,
                            name: a.name.clone(),
                            location: loc.name.clone(),
                            edge: eid,
                            target: e.target,
                        });
                    }
                    check_condition(&e.guard, pid, a, &loc.name, dim)?;
                    for &(clock, value) in &e.resets {
                        if clock == 0 || clock >= dim {
                            return Err(ModelDefinitionError::BadClockReset {
                                process: pid,
                                name: a.name.clone(),
                                location: loc.name.clone(),
                                edge: eid,
                                clock,
                                dim,
                            });
                        }
                        if value < 0 {
                            return Err(ModelDefinitionError::NegativeReset {
                                process: pid,
                                name: a.name.clone(),
                                location: loc.name.clone(),
                                edge: eid,
                                clock,
                                value,
                            });
                        }
                    }
                }
            }
        }
        Ok(Network {
            clock_names: self.clock_names,
            max_bounds: self.max_bounds,
            vars: self.vars,
            processes: self.processes,
        })
    }
}

fn check_condition(
    cond: &ClockCondition,
    pid: ProcessId,
    a: &Automaton,
    location: &str,
    dim: usize,
) -> Result<(), ModelDefinitionError> {
    if let Some(cs) = cond.fixed_constraints() {
        for c in cs {
            let clock = c.i.max(c.j);
            if clock >= dim {
                return Err(ModelDefinitionError::BadConstraintClock {
                    process: pid,
                    name: a.name.clone(),
                    location: location.to_string(),
                    clock,
                    dim,
                });
            }
        }
    }
    Ok(())
}
