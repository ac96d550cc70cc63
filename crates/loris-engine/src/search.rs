use std::collections::VecDeque;
use std::ops::ControlFlow;

use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::{debug, info, trace};

use loris_model::{ModelDefinitionError, Network, StateKey, SymbolicState};
use loris_zone::{Federation, Zone};

use crate::property::SafetyProperty;
use crate::result::{SearchReport, Verdict};
use crate::successor::SuccessorGenerator;

/// Which end of the waiting sequence is expanded next. The discipline does
/// not change the final passed-list keys or the verdict, only traversal
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Expand the most recently pushed state first.
    #[default]
    DepthFirst,
    /// Expand states in generation order.
    BreadthFirst,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchConfig {
    pub order: SearchOrder,
}

/// The passed/waiting engine: symbolic graph search with inclusion-based
/// subsumption and re-exploration of uncovered zone remainders.
///
/// The engine owns the passed list exclusively; host tooling gets read
/// access through [`passed`](Reachability::passed) after (or between) runs.
pub struct Reachability<'a, Z: Zone = Federation> {
    net: &'a Network,
    generator: SuccessorGenerator<'a>,
    property: SafetyProperty,
    config: SearchConfig,
    passed: IndexMap<StateKey, Z>,
}

impl<'a, Z: Zone> Reachability<'a, Z> {
    pub fn new(net: &'a Network, property: SafetyProperty, config: SearchConfig) -> Self {
        Reachability {
            net,
            generator: SuccessorGenerator::new(net),
            property,
            config,
            passed: IndexMap::new(),
        }
    }

    /// Search from the network's declared initial state.
    pub fn run(&mut self) -> Result<SearchReport<Z>, ModelDefinitionError> {
        let initial = self.net.initial_state();
        self.run_from(initial)
    }

    /// Search from an explicit initial state (zone not yet closed).
    pub fn run_from(
        &mut self,
        mut initial: SymbolicState<Z>,
    ) -> Result<SearchReport<Z>, ModelDefinitionError> {
        self.passed.clear();
        let mut waiting: VecDeque<SymbolicState<Z>> = VecDeque::new();
        let mut explored = 0usize;
        let mut hits = 0usize;

        info!(
            processes = self.net.processes.len(),
            dim = self.net.dim(),
            order = ?self.config.order,
            "starting reachability search"
        );

        // Closing may empty the initial zone (unsatisfiable invariant at
        // entry); the state is still recorded, it just has no successors.
        let _ = self.generator.close(&mut initial);
        if self.property.violated(&initial.locations, &initial.vars) {
            debug!("initial state violates the property");
            return Ok(self.report(Verdict::Violation(Box::new(initial)), hits, explored));
        }
        self.passed.insert(initial.key(), initial.zone.clone());
        waiting.push_back(initial);

        while let Some(state) = match self.config.order {
            SearchOrder::DepthFirst => waiting.pop_back(),
            SearchOrder::BreadthFirst => waiting.pop_front(),
        } {
            trace!(queue = waiting.len(), "expanding state");
            let generator = &self.generator;
            let property = &self.property;
            let passed = &mut self.passed;
            let mut violation: Option<SymbolicState<Z>> = None;

            let _ = generator.for_each(&state, &mut |t| {
                explored += 1;
                if property.violated(&t.locations, &t.vars) {
                    violation = Some(t);
                    return ControlFlow::Break(());
                }
                match passed.entry(t.key()) {
                    Entry::Vacant(entry) => {
                        entry.insert(t.zone.clone());
                        waiting.push_back(t);
                    }
                    Entry::Occupied(mut entry) => {
                        let known = entry.get_mut();
                        if known.includes(&t.zone) {
                            hits += 1;
                        } else {
                            let mut remainder = t.zone;
                            remainder.remove_included_in(known);
                            if remainder.is_empty() {
                                hits += 1;
                            } else {
                                known.union(&remainder);
                                // Re-explore only the uncovered region.
                                waiting.push_back(SymbolicState::new(
                                    t.locations,
                                    t.vars,
                                    remainder,
                                ));
                            }
                        }
                    }
                }
                ControlFlow::Continue(())
            })?;

            if let Some(bad) = violation {
                info!(
                    passed = self.passed.len(),
                    hits, explored, "violation found"
                );
                debug!(state = %self.net.describe(&bad), "offending state");
                return Ok(self.report(Verdict::Violation(Box::new(bad)), hits, explored));
            }
        }

        info!(
            passed = self.passed.len(),
            hits, explored, "search finished without violation"
        );
        Ok(self.report(Verdict::Safe, hits, explored))
    }

    fn report(&self, verdict: Verdict<Z>, hits: usize, explored: usize) -> SearchReport<Z> {
        SearchReport {
            verdict,
            passed_size: self.passed.len(),
            subsumption_hits: hits,
            explored,
        }
    }

    /// Read access to the passed list, in insertion order.
    pub fn passed(&self) -> impl Iterator<Item = (&StateKey, &Z)> {
        self.passed.iter()
    }

    pub fn passed_len(&self) -> usize {
        self.passed.len()
    }
}
