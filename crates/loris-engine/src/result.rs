use serde::Serialize;
use std::fmt;

use loris_model::SymbolicState;
use loris_zone::{Federation, Zone};

/// Outcome of a reachability run.
#[derive(Debug, Clone)]
pub enum Verdict<Z: Zone = Federation> {
    /// The waiting list drained without a property violation.
    Safe,
    /// The property checker rejected this state; the run halted there.
    Violation(Box<SymbolicState<Z>>),
}

/// Final report of a run: verdict plus the search counters.
#[derive(Debug, Clone)]
pub struct SearchReport<Z: Zone = Federation> {
    pub verdict: Verdict<Z>,
    /// Number of distinct discrete keys in the passed list.
    pub passed_size: usize,
    /// Successors discarded because their zone was already covered.
    pub subsumption_hits: usize,
    /// Total successors produced by the generator.
    pub explored: usize,
}

impl<Z: Zone> SearchReport<Z> {
    pub fn is_safe(&self) -> bool {
        matches!(self.verdict, Verdict::Safe)
    }

    pub fn violation(&self) -> Option<&SymbolicState<Z>> {
        match &self.verdict {
            Verdict::Safe => None,
            Verdict::Violation(state) => Some(state),
        }
    }

    /// Stable machine-readable verdict string, independent of the state
    /// content. Two runs over the same network are reproducible iff their
    /// classes agree.
    pub fn verdict_class(&self) -> &'static str {
        match self.verdict {
            Verdict::Safe => "safe",
            Verdict::Violation(_) => "violation",
        }
    }

    /// Serializable summary for host tooling.
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            verdict: self.verdict_class(),
            passed_size: self.passed_size,
            subsumption_hits: self.subsumption_hits,
            explored: self.explored,
        }
    }
}

/// The counters of a [`SearchReport`], without the offending state.
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub verdict: &'static str,
    pub passed_size: usize,
    pub subsumption_hits: usize,
    pub explored: usize,
}

impl<Z: Zone> fmt::Display for SearchReport<Z> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} states in the passed list.", self.passed_size)?;
        writeln!(f, "{} subsumption hit(s).", self.subsumption_hits)?;
        writeln!(f, "{} successor(s) explored.", self.explored)?;
        match self.verdict {
            Verdict::Safe => write!(f, "Safe!"),
            Verdict::Violation(_) => write!(f, "Violation found!"),
        }
    }
}
