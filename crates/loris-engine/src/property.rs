use std::fmt;

use loris_model::{LocationId, ModelDefinitionError, Network, ProcessId};

/// Arbitrary predicate over the discrete projection of a state; returns
/// true on violation.
pub type PredicateFn = Box<dyn Fn(&[LocationId], &[i64]) -> bool + Send + Sync>;

/// A safety property evaluated on every candidate state before it is
/// admitted to the passed list. The first violation is terminal.
pub enum SafetyProperty {
    /// At most `bound` processes may simultaneously occupy a location with
    /// the given name (mutual exclusion with `bound` = 1).
    Occupancy {
        name: String,
        /// Per process, the id of its location with that name, if any.
        targets: Vec<Option<LocationId>>,
        bound: usize,
    },
    /// None of the listed (process, location) pairs may ever be occupied.
    Forbidden {
        locations: Vec<(ProcessId, LocationId)>,
    },
    /// Escape hatch for properties the structured forms cannot express.
    Predicate(PredicateFn),
}

impl SafetyProperty {
    /// Occupancy property over all processes owning a location named
    /// `location`. Fails if no process has one (almost certainly a typo).
    pub fn occupancy(
        net: &Network,
        location: &str,
        bound: usize,
    ) -> Result<Self, ModelDefinitionError> {
        let targets: Vec<Option<LocationId>> = net
            .processes
            .iter()
            .map(|a| a.find_location_by_name(location))
            .collect();
        if targets.iter().all(Option::is_none) {
            return Err(ModelDefinitionError::UnknownLocation {
                location: location.to_string(),
            });
        }
        Ok(SafetyProperty::Occupancy {
            name: location.to_string(),
            targets,
            bound,
        })
    }

    pub fn forbidden(locations: Vec<(ProcessId, LocationId)>) -> Self {
        SafetyProperty::Forbidden { locations }
    }

    pub fn predicate(
        f: impl Fn(&[LocationId], &[i64]) -> bool + Send + Sync + 'static,
    ) -> Self {
        SafetyProperty::Predicate(Box::new(f))
    }

    /// True iff the property is violated at this discrete state.
    pub fn violated(&self, locations: &[LocationId], vars: &[i64]) -> bool {
        match self {
            SafetyProperty::Occupancy { targets, bound, .. } => {
                let occupied = targets
                    .iter()
                    .zip(locations)
                    .filter(|(target, &l)| **target == Some(l))
                    .count();
                occupied > *bound
            }
            SafetyProperty::Forbidden { locations: bad } => bad
                .iter()
                .any(|&(p, l)| locations.get(p) == Some(&l)),
            SafetyProperty::Predicate(f) => f(locations, vars),
        }
    }
}

impl fmt::Debug for SafetyProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyProperty::Occupancy { name, bound, .. } => f
                .debug_struct("Occupancy")
                .field("name", name)
                .field("bound", bound)
                .finish(),
            SafetyProperty::Forbidden { locations } => f
                .debug_struct("Forbidden")
                .field("locations", locations)
                .finish(),
            SafetyProperty::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}
