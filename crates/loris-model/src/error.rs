use thiserror::Error;

use crate::automaton::{LocationId, ProcessId};

/// A malformed network. Fatal: raised by `NetworkBuilder::build` for
/// statically checkable defects and by the successor generator when a
/// computed synchronization channel cannot be resolved at firing time.
#[derive(Debug, Error)]
pub enum ModelDefinitionError {
    #[error("network declares no processes")]
    NoProcesses,

    #[error("process {process} ({name}): initial location {initial} out of range ({count} locations)")]
    BadInitialLocation {
        process: ProcessId,
        name: String,
        initial: LocationId,
        count: usize,
    },

    #[error("process {process} ({name}): edge {edge} of {location} targets unknown location {target}")]
    BadEdgeTarget {
        process: ProcessId,
        name: String,
        location: String,
        edge: usize,
        target: LocationId,
    },

    #[error("process {process} ({name}): edge {edge} of {location} resets clock {clock}, outside dimension {dim}")]
    BadClockReset {
        process: ProcessId,
        name: String,
        location: String,
        edge: usize,
        clock: usize,
        dim: usize,
    },

    #[error("process {process} ({name}): edge {edge} of {location} resets clock {clock} to negative value {value}")]
    NegativeReset {
        process: ProcessId,
        name: String,
        location: String,
        edge: usize,
        clock: usize,
        value: i32,
    },

    #[error("process {process} ({name}): constraint on {location} references clock {clock}, outside dimension {dim}")]
    BadConstraintClock {
        process: ProcessId,
        name: String,
        location: String,
        clock: usize,
        dim: usize,
    },

    #[error("process {process} ({name}): edge {edge} of location {location} cannot resolve its synchronization channel")]
    UnresolvedChannel {
        process: ProcessId,
        name: String,
        location: LocationId,
        edge: usize,
    },

    #[error("no process has a location named {location:?}")]
    UnknownLocation { location: String },
}
