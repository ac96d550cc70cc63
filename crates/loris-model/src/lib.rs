#![doc = include_str!("../README.md")]

//! Static model of a network of timed automata.
//!
//! A caller registers clocks, discrete variables, and automata on a
//! [`NetworkBuilder`]; `build` validates the model and produces the
//! immutable [`Network`] the reachability engine searches.

pub mod automaton;
pub mod error;
pub mod network;
pub mod state;

pub use automaton::{
    Automaton, Channel, ChannelExpr, ClockCondition, Edge, Location, LocationId, ProcessId, SyncLabel,
    VarId,
};
pub use error::ModelDefinitionError;
pub use network::{Network, NetworkBuilder};
pub use state::{StateKey, SymbolicState};
