#![doc = include_str!("../README.md")]

//! Symbolic reachability over networks of timed automata.
//!
//! [`SuccessorGenerator`] produces the successors of one composite state;
//! [`Reachability`] drives the passed/waiting search with inclusion
//! subsumption; [`SafetyProperty`] is checked on every candidate; the run
//! ends in a [`SearchReport`].

pub mod property;
pub mod result;
pub mod search;
pub mod successor;

pub use property::SafetyProperty;
pub use result::{SearchReport, SearchStats, Verdict};
pub use search::{Reachability, SearchConfig, SearchOrder};
pub use successor::SuccessorGenerator;
