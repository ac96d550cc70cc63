#![doc = include_str!("../README.md")]

//! Difference-bound-matrix zones for timed-automaton reachability.
//!
//! This crate provides the raw bound encoding, single DBMs kept in closed
//! form, federations (unions of DBMs), and the [`Zone`] interface the
//! search engine consumes.

pub mod constraint;
pub mod dbm;
pub mod federation;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest_generators;
pub mod zone;

pub use constraint::{ClockConstraint, ClockId, RawBound, INFINITY};
pub use dbm::Dbm;
pub use federation::Federation;
pub use zone::Zone;
