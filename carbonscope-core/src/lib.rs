//! Core data model, reference tables, and conversions for oil & gas GHG
//! accounting.
//!
//! This crate holds everything the scope calculators share: the error
//! taxonomy, the three-gas emissions model, GWP tables and CO2e
//! aggregation, unit conversion, and the static reference tables
//! (emission factors, grid intensities, leak rates, benchmarks).
//!
//! Everything here is pure and stateless: functions over explicit inputs
//! and compiled-in reference data. No I/O, no clocks, no globals beyond
//! the immutable registries.

pub mod emissions;
pub mod factors;
pub mod gwp;
pub mod units;

pub mod errors;

pub use emissions::{EmissionsVector, SkippedEntry, SourceKind, SourceResult};
pub use errors::{CalcError, CalcResult};
pub use gwp::{Gas, GwpVersion};
