//! GHG Protocol calculators for oil & gas operations.
//!
//! This crate turns activity data (fuel volumes, flare gas, component
//! counts, electricity consumption, sold-product volumes) into
//! standardized CO2-equivalent results, organised by GHG Protocol scope.
//!
//! # Module Organisation
//!
//! - `scope1`: direct emissions (stationary, mobile, flaring, venting,
//!   fugitive)
//! - `scope2`: purchased energy (location/market-based electricity,
//!   steam, heating, cooling)
//! - `scope3`: value-chain categories 3, 4, 9, 10, and 11
//! - `intensity`: normalized metrics and regulatory threshold checks
//! - `run`: whole-inventory orchestration into a [`run::CalculationRun`]
//!
//! # Parameters
//!
//! Methods with tunable constants take a parameters struct from the
//! `parameters` module; defaults match the reference tables in
//! `carbonscope-core` and individual fields can be overridden per call.
//!
//! Every calculator takes its GWP vintage explicitly; nothing reads
//! ambient configuration.

pub mod intensity;
pub mod parameters;
pub mod run;
pub mod scope1;
pub mod scope2;
pub mod scope3;

pub use run::{run_calculation, CalculationInput, CalculationRun};
