//! Scope 2 — indirect emissions from purchased energy.
//!
//! - [`location`]: location-based method over regional grid factors
//! - [`market`]: market-based method with the contractual carve-out, and
//!   dual reporting of both methods
//! - [`thermal`]: purchased steam, heating, and cooling

pub mod location;
pub mod market;
pub mod thermal;

pub use location::{location_based, LocationBasedResult};
pub use market::{dual_reporting, market_based, DualReportingResult, MarketBasedResult, MarketOptions};
pub use thermal::{purchased_thermal, ThermalKind, ThermalResult};
