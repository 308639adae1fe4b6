//! Intensity metrics and regulatory threshold checks.
//!
//! - [`metrics`]: soft-failing normalized ratios (carbon, methane,
//!   flaring, revenue intensity) with benchmark comparisons
//! - [`thresholds`]: regulatory reporting-trigger checks

pub mod metrics;
pub mod thresholds;

pub use metrics::{
    all_intensities, carbon_intensity, flaring_intensity, methane_intensity, revenue_intensity,
    scope_shares, IntensityInputs, IntensityReport,
};
pub use thresholds::{check_thresholds, ThresholdBreach};
