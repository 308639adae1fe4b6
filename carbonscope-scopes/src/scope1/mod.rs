//! Scope 1 — direct emissions from owned or controlled sources.
//!
//! - [`stationary`]: fuel combustion in boilers, heaters, engines
//! - [`mobile`]: fleet vehicles and field equipment
//! - [`flaring`]: flare gas combustion (default and composition methods)
//! - [`venting`]: cold venting of produced gas
//! - [`fugitive`]: equipment leaks and pneumatic devices

pub mod flaring;
pub mod fugitive;
pub mod mobile;
pub mod stationary;
pub mod venting;

pub use flaring::{
    convert_flare_volume, flaring_default, flaring_with_composition, FlaringCompositionResult,
    FlaringResult,
};
pub use fugitive::{
    average_method, component_count_method, pneumatic_devices, AverageMethodResult,
    ComponentCount, ComponentCountResult, DeviceCounts, PneumaticResult,
};
pub use mobile::{mobile_combustion, total_mobile_combustion, MobileEntry, MobileTotal};
pub use stationary::{
    stationary_combustion, total_stationary_combustion, FuelEntry, StationaryTotal,
};
pub use venting::{venting, VentEntry, VentingResult};
