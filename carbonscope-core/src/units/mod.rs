//! Unit normalization and conversion for activity data.
//!
//! Activity records arrive in whatever units the field reports them in:
//! gas volumes in mcf or MMscf, liquid fuels in gallons or barrels,
//! electricity in kWh, coal in short tons. Every calculator normalizes
//! through this module before applying emission factors, so conversion
//! constants live in exactly one place.
//!
//! # Canonical units
//!
//! | Category | Canonical |
//! |----------|-----------|
//! | Energy   | MMBtu     |
//! | Volume   | scf       |
//! | Mass     | kg        |
//!
//! # Fuel-aware energy conversion
//!
//! Converting a fuel volume to energy requires that fuel's higher heating
//! value: 1 mcf of natural gas is 1.028 MMBtu, while a gallon of diesel is
//! 0.138 MMBtu. [`to_mmbtu`] resolves the HHV from the fuel table and
//! falls back to generic per-unit defaults for unregistered fuels.

pub mod convert;
pub mod registry;

pub use convert::{convert, to_canonical, to_mmbtu};
pub use registry::{UnitCategory, UnitInfo, UnitRegistry, UNIT_REGISTRY};
