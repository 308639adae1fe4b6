//! Static reference tables consumed by the calculators.
//!
//! Every table is an explicit typed record set compiled into the crate —
//! there is no runtime schema to get wrong, and each module exposes a
//! `validate()` (exercised by its tests) asserting the internal
//! consistency the calculators rely on.
//!
//! - [`fuel`]: stationary-combustion factors and fuel heating values
//! - [`mobile`]: mobile-combustion factors per vehicle/fuel class
//! - [`flare`]: flaring defaults and the flare-gas species catalogue
//! - [`grid`]: grid intensity by region/subregion with native units
//! - [`leaks`]: component leak rates, average fugitive factors, and
//!   pneumatic-device rates
//! - [`products`]: Scope 3 combustion, upstream, transport and
//!   processing factors
//! - [`benchmarks`]: intensity benchmarks and regulatory thresholds

pub mod benchmarks;
pub mod flare;
pub mod fuel;
pub mod grid;
pub mod leaks;
pub mod mobile;
pub mod products;

use crate::errors::CalcResult;

/// Validates every table that exposes a consistency check.
pub fn validate_all() -> CalcResult<()> {
    fuel::validate()?;
    mobile::validate()?;
    grid::validate()?;
    leaks::validate()?;
    products::validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_tables_validate() {
        validate_all().expect("reference tables must be internally consistent");
    }
}
