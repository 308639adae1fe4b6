//! Shared result model for emission calculators.
//!
//! Every calculator produces a three-gas [`EmissionsVector`] in kilograms
//! and folds it into a [`SourceResult`] carrying the CO2e totals, the
//! methodology citation, and the GWP vintage used. Batch calculators
//! additionally report the entries they skipped as [`SkippedEntry`]
//! records so a partial total is always distinguishable from a clean one.

use crate::errors::{CalcError, CalcResult};
use crate::gwp::{gwp, Gas, GwpVersion};
use serde::{Deserialize, Serialize};

/// Mass of each directly-emitted greenhouse gas, in kilograms.
///
/// Derived from exactly one activity record and its matching reference
/// factor; never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmissionsVector {
    pub co2_kg: f64,
    pub ch4_kg: f64,
    pub n2o_kg: f64,
}

impl EmissionsVector {
    pub fn new(co2_kg: f64, ch4_kg: f64, n2o_kg: f64) -> Self {
        Self {
            co2_kg,
            ch4_kg,
            n2o_kg,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Accumulates another vector into this one (batch aggregation).
    pub fn accumulate(&mut self, other: &EmissionsVector) {
        self.co2_kg += other.co2_kg;
        self.ch4_kg += other.ch4_kg;
        self.n2o_kg += other.n2o_kg;
    }

    pub fn is_zero(&self) -> bool {
        self.co2_kg == 0.0 && self.ch4_kg == 0.0 && self.n2o_kg == 0.0
    }
}

/// Emission source categories recognised by the aggregation layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum SourceKind {
    StationaryCombustion,
    MobileCombustion,
    Flaring,
    Venting,
    Fugitive,
    Pneumatic,
    Electricity,
    Steam,
    HeatingCooling,
    SoldProducts,
    Transport,
    UpstreamFuel,
    Processing,
}

/// Standardized output of one calculator.
///
/// Invariants: `co2e_kg = co2_kg + ch4_co2e_kg + n2o_co2e_kg` and
/// `co2e_tonnes = co2e_kg / 1000` exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceResult {
    pub emissions: EmissionsVector,
    pub ch4_co2e_kg: f64,
    pub n2o_co2e_kg: f64,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    /// Citation for the method that produced this result.
    pub methodology: &'static str,
    pub gwp_version: GwpVersion,
}

impl SourceResult {
    /// Weights a three-gas vector into CO2e under the given GWP vintage.
    ///
    /// Methane is attributed as fossil, which is correct for oil & gas
    /// operational sources.
    pub fn from_vector(
        emissions: EmissionsVector,
        methodology: &'static str,
        gwp_version: GwpVersion,
    ) -> Self {
        let ch4_co2e_kg = emissions.ch4_kg * gwp(Gas::Ch4Fossil, gwp_version);
        let n2o_co2e_kg = emissions.n2o_kg * gwp(Gas::N2o, gwp_version);
        let co2e_kg = emissions.co2_kg + ch4_co2e_kg + n2o_co2e_kg;
        Self {
            emissions,
            ch4_co2e_kg,
            n2o_co2e_kg,
            co2e_kg,
            co2e_tonnes: co2e_kg / 1000.0,
            methodology,
            gwp_version,
        }
    }

    /// Wraps an already-aggregated CO2e figure (grid factors and purchased
    /// energy report CO2e directly rather than per-gas masses).
    pub fn from_co2e(co2e_kg: f64, methodology: &'static str, gwp_version: GwpVersion) -> Self {
        Self {
            emissions: EmissionsVector::new(co2e_kg, 0.0, 0.0),
            ch4_co2e_kg: 0.0,
            n2o_co2e_kg: 0.0,
            co2e_kg,
            co2e_tonnes: co2e_kg / 1000.0,
            methodology,
            gwp_version,
        }
    }
}

/// Record of a batch entry that was skipped rather than calculated.
///
/// Batch calculators never abort on one malformed row; they skip it,
/// log a warning, and report it here so callers can tell a partial
/// aggregate from a complete one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// Position of the entry in the caller's input list.
    pub index: usize,
    /// Identifier of the entry (fuel type, component type, ...).
    pub label: String,
    pub reason: String,
}

impl SkippedEntry {
    pub fn new(index: usize, label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            reason: reason.into(),
        }
    }

    pub fn from_error(index: usize, label: impl Into<String>, error: &CalcError) -> Self {
        Self::new(index, label, error.to_string())
    }
}

/// Validates a quantity that must be non-negative.
pub fn require_non_negative(value: f64, what: &str) -> CalcResult<f64> {
    if value < 0.0 || value.is_nan() {
        return Err(CalcError::InvalidInput(format!(
            "{what} must be non-negative, got {value}"
        )));
    }
    Ok(value)
}

/// Validates a fraction that must lie in `[0, 1]`.
pub fn require_fraction(value: f64, what: &str) -> CalcResult<f64> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::InvalidInput(format!(
            "{what} must be between 0 and 1, got {value}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_result_invariants() {
        let vector = EmissionsVector::new(1000.0, 10.0, 1.0);
        let result = SourceResult::from_vector(vector, "test method", GwpVersion::Ar5);

        // AR5: CH4 30, N2O 265
        assert!((result.ch4_co2e_kg - 300.0).abs() < 1e-9);
        assert!((result.n2o_co2e_kg - 265.0).abs() < 1e-9);
        assert_eq!(
            result.co2e_kg,
            result.emissions.co2_kg + result.ch4_co2e_kg + result.n2o_co2e_kg
        );
        assert_eq!(result.co2e_tonnes, result.co2e_kg / 1000.0);
    }

    #[test]
    fn test_from_co2e_has_no_gas_split() {
        let result = SourceResult::from_co2e(500.0, "grid", GwpVersion::Ar5);
        assert_eq!(result.ch4_co2e_kg, 0.0);
        assert_eq!(result.n2o_co2e_kg, 0.0);
        assert_eq!(result.co2e_kg, 500.0);
        assert_eq!(result.co2e_tonnes, 0.5);
    }

    #[test]
    fn test_accumulate() {
        let mut total = EmissionsVector::zero();
        total.accumulate(&EmissionsVector::new(1.0, 2.0, 3.0));
        total.accumulate(&EmissionsVector::new(10.0, 20.0, 30.0));
        assert_eq!(total, EmissionsVector::new(11.0, 22.0, 33.0));
        assert!(!total.is_zero());
        assert!(EmissionsVector::zero().is_zero());
    }

    #[test]
    fn test_validators() {
        assert!(require_non_negative(0.0, "quantity").is_ok());
        assert!(require_non_negative(-0.1, "quantity").is_err());
        assert!(require_fraction(0.98, "efficiency").is_ok());
        assert!(require_fraction(1.01, "efficiency").is_err());
        assert!(require_fraction(-0.01, "efficiency").is_err());
    }

    #[test]
    fn test_source_kind_serializes_camel_case() {
        let json = serde_json::to_string(&SourceKind::StationaryCombustion).unwrap();
        assert_eq!(json, "\"stationaryCombustion\"");
    }
}
