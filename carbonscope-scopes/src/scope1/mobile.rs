//! Mobile combustion (fleet vehicles and field equipment).
//!
//! Fuel volumes normalize to gallons before the per-gallon EPA mobile
//! factors apply.

use carbonscope_core::emissions::{require_non_negative, EmissionsVector, SkippedEntry, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::mobile;
use carbonscope_core::gwp::GwpVersion;
use carbonscope_core::units::{convert, UnitCategory};
use serde::{Deserialize, Serialize};

pub(crate) const METHODOLOGY: &str = "EPA Mobile Combustion Factors";

/// One vehicle-fuel line of a mobile-combustion inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileEntry {
    pub vehicle_type: String,
    #[serde(default = "default_fuel")]
    pub fuel_type: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_fuel() -> String {
    "motorGasoline".to_string()
}

fn default_unit() -> String {
    "gallon".to_string()
}

/// Result for one mobile source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileResult {
    pub vehicle_type: String,
    pub fuel_type: String,
    pub quantity_gallons: f64,
    pub summary: SourceResult,
}

/// Calculates emissions from one mobile source's fuel use.
///
/// # Errors
///
/// `UnknownVehicleType` when the vehicle/fuel pair has no registered
/// factors, `InvalidInput`/`UnknownUnit` from volume normalization.
pub fn mobile_combustion(
    vehicle_type: &str,
    fuel_type: &str,
    quantity: f64,
    unit: &str,
    gwp_version: GwpVersion,
) -> CalcResult<MobileResult> {
    require_non_negative(quantity, "fuel quantity")?;
    let factors = mobile::combustion_factors(vehicle_type, fuel_type)?;
    let quantity_gallons = convert(quantity, unit, "gallon", UnitCategory::Volume)?;

    let emissions = EmissionsVector::new(
        quantity_gallons * factors.co2_kg_per_gallon,
        quantity_gallons * factors.ch4_kg_per_gallon,
        quantity_gallons * factors.n2o_kg_per_gallon,
    );

    Ok(MobileResult {
        vehicle_type: vehicle_type.to_string(),
        fuel_type: fuel_type.to_string(),
        quantity_gallons,
        summary: SourceResult::from_vector(emissions, METHODOLOGY, gwp_version),
    })
}

/// Aggregate over heterogeneous mobile sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MobileTotal {
    pub emissions: EmissionsVector,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub breakdown: Vec<MobileResult>,
    pub skipped: Vec<SkippedEntry>,
    pub gwp_version: GwpVersion,
}

/// Sums a list of mobile sources, skipping malformed rows.
pub fn total_mobile_combustion(entries: &[MobileEntry], gwp_version: GwpVersion) -> MobileTotal {
    let mut emissions = EmissionsVector::zero();
    let mut co2e_kg = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.vehicle_type.is_empty() {
            let record = SkippedEntry::new(index, "<missing>", "missing vehicle type");
            log::warn!("skipping mobile entry {index}: {}", record.reason);
            skipped.push(record);
            continue;
        }
        if entry.quantity == 0.0 {
            continue;
        }

        match mobile_combustion(
            &entry.vehicle_type,
            &entry.fuel_type,
            entry.quantity,
            &entry.unit,
            gwp_version,
        ) {
            Ok(result) => {
                emissions.accumulate(&result.summary.emissions);
                co2e_kg += result.summary.co2e_kg;
                breakdown.push(result);
            }
            Err(error) => {
                log::warn!(
                    "skipping mobile entry {index} ({}/{}): {error}",
                    entry.vehicle_type,
                    entry.fuel_type
                );
                skipped.push(SkippedEntry::from_error(index, &entry.vehicle_type, &error));
            }
        }
    }

    MobileTotal {
        emissions,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        skipped,
        gwp_version,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonscope_core::errors::CalcError;

    #[test]
    fn test_gasoline_passenger_car() {
        let result =
            mobile_combustion("PassengerCar", "motorGasoline", 1000.0, "gallon", GwpVersion::Ar5)
                .unwrap();
        assert!((result.quantity_gallons - 1000.0).abs() < 1e-12);
        assert!((result.summary.emissions.co2_kg - 8780.0).abs() < 1e-6);
    }

    #[test]
    fn test_liter_normalization() {
        let per_gallon =
            mobile_combustion("PassengerCar", "motorGasoline", 1.0, "gallon", GwpVersion::Ar5)
                .unwrap();
        let per_liter =
            mobile_combustion("PassengerCar", "motorGasoline", 3.78541, "liter", GwpVersion::Ar5)
                .unwrap();
        let relative = ((per_liter.summary.co2e_kg - per_gallon.summary.co2e_kg)
            / per_gallon.summary.co2e_kg)
            .abs();
        assert!(relative < 1e-4, "liter path drifted by {relative:e}");
    }

    #[test]
    fn test_barrel_normalization() {
        let result =
            mobile_combustion("HeavyTruck", "diesel", 1.0, "barrel", GwpVersion::Ar5).unwrap();
        assert!(
            (result.quantity_gallons - 42.0).abs() < 1e-4,
            "1 bbl = {} gal",
            result.quantity_gallons
        );
    }

    #[test]
    fn test_unknown_vehicle_fails_loudly() {
        let result =
            mobile_combustion("Zeppelin", "motorGasoline", 10.0, "gallon", GwpVersion::Ar5);
        assert!(matches!(result, Err(CalcError::UnknownVehicleType(_))));
    }

    #[test]
    fn test_batch_partial_failure() {
        let entries = vec![
            MobileEntry {
                vehicle_type: "PassengerCar".to_string(),
                fuel_type: "motorGasoline".to_string(),
                quantity: 100.0,
                unit: "gallon".to_string(),
            },
            MobileEntry {
                vehicle_type: "Zeppelin".to_string(),
                fuel_type: "motorGasoline".to_string(),
                quantity: 100.0,
                unit: "gallon".to_string(),
            },
        ];
        let total = total_mobile_combustion(&entries, GwpVersion::Ar5);
        assert_eq!(total.breakdown.len(), 1);
        assert_eq!(total.skipped.len(), 1);
        assert!((total.emissions.co2_kg - 878.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch_is_zero() {
        let total = total_mobile_combustion(&[], GwpVersion::Ar5);
        assert_eq!(total.co2e_tonnes, 0.0);
        assert!(total.breakdown.is_empty());
    }
}
