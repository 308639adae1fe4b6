//! Stationary combustion (boilers, heaters, engines, turbines).
//!
//! Fuel quantities are normalized to MMBtu through the shared unit
//! module, then multiplied by the per-MMBtu EPA factors for the fuel.
//!
//! The single-entry calculator fails loudly on bad input. The batch
//! aggregator applies the partial-failure policy: a malformed row is
//! skipped with a warning and a [`SkippedEntry`] record, and the
//! aggregate covers the rows that remain.

use carbonscope_core::emissions::{require_non_negative, EmissionsVector, SkippedEntry, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::fuel;
use carbonscope_core::gwp::GwpVersion;
use carbonscope_core::units::to_mmbtu;
use serde::{Deserialize, Serialize};

pub(crate) const METHODOLOGY: &str = "EPA GHG Emission Factors Hub";

/// One fuel line of a stationary-combustion inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelEntry {
    pub fuel_type: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "MMBtu".to_string()
}

/// Result for one fuel line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationaryResult {
    pub fuel_type: String,
    pub quantity_mmbtu: f64,
    pub summary: SourceResult,
}

/// Calculates emissions from burning one fuel quantity.
///
/// # Errors
///
/// `UnknownFuelType` when the fuel has no registered factors,
/// `InvalidInput`/`UnknownUnit` from quantity normalization.
pub fn stationary_combustion(
    fuel_type: &str,
    quantity: f64,
    unit: &str,
    gwp_version: GwpVersion,
) -> CalcResult<StationaryResult> {
    require_non_negative(quantity, "fuel quantity")?;
    let factors = fuel::combustion_factors(fuel_type)?;
    let quantity_mmbtu = to_mmbtu(quantity, unit, fuel_type)?;

    let emissions = EmissionsVector::new(
        quantity_mmbtu * factors.co2_kg_per_mmbtu,
        quantity_mmbtu * factors.ch4_kg_per_mmbtu,
        quantity_mmbtu * factors.n2o_kg_per_mmbtu,
    );

    Ok(StationaryResult {
        fuel_type: fuel_type.to_string(),
        quantity_mmbtu,
        summary: SourceResult::from_vector(emissions, METHODOLOGY, gwp_version),
    })
}

/// Aggregate over heterogeneous fuel lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationaryTotal {
    pub emissions: EmissionsVector,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub breakdown: Vec<StationaryResult>,
    pub skipped: Vec<SkippedEntry>,
    pub gwp_version: GwpVersion,
}

/// Sums a list of fuel lines, skipping malformed rows.
///
/// Rows with an empty fuel type or an unrecognized fuel/unit are recorded
/// in `skipped` and logged; rows with a zero quantity contribute nothing
/// and are omitted from the breakdown. One typo never aborts the batch.
pub fn total_stationary_combustion(
    entries: &[FuelEntry],
    gwp_version: GwpVersion,
) -> StationaryTotal {
    let mut emissions = EmissionsVector::zero();
    let mut co2e_kg = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.fuel_type.is_empty() {
            let record = SkippedEntry::new(index, "<missing>", "missing fuel type");
            log::warn!("skipping stationary entry {index}: {}", record.reason);
            skipped.push(record);
            continue;
        }
        if entry.quantity == 0.0 {
            continue;
        }

        match stationary_combustion(&entry.fuel_type, entry.quantity, &entry.unit, gwp_version) {
            Ok(result) => {
                emissions.accumulate(&result.summary.emissions);
                co2e_kg += result.summary.co2e_kg;
                breakdown.push(result);
            }
            Err(error) => {
                log::warn!("skipping stationary entry {index} ({}): {error}", entry.fuel_type);
                skipped.push(SkippedEntry::from_error(index, &entry.fuel_type, &error));
            }
        }
    }

    StationaryTotal {
        emissions,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        skipped,
        gwp_version,
    }
}
