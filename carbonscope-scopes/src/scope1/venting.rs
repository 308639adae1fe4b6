//! Cold venting of produced gas to atmosphere.
//!
//! Vent volumes from heterogeneous sources (tank flashing, blowdowns,
//! well unloading) are unit-converted to scf, summed, reduced by the
//! stream's methane content, and converted to mass through the methane
//! density constant.

use crate::parameters::VentingParameters;
use carbonscope_core::emissions::{EmissionsVector, SkippedEntry, SourceResult};
use carbonscope_core::gwp::GwpVersion;
use carbonscope_core::units::{convert, UnitCategory};
use serde::{Deserialize, Serialize};

const METHODOLOGY: &str = "Direct Venting Calculation";

/// One vent source line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentEntry {
    /// Free-text source description (tank battery, blowdown, ...).
    pub source: String,
    pub volume: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "scf".to_string()
}

/// Per-source line of a venting result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentLine {
    pub source: String,
    pub volume: f64,
    pub unit: String,
    pub volume_scf: f64,
}

/// Aggregated venting result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VentingResult {
    pub total_gas_scf: f64,
    pub total_gas_mcf: f64,
    pub ch4_scf: f64,
    pub ch4_kg: f64,
    pub ch4_tonnes: f64,
    pub methane_content: f64,
    pub breakdown: Vec<VentLine>,
    pub skipped: Vec<SkippedEntry>,
    pub summary: SourceResult,
}

/// Sums vent-source volumes and converts the methane share to mass.
///
/// Non-positive volumes contribute nothing and are left out of the
/// breakdown; a row whose unit cannot be converted is recorded as
/// skipped. The whole batch never fails.
pub fn venting(
    entries: &[VentEntry],
    params: &VentingParameters,
    gwp_version: GwpVersion,
) -> VentingResult {
    let mut total_gas_scf = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        if entry.volume <= 0.0 {
            continue;
        }
        match convert(entry.volume, &entry.unit, "scf", UnitCategory::Volume) {
            Ok(volume_scf) => {
                total_gas_scf += volume_scf;
                breakdown.push(VentLine {
                    source: entry.source.clone(),
                    volume: entry.volume,
                    unit: entry.unit.clone(),
                    volume_scf,
                });
            }
            Err(error) => {
                log::warn!("skipping vent entry {index} ({}): {error}", entry.source);
                skipped.push(SkippedEntry::from_error(index, &entry.source, &error));
            }
        }
    }

    let ch4_scf = total_gas_scf * params.methane_content;
    let ch4_kg = ch4_scf * params.ch4_kg_per_scf;

    VentingResult {
        total_gas_scf,
        total_gas_mcf: total_gas_scf / 1000.0,
        ch4_scf,
        ch4_kg,
        ch4_tonnes: ch4_kg / 1000.0,
        methane_content: params.methane_content,
        breakdown,
        skipped,
        summary: SourceResult::from_vector(
            EmissionsVector::new(0.0, ch4_kg, 0.0),
            METHODOLOGY,
            gwp_version,
        ),
    }
}
