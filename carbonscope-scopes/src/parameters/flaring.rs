//! Flaring Method Parameters
//!
//! Parameters for the 40 CFR § 98.253 flaring equations (default and
//! gas-composition methods).
//!
//! # Reference
//!
//! The default CO2 factor, the 0.4 methane fraction of uncombusted
//! carbon, and the per-MMBtu N2O factor are EPA-aligned defaults. Their
//! exact regulatory table provenance is unconfirmed, so they are fields
//! rather than literals; override them before a regulatory submission if
//! your auditor requires different values.

use carbonscope_core::factors::flare::FLARE_DEFAULTS;
use serde::{Deserialize, Serialize};

/// Parameters for flaring emission calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlaringParameters {
    /// Higher heating value of flare gas
    /// unit: MMBtu/MMscf
    /// default: 1000.0
    pub hhv_mmbtu_per_mmscf: f64,

    /// Flare combustion efficiency
    /// unit: fraction (0-1)
    /// default: 0.98
    pub combustion_efficiency: f64,

    /// CO2 emission factor for flare gas of unknown composition
    /// unit: kg CO2/MMBtu
    /// default: 59.0
    pub co2_kg_per_mmbtu: f64,

    /// N2O emission factor
    /// unit: kg N2O/MMBtu
    /// default: 6.0e-5
    pub n2o_kg_per_mmbtu: f64,

    /// Fraction of uncombusted carbon released as methane
    /// unit: fraction
    /// default: 0.4
    pub ch4_fraction_of_uncombusted_carbon: f64,

    /// Molar volume conversion at 68 F
    /// unit: scf/kg-mole
    /// default: 849.5
    pub molar_volume_scf_per_kg_mole: f64,

    /// Tolerance for the composition mole-fraction sum check
    /// unit: absolute deviation from 1.0
    /// default: 0.01
    pub mole_fraction_tolerance: f64,
}

impl Default for FlaringParameters {
    fn default() -> Self {
        Self {
            hhv_mmbtu_per_mmscf: FLARE_DEFAULTS.hhv_mmbtu_per_mmscf,
            combustion_efficiency: FLARE_DEFAULTS.combustion_efficiency,
            co2_kg_per_mmbtu: FLARE_DEFAULTS.co2_kg_per_mmbtu,
            n2o_kg_per_mmbtu: FLARE_DEFAULTS.n2o_kg_per_mmbtu,
            ch4_fraction_of_uncombusted_carbon: FLARE_DEFAULTS.ch4_fraction_of_uncombusted_carbon,
            molar_volume_scf_per_kg_mole: FLARE_DEFAULTS.molar_volume_scf_per_kg_mole,
            mole_fraction_tolerance: 0.01,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_table() {
        let params = FlaringParameters::default();
        assert_eq!(params.hhv_mmbtu_per_mmscf, 1000.0);
        assert_eq!(params.combustion_efficiency, 0.98);
        assert_eq!(params.co2_kg_per_mmbtu, 59.0);
        assert_eq!(params.ch4_fraction_of_uncombusted_carbon, 0.4);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"combustion_efficiency": 0.95}"#;
        let params: FlaringParameters =
            serde_json::from_str(json).expect("partial deserialization failed");
        assert_eq!(params.combustion_efficiency, 0.95);
        assert_eq!(params.hhv_mmbtu_per_mmscf, 1000.0);
    }
}
