//! Flaring reference constants and the flare-gas component catalogue.
//!
//! The default-method constants follow the 40 CFR § 98.253 petroleum
//! systems equations. The 0.4 methane fraction of uncombusted carbon and
//! the per-MMBtu N2O constant are regulatory defaults whose table-level
//! provenance is unconfirmed; they are surfaced as plain data here so a
//! filer can override them before a regulatory submission.

use serde::{Deserialize, Serialize};

/// Default parameters for the flaring default method (unknown gas
/// composition).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlareDefaults {
    /// Higher heating value of flare gas, MMBtu per MMscf.
    pub hhv_mmbtu_per_mmscf: f64,
    /// Flare combustion efficiency, fraction.
    pub combustion_efficiency: f64,
    /// CO2 emission factor, kg per MMBtu of flare gas burned.
    pub co2_kg_per_mmbtu: f64,
    /// N2O emission factor, kg per MMBtu.
    pub n2o_kg_per_mmbtu: f64,
    /// Fraction of uncombusted carbon released as methane.
    pub ch4_fraction_of_uncombusted_carbon: f64,
    /// Molar volume conversion at 68 F, scf per kg-mole.
    pub molar_volume_scf_per_kg_mole: f64,
}

pub const FLARE_DEFAULTS: FlareDefaults = FlareDefaults {
    hhv_mmbtu_per_mmscf: 1000.0,
    combustion_efficiency: 0.98,
    co2_kg_per_mmbtu: 59.0,
    n2o_kg_per_mmbtu: 6.0e-5,
    ch4_fraction_of_uncombusted_carbon: 0.4,
    molar_volume_scf_per_kg_mole: 849.5,
};

/// Properties of one flare-gas species.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasComponent {
    pub name: &'static str,
    pub formula: &'static str,
    /// g per mole.
    pub molecular_weight: f64,
    pub carbon_atoms: u32,
    /// Higher heating value, Btu per scf.
    pub hhv_btu_per_scf: f64,
}

/// Species commonly present in flare gas.
pub const GAS_COMPONENTS: &[GasComponent] = &[
    GasComponent {
        name: "methane",
        formula: "CH4",
        molecular_weight: 16.04,
        carbon_atoms: 1,
        hhv_btu_per_scf: 1010.0,
    },
    GasComponent {
        name: "ethane",
        formula: "C2H6",
        molecular_weight: 30.07,
        carbon_atoms: 2,
        hhv_btu_per_scf: 1770.0,
    },
    GasComponent {
        name: "propane",
        formula: "C3H8",
        molecular_weight: 44.10,
        carbon_atoms: 3,
        hhv_btu_per_scf: 2516.0,
    },
    GasComponent {
        name: "nButane",
        formula: "C4H10",
        molecular_weight: 58.12,
        carbon_atoms: 4,
        hhv_btu_per_scf: 3262.0,
    },
    GasComponent {
        name: "isoButane",
        formula: "C4H10",
        molecular_weight: 58.12,
        carbon_atoms: 4,
        hhv_btu_per_scf: 3252.0,
    },
    GasComponent {
        name: "pentane",
        formula: "C5H12",
        molecular_weight: 72.15,
        carbon_atoms: 5,
        hhv_btu_per_scf: 4008.0,
    },
    GasComponent {
        name: "co2",
        formula: "CO2",
        molecular_weight: 44.01,
        carbon_atoms: 0,
        hhv_btu_per_scf: 0.0,
    },
    GasComponent {
        name: "n2",
        formula: "N2",
        molecular_weight: 28.01,
        carbon_atoms: 0,
        hhv_btu_per_scf: 0.0,
    },
    GasComponent {
        name: "h2s",
        formula: "H2S",
        molecular_weight: 34.08,
        carbon_atoms: 0,
        hhv_btu_per_scf: 637.0,
    },
];

/// Looks up a catalogued species by name.
pub fn component(name: &str) -> Option<&'static GasComponent> {
    GAS_COMPONENTS.iter().find(|c| c.name == name)
}

/// One entry of a caller-supplied flare-gas composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlareGasEntry {
    pub name: String,
    /// Mole fraction of this species, 0..=1.
    pub mole_fraction: f64,
    /// g per mole.
    pub molecular_weight: f64,
    pub carbon_atoms: u32,
}

impl FlareGasEntry {
    /// Builds an entry from the catalogue.
    pub fn from_component(component: &GasComponent, mole_fraction: f64) -> Self {
        Self {
            name: component.name.to_string(),
            mole_fraction,
            molecular_weight: component.molecular_weight,
            carbon_atoms: component.carbon_atoms,
        }
    }
}

/// A typical pipeline-quality natural gas composition.
pub fn default_gas_composition() -> Vec<FlareGasEntry> {
    let fractions = [
        ("methane", 0.87),
        ("ethane", 0.06),
        ("propane", 0.03),
        ("nButane", 0.01),
        ("co2", 0.02),
        ("n2", 0.01),
    ];
    GAS_COMPONENTS
        .iter()
        .filter_map(|species| {
            fractions
                .iter()
                .find(|(name, _)| *name == species.name)
                .map(|&(_, fraction)| FlareGasEntry::from_component(species, fraction))
        })
        .collect()
}
