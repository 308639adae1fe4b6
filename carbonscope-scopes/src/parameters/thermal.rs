//! Purchased Thermal Energy Parameters

use serde::{Deserialize, Serialize};

/// Default emission factors for purchased steam, heating, and cooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalParameters {
    /// Purchased steam factor (natural gas boiler at ~80% efficiency)
    /// unit: kg CO2/MMBtu
    /// default: 66.33
    pub steam_kg_per_mmbtu: f64,

    /// Purchased heating factor
    /// unit: kg CO2/MMBtu
    /// default: 66.33
    pub heating_kg_per_mmbtu: f64,

    /// Purchased cooling factor (electric chiller basis)
    /// unit: kg CO2/MMBtu
    /// default: 55.0
    pub cooling_kg_per_mmbtu: f64,
}

impl Default for ThermalParameters {
    fn default() -> Self {
        Self {
            steam_kg_per_mmbtu: 66.33,
            heating_kg_per_mmbtu: 66.33,
            cooling_kg_per_mmbtu: 55.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ThermalParameters::default();
        assert_eq!(params.steam_kg_per_mmbtu, 66.33);
        assert_eq!(params.cooling_kg_per_mmbtu, 55.0);
    }
}
