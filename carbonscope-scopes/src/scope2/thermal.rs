//! Purchased steam, heating, and cooling.
//!
//! Simple per-MMBtu factor multiplications with overridable defaults
//! (natural-gas boiler basis for steam and heat, electric chiller basis
//! for cooling).

use crate::parameters::ThermalParameters;
use carbonscope_core::emissions::{require_non_negative, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::gwp::GwpVersion;
use serde::{Deserialize, Serialize};

/// Kind of purchased thermal energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThermalKind {
    Steam,
    Heating,
    Cooling,
}

impl ThermalKind {
    pub fn methodology(&self) -> &'static str {
        match self {
            ThermalKind::Steam => "Purchased Steam Emissions",
            ThermalKind::Heating => "Purchased Heating Emissions",
            ThermalKind::Cooling => "Purchased Cooling Emissions",
        }
    }

    fn default_factor(&self, params: &ThermalParameters) -> f64 {
        match self {
            ThermalKind::Steam => params.steam_kg_per_mmbtu,
            ThermalKind::Heating => params.heating_kg_per_mmbtu,
            ThermalKind::Cooling => params.cooling_kg_per_mmbtu,
        }
    }
}

/// Purchased thermal energy result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalResult {
    pub kind: ThermalKind,
    pub energy_mmbtu: f64,
    pub factor_kg_per_mmbtu: f64,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub summary: SourceResult,
}

/// Purchased steam/heating/cooling emissions.
///
/// A supplier-specific `factor` overrides the parameter default.
///
/// # Errors
///
/// `InvalidInput` for negative consumption or a negative factor.
pub fn purchased_thermal(
    energy_mmbtu: f64,
    kind: ThermalKind,
    factor: Option<f64>,
    params: &ThermalParameters,
    gwp_version: GwpVersion,
) -> CalcResult<ThermalResult> {
    require_non_negative(energy_mmbtu, "thermal energy")?;
    let factor_kg_per_mmbtu = factor.unwrap_or_else(|| kind.default_factor(params));
    require_non_negative(factor_kg_per_mmbtu, "emission factor")?;

    let co2e_kg = energy_mmbtu * factor_kg_per_mmbtu;

    Ok(ThermalResult {
        kind,
        energy_mmbtu,
        factor_kg_per_mmbtu,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        summary: SourceResult::from_co2e(co2e_kg, kind.methodology(), gwp_version),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steam_default_factor() {
        let result = purchased_thermal(
            100.0,
            ThermalKind::Steam,
            None,
            &ThermalParameters::default(),
            GwpVersion::Ar5,
        )
        .unwrap();
        assert!((result.co2e_kg - 6633.0).abs() < 1e-9);
    }

    #[test]
    fn test_cooling_uses_its_own_default() {
        let result = purchased_thermal(
            100.0,
            ThermalKind::Cooling,
            None,
            &ThermalParameters::default(),
            GwpVersion::Ar5,
        )
        .unwrap();
        assert!((result.co2e_kg - 5500.0).abs() < 1e-9);
    }

    #[test]
    fn test_supplier_factor_override() {
        let result = purchased_thermal(
            100.0,
            ThermalKind::Steam,
            Some(40.0),
            &ThermalParameters::default(),
            GwpVersion::Ar5,
        )
        .unwrap();
        assert!((result.co2e_kg - 4000.0).abs() < 1e-9);
    }
}
