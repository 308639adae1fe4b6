//! Value-chain (Scope 3) reference factors.
//!
//! Combustion factors for sold products dominate an oil & gas company's
//! value-chain inventory (Category 11). Each factor carries its native
//! unit plus pre-computed per-liter / per-gallon / per-MJ bridges for the
//! unit combinations sales volumes actually arrive in.

use crate::errors::{CalcError, CalcResult};
use serde::Serialize;

/// Native unit a product combustion factor is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductUnit {
    Gallon,
    MMBtu,
    Barrel,
}

impl ProductUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductUnit::Gallon => "gallon",
            ProductUnit::MMBtu => "MMBtu",
            ProductUnit::Barrel => "barrel",
        }
    }
}

/// End-use combustion factor for one sold product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductFactor {
    pub name: &'static str,
    /// kg CO2 per native unit.
    pub factor: f64,
    pub unit: ProductUnit,
    pub kg_per_liter: Option<f64>,
    pub kg_per_gallon: Option<f64>,
    pub kg_per_mj: Option<f64>,
}

const COMBUSTION_FACTORS: &[ProductFactor] = &[
    ProductFactor { name: "motorGasoline", factor: 8.887, unit: ProductUnit::Gallon, kg_per_liter: Some(2.348), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "diesel", factor: 10.180, unit: ProductUnit::Gallon, kg_per_liter: Some(2.689), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "jetFuel", factor: 9.57, unit: ProductUnit::Gallon, kg_per_liter: Some(2.53), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "kerosene", factor: 9.57, unit: ProductUnit::Gallon, kg_per_liter: Some(2.53), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "lpg", factor: 5.68, unit: ProductUnit::Gallon, kg_per_liter: Some(1.50), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "residualFuelOil", factor: 11.27, unit: ProductUnit::Gallon, kg_per_liter: Some(2.98), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "naturalGas", factor: 53.06, unit: ProductUnit::MMBtu, kg_per_liter: None, kg_per_gallon: None, kg_per_mj: Some(0.0503) },
    ProductFactor { name: "crudeOil", factor: 430.0, unit: ProductUnit::Barrel, kg_per_liter: None, kg_per_gallon: Some(10.24), kg_per_mj: None },
    ProductFactor { name: "propane", factor: 5.72, unit: ProductUnit::Gallon, kg_per_liter: Some(1.51), kg_per_gallon: None, kg_per_mj: None },
    ProductFactor { name: "butane", factor: 6.67, unit: ProductUnit::Gallon, kg_per_liter: Some(1.76), kg_per_gallon: None, kg_per_mj: None },
];

/// Combustion factor for a sold product (Category 11).
pub fn combustion_factor(product: &str) -> CalcResult<&'static ProductFactor> {
    COMBUSTION_FACTORS
        .iter()
        .find(|f| f.name == product)
        .ok_or_else(|| CalcError::UnknownProductType(product.to_string()))
}

/// Upstream (well-to-tank / well-to-gate) factor for purchased energy
/// (Category 3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpstreamFactor {
    pub name: &'static str,
    /// kg CO2e per unit.
    pub factor: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

const UPSTREAM_FACTORS: &[UpstreamFactor] = &[
    UpstreamFactor { name: "naturalGas", factor: 8.5, unit: "MMBtu", description: "Well-to-gate" },
    UpstreamFactor { name: "electricity", factor: 0.05, unit: "kWh", description: "T&D losses" },
    UpstreamFactor { name: "diesel", factor: 15.2, unit: "gallon", description: "Well-to-tank" },
    UpstreamFactor { name: "gasoline", factor: 14.5, unit: "gallon", description: "Well-to-tank" },
    UpstreamFactor { name: "coal", factor: 12.0, unit: "shortTon", description: "Mining & transport" },
];

pub fn upstream_factor(energy_type: &str) -> Option<&'static UpstreamFactor> {
    UPSTREAM_FACTORS.iter().find(|f| f.name == energy_type)
}

/// Freight emission factor, kg CO2e per tonne-km (Categories 4 and 9).
const TRANSPORT_FACTORS: &[(&str, f64)] = &[
    ("truck", 0.107),
    ("rail", 0.028),
    ("ship", 0.016),
    ("barge", 0.020),
    ("pipeline", 0.005),
    ("air", 0.602),
];

pub fn transport_factor(mode: &str) -> Option<f64> {
    TRANSPORT_FACTORS
        .iter()
        .find(|(key, _)| *key == mode)
        .map(|(_, factor)| *factor)
}

/// Processing factor for sold intermediates (Category 10).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProcessingFactor {
    pub name: &'static str,
    /// kg CO2e per unit processed.
    pub factor: f64,
    pub unit: &'static str,
    pub description: &'static str,
}

const PROCESSING_FACTORS: &[ProcessingFactor] = &[
    ProcessingFactor { name: "crudeOil", factor: 45.0, unit: "barrel", description: "Refining" },
    ProcessingFactor { name: "naturalGas", factor: 5.0, unit: "mcf", description: "Processing" },
    ProcessingFactor { name: "ngl", factor: 25.0, unit: "barrel", description: "Fractionation" },
];

pub fn processing_factor(product: &str) -> Option<&'static ProcessingFactor> {
    PROCESSING_FACTORS.iter().find(|f| f.name == product)
}

/// Checks table consistency.
pub fn validate() -> CalcResult<()> {
    for f in COMBUSTION_FACTORS {
        if f.factor <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "product combustion factor '{}' must be positive",
                f.name
            )));
        }
    }
    for f in UPSTREAM_FACTORS {
        if f.factor <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "upstream factor '{}' must be positive",
                f.name
            )));
        }
    }
    for (mode, factor) in TRANSPORT_FACTORS {
        if *factor <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "transport factor '{mode}' must be positive"
            )));
        }
    }
    for f in PROCESSING_FACTORS {
        if f.factor <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "processing factor '{}' must be positive",
                f.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gasoline_factor() {
        let gasoline = combustion_factor("motorGasoline").unwrap();
        assert!((gasoline.factor - 8.887).abs() < 1e-12);
        assert_eq!(gasoline.unit, ProductUnit::Gallon);
        assert_eq!(gasoline.kg_per_liter, Some(2.348));
    }

    #[test]
    fn test_unknown_product() {
        assert!(matches!(
            combustion_factor("snakeOil"),
            Err(CalcError::UnknownProductType(_))
        ));
    }

    #[test]
    fn test_transport_modes() {
        assert_eq!(transport_factor("pipeline"), Some(0.005));
        assert!(
            transport_factor("air").unwrap() > transport_factor("ship").unwrap(),
            "air freight must be the most carbon-intensive mode"
        );
        assert_eq!(transport_factor("teleporter"), None);
    }

    #[test]
    fn test_processing_and_upstream_lookups() {
        assert!(processing_factor("crudeOil").is_some());
        assert!(processing_factor("unknown").is_none());
        assert!(upstream_factor("electricity").is_some());
        assert!(upstream_factor("unknown").is_none());
    }

    #[test]
    fn test_table_validates() {
        validate().expect("product tables must be internally consistent");
    }
}
