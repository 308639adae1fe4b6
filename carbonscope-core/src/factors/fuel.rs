//! Stationary-combustion emission factors and fuel heating values.
//!
//! Factors are taken from the EPA GHG Emission Factors Hub (40 CFR Part 98
//! Table C-1/C-2 lineage) and are expressed per MMBtu of fuel burned.
//! Heating values bridge physical fuel quantities (mcf, gallons, barrels,
//! short tons) to MMBtu; they are fuel-specific, so natural-gas mcf uses
//! natural gas's HHV rather than a generic constant.

use crate::errors::{CalcError, CalcResult};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Per-MMBtu combustion factors for one fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuelFactors {
    pub name: &'static str,
    pub co2_kg_per_mmbtu: f64,
    pub ch4_kg_per_mmbtu: f64,
    pub n2o_kg_per_mmbtu: f64,
}

/// Higher heating value for one physical unit of a fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeatingValue {
    pub unit: &'static str,
    pub mmbtu_per_unit: f64,
}

struct FuelRecord {
    factors: FuelFactors,
    heating_values: &'static [HeatingValue],
}

macro_rules! fuel {
    ($key:literal, $co2:expr, $ch4:expr, $n2o:expr, [$(($unit:literal, $hhv:expr)),* $(,)?]) => {
        (
            $key,
            FuelRecord {
                factors: FuelFactors {
                    name: $key,
                    co2_kg_per_mmbtu: $co2,
                    ch4_kg_per_mmbtu: $ch4,
                    n2o_kg_per_mmbtu: $n2o,
                },
                heating_values: &[$(HeatingValue { unit: $unit, mmbtu_per_unit: $hhv }),*],
            },
        )
    };
}

static FUELS: LazyLock<HashMap<&'static str, FuelRecord>> = LazyLock::new(|| {
    HashMap::from([
        fuel!(
            "naturalGas",
            53.06,
            1.0e-3,
            1.0e-4,
            [("mcf", 1.028), ("scf", 1.028e-3), ("MMscf", 1028.0)]
        ),
        fuel!(
            "distillateFuelOil",
            73.96,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.138), ("barrel", 5.796), ("liter", 0.036456)]
        ),
        fuel!(
            "residualFuelOil",
            75.10,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.150), ("barrel", 6.300), ("liter", 0.039626)]
        ),
        fuel!(
            "motorGasoline",
            70.22,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.125), ("barrel", 5.250), ("liter", 0.033022)]
        ),
        fuel!(
            "kerosene",
            75.20,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.135), ("barrel", 5.670), ("liter", 0.035664)]
        ),
        fuel!(
            "propane",
            62.87,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.091), ("barrel", 3.822), ("liter", 0.024040)]
        ),
        fuel!(
            "lpg",
            61.71,
            3.0e-3,
            6.0e-4,
            [("gallon", 0.092), ("barrel", 3.864), ("liter", 0.024304)]
        ),
        fuel!(
            "crudeOil",
            74.54,
            3.0e-3,
            6.0e-4,
            [("barrel", 5.800), ("gallon", 0.138095)]
        ),
        fuel!(
            "bituminousCoal",
            93.28,
            11.0e-3,
            1.6e-3,
            [("shortTon", 24.93)]
        ),
        fuel!(
            "subbituminousCoal",
            97.17,
            11.0e-3,
            1.6e-3,
            [("shortTon", 17.25)]
        ),
        fuel!("lignite", 97.72, 11.0e-3, 1.6e-3, [("shortTon", 14.21)]),
        fuel!(
            "petroleumCoke",
            102.41,
            3.0e-3,
            6.0e-4,
            [("shortTon", 30.00), ("gallon", 0.143)]
        ),
    ])
});

/// Generic heating values used when a fuel has no registered HHV for the
/// requested unit (liquid-fuel defaults from the factor hub).
static DEFAULT_HEATING_VALUES: &[HeatingValue] = &[
    HeatingValue {
        unit: "mcf",
        mmbtu_per_unit: 1.028,
    },
    HeatingValue {
        unit: "gallon",
        mmbtu_per_unit: 0.138,
    },
    HeatingValue {
        unit: "liter",
        mmbtu_per_unit: 0.0365,
    },
    HeatingValue {
        unit: "barrel",
        mmbtu_per_unit: 5.8,
    },
];

/// Looks up the combustion factors for a fuel.
pub fn combustion_factors(fuel: &str) -> CalcResult<FuelFactors> {
    FUELS
        .get(fuel)
        .map(|record| record.factors)
        .ok_or_else(|| CalcError::UnknownFuelType(fuel.to_string()))
}

/// Fuel-specific heating value for a physical unit, if registered.
pub fn heating_value(fuel: &str, unit: &str) -> Option<f64> {
    FUELS.get(fuel).and_then(|record| {
        record
            .heating_values
            .iter()
            .find(|hv| hv.unit == unit)
            .map(|hv| hv.mmbtu_per_unit)
    })
}

/// Generic fallback heating value for a unit, independent of fuel.
pub fn default_heating_value(unit: &str) -> Option<f64> {
    DEFAULT_HEATING_VALUES
        .iter()
        .find(|hv| hv.unit == unit)
        .map(|hv| hv.mmbtu_per_unit)
}

/// Registered fuel keys, for display layers.
pub fn fuel_types() -> Vec<&'static str> {
    let mut keys: Vec<_> = FUELS.keys().copied().collect();
    keys.sort_unstable();
    keys
}

/// Checks table consistency: factors positive, heating values positive.
pub fn validate() -> CalcResult<()> {
    for (key, record) in FUELS.iter() {
        let f = &record.factors;
        if f.co2_kg_per_mmbtu <= 0.0 || f.ch4_kg_per_mmbtu < 0.0 || f.n2o_kg_per_mmbtu < 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "fuel factor table entry '{key}' has non-positive factors"
            )));
        }
        for hv in record.heating_values {
            if hv.mmbtu_per_unit <= 0.0 {
                return Err(CalcError::InvalidInput(format!(
                    "heating value for '{key}' ({}) must be positive",
                    hv.unit
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_gas_factors() {
        let ng = combustion_factors("naturalGas").unwrap();
        assert!((ng.co2_kg_per_mmbtu - 53.06).abs() < 1e-12);
        assert!((ng.ch4_kg_per_mmbtu - 0.001).abs() < 1e-12);
        assert!((ng.n2o_kg_per_mmbtu - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_fuel() {
        assert!(matches!(
            combustion_factors("unobtainium"),
            Err(CalcError::UnknownFuelType(_))
        ));
    }

    #[test]
    fn test_fuel_specific_heating_value() {
        // Natural gas mcf uses the gas HHV, not the generic constant.
        assert_eq!(heating_value("naturalGas", "mcf"), Some(1.028));
        assert_eq!(heating_value("distillateFuelOil", "gallon"), Some(0.138));
        assert_eq!(heating_value("naturalGas", "gallon"), None);
    }

    #[test]
    fn test_default_heating_values() {
        assert_eq!(default_heating_value("barrel"), Some(5.8));
        assert_eq!(default_heating_value("furlong"), None);
    }

    #[test]
    fn test_table_validates() {
        validate().expect("fuel table must be internally consistent");
        assert!(!fuel_types().is_empty());
    }

    #[test]
    fn test_coal_heavier_than_gas() {
        let gas = combustion_factors("naturalGas").unwrap();
        let coal = combustion_factors("bituminousCoal").unwrap();
        assert!(
            coal.co2_kg_per_mmbtu > gas.co2_kg_per_mmbtu,
            "coal must carry a higher CO2 factor than natural gas"
        );
    }
}
