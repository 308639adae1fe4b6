//! Mobile-combustion emission factors.
//!
//! Factors are expressed per gallon of fuel burned (EPA mobile combustion
//! tables). Vehicle and fuel identifiers map onto a smaller set of factor
//! keys; diesel passenger vehicles, for example, share the heavy-truck
//! diesel factors.

use crate::errors::{CalcError, CalcResult};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Per-gallon combustion factors for one mobile source class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MobileFactors {
    pub name: &'static str,
    pub co2_kg_per_gallon: f64,
    pub ch4_kg_per_gallon: f64,
    pub n2o_kg_per_gallon: f64,
}

static MOBILE_FACTORS: LazyLock<HashMap<&'static str, MobileFactors>> = LazyLock::new(|| {
    let entries = [
        MobileFactors {
            name: "gasolinePassengerCar",
            co2_kg_per_gallon: 8.78,
            ch4_kg_per_gallon: 3.8e-4,
            n2o_kg_per_gallon: 8.0e-5,
        },
        MobileFactors {
            name: "gasolineLightTruck",
            co2_kg_per_gallon: 8.78,
            ch4_kg_per_gallon: 4.0e-4,
            n2o_kg_per_gallon: 1.2e-4,
        },
        MobileFactors {
            name: "dieselHeavyTruck",
            co2_kg_per_gallon: 10.21,
            ch4_kg_per_gallon: 1.2e-4,
            n2o_kg_per_gallon: 5.0e-5,
        },
        MobileFactors {
            name: "dieselEquipment",
            co2_kg_per_gallon: 10.21,
            ch4_kg_per_gallon: 5.8e-4,
            n2o_kg_per_gallon: 2.6e-4,
        },
    ];
    entries.into_iter().map(|f| (f.name, f)).collect()
});

/// Maps a (vehicle, fuel) pair onto its factor key.
///
/// Unlisted combinations fall through to `{fuel}{Vehicle}` so custom
/// factor keys can be addressed directly.
pub fn factor_key(vehicle_type: &str, fuel_type: &str) -> String {
    match (vehicle_type, fuel_type) {
        ("PassengerCar", "motorGasoline") => "gasolinePassengerCar".to_string(),
        ("PassengerCar", "diesel") => "dieselHeavyTruck".to_string(),
        ("LightTruck", "motorGasoline") => "gasolineLightTruck".to_string(),
        ("LightTruck", "diesel") => "dieselHeavyTruck".to_string(),
        ("HeavyTruck", "motorGasoline") => "gasolineLightTruck".to_string(),
        ("HeavyTruck", "diesel") => "dieselHeavyTruck".to_string(),
        ("Equipment", "motorGasoline") => "gasolineLightTruck".to_string(),
        ("Equipment", "diesel") => "dieselEquipment".to_string(),
        _ => format!("{fuel_type}{vehicle_type}"),
    }
}

/// Looks up factors for a (vehicle, fuel) pair.
pub fn combustion_factors(vehicle_type: &str, fuel_type: &str) -> CalcResult<MobileFactors> {
    let key = factor_key(vehicle_type, fuel_type);
    MOBILE_FACTORS.get(key.as_str()).copied().ok_or_else(|| {
        CalcError::UnknownVehicleType(format!("{vehicle_type}/{fuel_type}"))
    })
}

/// Checks table consistency.
pub fn validate() -> CalcResult<()> {
    for (key, f) in MOBILE_FACTORS.iter() {
        if f.co2_kg_per_gallon <= 0.0 || f.ch4_kg_per_gallon < 0.0 || f.n2o_kg_per_gallon < 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "mobile factor table entry '{key}' has non-positive factors"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_combinations() {
        let car = combustion_factors("PassengerCar", "motorGasoline").unwrap();
        assert_eq!(car.name, "gasolinePassengerCar");
        assert!((car.co2_kg_per_gallon - 8.78).abs() < 1e-12);

        let truck = combustion_factors("HeavyTruck", "diesel").unwrap();
        assert_eq!(truck.name, "dieselHeavyTruck");
        assert!((truck.co2_kg_per_gallon - 10.21).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_combination() {
        assert!(matches!(
            combustion_factors("Hovercraft", "whaleOil"),
            Err(CalcError::UnknownVehicleType(_))
        ));
    }

    #[test]
    fn test_table_validates() {
        validate().expect("mobile table must be internally consistent");
    }
}
