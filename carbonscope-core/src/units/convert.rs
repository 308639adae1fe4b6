//! Conversion entry points shared by every calculator.
//!
//! All calculators normalize through these two functions instead of
//! carrying their own constants, so a unit is converted the same way no
//! matter which emission source it arrives from.

use super::registry::{UnitCategory, UNIT_REGISTRY};
use crate::errors::{CalcError, CalcResult};
use crate::factors::fuel;

/// Converts a quantity between two units of the same physical category.
///
/// Identity conversions (same unit, or two aliases of the same unit)
/// return the input unchanged so no rounding error is introduced.
///
/// # Errors
///
/// `InvalidInput` for negative values, `UnknownUnit` when either symbol is
/// not registered in the category.
pub fn convert(value: f64, from: &str, to: &str, category: UnitCategory) -> CalcResult<f64> {
    if value < 0.0 || value.is_nan() {
        return Err(CalcError::InvalidInput(format!(
            "quantity must be non-negative, got {value}"
        )));
    }
    if from == to {
        return Ok(value);
    }

    let from_info = UNIT_REGISTRY
        .lookup_in(from, category)
        .ok_or_else(|| CalcError::UnknownUnit {
            unit: from.to_string(),
            category: category.as_str().to_string(),
        })?;
    let to_info = UNIT_REGISTRY
        .lookup_in(to, category)
        .ok_or_else(|| CalcError::UnknownUnit {
            unit: to.to_string(),
            category: category.as_str().to_string(),
        })?;

    // Two aliases of the same unit are still an identity conversion.
    if from_info.name == to_info.name {
        return Ok(value);
    }

    Ok(value * from_info.to_canonical / to_info.to_canonical)
}

/// Converts a quantity to the canonical unit of its category.
pub fn to_canonical(value: f64, unit: &str, category: UnitCategory) -> CalcResult<f64> {
    convert(value, unit, category.canonical(), category)
}

/// Converts a fuel quantity to MMBtu, using the fuel's heating value for
/// physical units (volume/mass) and plain energy conversion otherwise.
///
/// Resolution order:
/// 1. `MMBtu` passes through unchanged.
/// 2. Registered energy units (therm, kWh, GJ, ...) convert directly.
/// 3. The fuel's own heating value for the unit.
/// 4. Generic per-unit defaults for fuels with no registered HHV.
///
/// # Errors
///
/// `InvalidInput` for negative quantities, `UnknownUnit` when no
/// conversion path exists for the unit/fuel combination.
pub fn to_mmbtu(quantity: f64, unit: &str, fuel_type: &str) -> CalcResult<f64> {
    if quantity < 0.0 || quantity.is_nan() {
        return Err(CalcError::InvalidInput(format!(
            "fuel quantity must be non-negative, got {quantity}"
        )));
    }
    if unit == "MMBtu" {
        return Ok(quantity);
    }

    if let Some(info) = UNIT_REGISTRY.lookup_in(unit, UnitCategory::Energy) {
        if info.name == "MMBtu" {
            return Ok(quantity);
        }
        return Ok(quantity * info.to_canonical);
    }

    // Resolve volume/mass aliases so "bbl" finds the "barrel" HHV.
    let resolved = UNIT_REGISTRY
        .lookup(unit)
        .map(|info| info.name)
        .unwrap_or(unit);

    if let Some(hhv) = fuel::heating_value(fuel_type, resolved) {
        return Ok(quantity * hhv);
    }
    if let Some(hhv) = fuel::default_heating_value(resolved) {
        log::debug!("no heating value registered for '{fuel_type}', using generic {resolved} default");
        return Ok(quantity * hhv);
    }

    Err(CalcError::UnknownUnit {
        unit: unit.to_string(),
        category: format!("energy (fuel: {fuel_type})"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion_is_exact() {
        let value = 0.1 + 0.2; // deliberately not exactly representable
        let converted = convert(value, "gallon", "gallon", UnitCategory::Volume).unwrap();
        assert_eq!(converted.to_bits(), value.to_bits());
    }

    #[test]
    fn test_alias_identity_is_exact() {
        let value = 123.456;
        let converted = convert(value, "bbl", "barrel", UnitCategory::Volume).unwrap();
        assert_eq!(converted.to_bits(), value.to_bits());
    }

    #[test]
    fn test_mcf_to_scf() {
        let scf = convert(2.5, "mcf", "scf", UnitCategory::Volume).unwrap();
        assert!((scf - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_mmscf_to_mcf() {
        let mcf = convert(1.0, "MMscf", "mcf", UnitCategory::Volume).unwrap();
        assert!((mcf - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_barrel_to_gallon() {
        let gallons = convert(2.0, "barrel", "gallon", UnitCategory::Volume).unwrap();
        assert!((gallons - 84.0).abs() < 1e-4, "2 bbl = {gallons} gal");
    }

    #[test]
    fn test_liter_to_gallon() {
        let gallons = convert(3.78541, "liter", "gallon", UnitCategory::Volume).unwrap();
        assert!((gallons - 1.0).abs() < 1e-4, "3.78541 L = {gallons} gal");
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let pairs = [
            ("mcf", "m3", UnitCategory::Volume),
            ("gallon", "liter", UnitCategory::Volume),
            ("barrel", "scf", UnitCategory::Volume),
            ("kWh", "MMBtu", UnitCategory::Energy),
            ("GJ", "therm", UnitCategory::Energy),
            ("lb", "tonne", UnitCategory::Mass),
            ("shortTon", "kg", UnitCategory::Mass),
        ];
        for (a, b, category) in pairs {
            let q = 1234.5678;
            let there = convert(q, a, b, category).unwrap();
            let back = convert(there, b, a, category).unwrap();
            let relative = ((back - q) / q).abs();
            assert!(
                relative < 1e-9,
                "round trip {a}<->{b} drifted by {relative:e}"
            );
        }
    }

    #[test]
    fn test_negative_value_rejected() {
        assert!(matches!(
            convert(-1.0, "mcf", "scf", UnitCategory::Volume),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let result = convert(1.0, "hogshead", "scf", UnitCategory::Volume);
        assert!(matches!(result, Err(CalcError::UnknownUnit { .. })));
    }

    #[test]
    fn test_category_mismatch_rejected() {
        // "gallon" exists, but not as an energy unit.
        let result = convert(1.0, "gallon", "MMBtu", UnitCategory::Energy);
        assert!(matches!(result, Err(CalcError::UnknownUnit { .. })));
    }

    #[test]
    fn test_to_mmbtu_passthrough() {
        assert_eq!(to_mmbtu(42.0, "MMBtu", "naturalGas").unwrap(), 42.0);
    }

    #[test]
    fn test_to_mmbtu_uses_fuel_hhv() {
        // Natural gas mcf -> MMBtu via its HHV of 1.028
        let mmbtu = to_mmbtu(1000.0, "mcf", "naturalGas").unwrap();
        assert!((mmbtu - 1028.0).abs() < 1e-9);

        // Diesel gallons use the distillate HHV
        let mmbtu = to_mmbtu(100.0, "gallon", "distillateFuelOil").unwrap();
        assert!((mmbtu - 13.8).abs() < 1e-9);
    }

    #[test]
    fn test_to_mmbtu_energy_units() {
        let mmbtu = to_mmbtu(10.0, "therm", "naturalGas").unwrap();
        assert!((mmbtu - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_to_mmbtu_generic_fallback() {
        // A fuel with no registered HHV for barrels falls back to the
        // generic 5.8 MMBtu/bbl default.
        let mmbtu = to_mmbtu(1.0, "barrel", "someCondensate").unwrap();
        assert!((mmbtu - 5.8).abs() < 1e-12);
    }

    #[test]
    fn test_to_mmbtu_unconvertible() {
        let result = to_mmbtu(1.0, "kg", "naturalGas");
        assert!(matches!(result, Err(CalcError::UnknownUnit { .. })));
    }
}
