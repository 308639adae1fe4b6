//! Unit registry with oil & gas field units and conversion factors.
//!
//! # Conversion Factor Convention
//!
//! All conversion factors are defined as the multiplier to convert FROM
//! the registered unit TO the canonical unit of its category:
//!
//! - Energy: MMBtu (mcf has no fixed energy factor; gas volumes convert
//!   through a fuel's heating value, see [`crate::units::to_mmbtu`])
//! - Volume: scf
//! - Mass: kg

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Physical quantity categories supported by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitCategory {
    Energy,
    Volume,
    Mass,
}

impl UnitCategory {
    /// The unit every category normalizes to.
    pub fn canonical(&self) -> &'static str {
        match self {
            UnitCategory::Energy => "MMBtu",
            UnitCategory::Volume => "scf",
            UnitCategory::Mass => "kg",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitCategory::Energy => "energy",
            UnitCategory::Volume => "volume",
            UnitCategory::Mass => "mass",
        }
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Information about a registered unit.
#[derive(Debug, Clone, Copy)]
pub struct UnitInfo {
    /// Canonical symbol of this unit.
    pub name: &'static str,
    pub category: UnitCategory,
    /// Multiplier to the category's canonical unit.
    pub to_canonical: f64,
}

/// The global unit registry.
pub static UNIT_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of known units with their categories and conversion factors.
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<&'static str, UnitInfo>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_energy_units();
        registry.register_volume_units();
        registry.register_mass_units();
        registry
    }

    /// Looks up a unit by symbol, resolving aliases.
    pub fn lookup(&self, symbol: &str) -> Option<UnitInfo> {
        if let Some(info) = self.units.get(symbol) {
            return Some(*info);
        }
        self.aliases
            .get(symbol)
            .and_then(|canonical| self.units.get(canonical))
            .copied()
    }

    /// Looks up a unit and checks it belongs to the expected category.
    pub fn lookup_in(&self, symbol: &str, category: UnitCategory) -> Option<UnitInfo> {
        self.lookup(symbol).filter(|info| info.category == category)
    }

    fn insert(&mut self, name: &'static str, category: UnitCategory, to_canonical: f64) {
        self.units.insert(
            name,
            UnitInfo {
                name,
                category,
                to_canonical,
            },
        );
    }

    fn register_energy_units(&mut self) {
        self.insert("MMBtu", UnitCategory::Energy, 1.0);
        self.insert("Btu", UnitCategory::Energy, 1e-6);
        self.insert("therm", UnitCategory::Energy, 0.1);
        self.insert("kWh", UnitCategory::Energy, 3.412142e-3);
        self.insert("MWh", UnitCategory::Energy, 3.412142);
        self.insert("GJ", UnitCategory::Energy, 0.9478171);
        self.insert("MJ", UnitCategory::Energy, 9.478171e-4);

        self.aliases.insert("mmbtu", "MMBtu");
        self.aliases.insert("MMBTU", "MMBtu");
        self.aliases.insert("btu", "Btu");
        self.aliases.insert("therms", "therm");
        self.aliases.insert("kwh", "kWh");
        self.aliases.insert("mwh", "MWh");
    }

    fn register_volume_units(&mut self) {
        self.insert("scf", UnitCategory::Volume, 1.0);
        self.insert("mcf", UnitCategory::Volume, 1e3);
        self.insert("MMscf", UnitCategory::Volume, 1e6);
        // 35.3147 ft^3 per m^3
        self.insert("m3", UnitCategory::Volume, 35.3147);
        self.insert("gallon", UnitCategory::Volume, 0.13368055);
        // 42 US gallons per barrel
        self.insert("barrel", UnitCategory::Volume, 5.6145831);
        self.insert("liter", UnitCategory::Volume, 0.035314667);

        self.aliases.insert("SCF", "scf");
        self.aliases.insert("MCF", "mcf");
        self.aliases.insert("Mcf", "mcf");
        self.aliases.insert("mmscf", "MMscf");
        self.aliases.insert("MMSCF", "MMscf");
        self.aliases.insert("gal", "gallon");
        self.aliases.insert("gallons", "gallon");
        self.aliases.insert("bbl", "barrel");
        self.aliases.insert("barrels", "barrel");
        self.aliases.insert("l", "liter");
        self.aliases.insert("L", "liter");
        self.aliases.insert("litre", "liter");
        self.aliases.insert("liters", "liter");
    }

    fn register_mass_units(&mut self) {
        self.insert("kg", UnitCategory::Mass, 1.0);
        self.insert("g", UnitCategory::Mass, 1e-3);
        self.insert("lb", UnitCategory::Mass, 0.45359237);
        self.insert("tonne", UnitCategory::Mass, 1e3);
        // US short ton
        self.insert("shortTon", UnitCategory::Mass, 907.18474);

        self.aliases.insert("lbs", "lb");
        self.aliases.insert("pound", "lb");
        self.aliases.insert("pounds", "lb");
        self.aliases.insert("t", "tonne");
        self.aliases.insert("tonnes", "tonne");
        self.aliases.insert("metricTon", "tonne");
        self.aliases.insert("ton", "shortTon");
        self.aliases.insert("short_ton", "shortTon");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_units_have_unit_factor() {
        let registry = UnitRegistry::new();
        for category in [UnitCategory::Energy, UnitCategory::Volume, UnitCategory::Mass] {
            let info = registry
                .lookup(category.canonical())
                .expect("canonical unit must be registered");
            assert_eq!(info.to_canonical, 1.0, "canonical factor for {category}");
            assert_eq!(info.category, category);
        }
    }

    #[test]
    fn test_alias_resolution() {
        let registry = UnitRegistry::new();
        let bbl = registry.lookup("bbl").expect("bbl alias should resolve");
        assert_eq!(bbl.name, "barrel");

        let mcf = registry.lookup("MCF").expect("MCF alias should resolve");
        assert_eq!(mcf.name, "mcf");
    }

    #[test]
    fn test_barrel_is_42_gallons() {
        let registry = UnitRegistry::new();
        let barrel = registry.lookup("barrel").unwrap();
        let gallon = registry.lookup("gallon").unwrap();
        let ratio = barrel.to_canonical / gallon.to_canonical;
        assert!(
            (ratio - 42.0).abs() < 1e-4,
            "barrel/gallon ratio was {ratio}"
        );
    }

    #[test]
    fn test_category_filter() {
        let registry = UnitRegistry::new();
        assert!(registry.lookup_in("gallon", UnitCategory::Volume).is_some());
        assert!(registry.lookup_in("gallon", UnitCategory::Energy).is_none());
    }

    #[test]
    fn test_unknown_unit() {
        let registry = UnitRegistry::new();
        assert!(registry.lookup("cubit").is_none());
    }
}
