//! Category 11 — use of sold products.
//!
//! End-use combustion of sold petroleum products is the dominant
//! value-chain category for oil & gas (70-90% of Scope 3 by documented
//! industry norms). Sales volumes arrive in whatever unit the commercial
//! system reports, so each product factor carries unit bridges; a
//! combination with no bridge is skipped and recorded, never guessed.

use carbonscope_core::emissions::SkippedEntry;
use carbonscope_core::factors::products::{self, ProductUnit};
use carbonscope_core::units::to_mmbtu;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const METHODOLOGY: &str = "GHG Protocol Scope 3 Category 11 - End-use Combustion";

/// One sold-product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldProduct {
    pub product_type: String,
    pub quantity: f64,
    pub unit: String,
}

/// Accumulated line for one product type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductLine {
    pub quantity: f64,
    pub unit: String,
    pub co2_kg: f64,
    pub co2_tonnes: f64,
}

/// Category 11 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category11Result {
    pub co2_kg: f64,
    pub co2_tonnes: f64,
    /// Accumulated per product type.
    pub breakdown: BTreeMap<String, ProductLine>,
    pub skipped: Vec<SkippedEntry>,
    pub product_count: usize,
    pub methodology: &'static str,
}

/// Resolves the CO2 mass for one line, bridging units where the declared
/// unit differs from the factor's native unit.
fn line_co2_kg(product_type: &str, quantity: f64, unit: &str) -> Result<f64, String> {
    if quantity < 0.0 {
        return Err(format!("quantity must be non-negative, got {quantity}"));
    }
    let factor = products::combustion_factor(product_type).map_err(|e| e.to_string())?;

    if unit == factor.unit.as_str() {
        return Ok(quantity * factor.factor);
    }

    match unit {
        "liter" => factor
            .kg_per_liter
            .map(|f| quantity * f)
            .ok_or_else(|| format!("no per-liter factor for {product_type}")),
        "gallon" => factor
            .kg_per_gallon
            .map(|f| quantity * f)
            .ok_or_else(|| format!("no per-gallon factor for {product_type}")),
        // Barrels bridge to the per-gallon native factor.
        "barrel" if factor.unit == ProductUnit::Gallon => Ok(quantity * 42.0 * factor.factor),
        "MJ" => factor
            .kg_per_mj
            .map(|f| quantity * f)
            .ok_or_else(|| format!("no per-MJ factor for {product_type}")),
        // Gas volumes bridge through the natural-gas heating value.
        "mcf" if factor.unit == ProductUnit::MMBtu => {
            let mmbtu = to_mmbtu(quantity, "mcf", product_type).map_err(|e| e.to_string())?;
            Ok(mmbtu * factor.factor)
        }
        _ => Err(format!(
            "cannot convert {unit} to {} for {product_type}",
            factor.unit.as_str()
        )),
    }
}

/// Category 11: combustion of sold products by end customers.
///
/// Partial input is the norm: only the product types actually sold need
/// appear, and an unconvertible line is skipped with a record rather
/// than aborting the category.
pub fn category11(products: &[SoldProduct]) -> Category11Result {
    let mut co2_kg = 0.0;
    let mut breakdown: BTreeMap<String, ProductLine> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (index, product) in products.iter().enumerate() {
        match line_co2_kg(&product.product_type, product.quantity, &product.unit) {
            Ok(line_kg) => {
                co2_kg += line_kg;
                let line = breakdown.entry(product.product_type.clone()).or_default();
                line.quantity += product.quantity;
                line.unit = product.unit.clone();
                line.co2_kg += line_kg;
                line.co2_tonnes = line.co2_kg / 1000.0;
            }
            Err(reason) => {
                log::warn!(
                    "skipping sold-product entry {index} ({}): {reason}",
                    product.product_type
                );
                skipped.push(SkippedEntry::new(index, &product.product_type, reason));
            }
        }
    }

    Category11Result {
        co2_kg,
        co2_tonnes: co2_kg / 1000.0,
        product_count: breakdown.len(),
        breakdown,
        skipped,
        methodology: METHODOLOGY,
    }
}
