//! Categories 3 and 10 — upstream energy and processing of sold products.
//!
//! Category 3 covers well-to-tank/gate emissions of purchased fuels and
//! T&D losses on purchased electricity. Category 10 covers downstream
//! processing of sold intermediates (refining, gas processing,
//! fractionation).

use carbonscope_core::emissions::SkippedEntry;
use carbonscope_core::factors::products;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One purchased-energy line (Category 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyPurchase {
    pub energy_type: String,
    pub quantity: f64,
    pub unit: String,
}

/// Per-type line of a Category 3 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyLine {
    pub quantity: f64,
    pub unit: String,
    pub factor: f64,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
}

/// Category 3 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category3Result {
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub breakdown: BTreeMap<String, EnergyLine>,
    pub skipped: Vec<SkippedEntry>,
    pub methodology: &'static str,
}

/// Category 3: fuel- and energy-related activities not in Scope 1 or 2.
///
/// Quantities are expected in each factor's native unit; unknown energy
/// types are skipped with a record.
pub fn category3(purchases: &[EnergyPurchase]) -> Category3Result {
    let mut co2e_kg = 0.0;
    let mut breakdown = BTreeMap::new();
    let mut skipped = Vec::new();

    for (index, purchase) in purchases.iter().enumerate() {
        if purchase.quantity < 0.0 {
            skipped.push(SkippedEntry::new(
                index,
                &purchase.energy_type,
                "quantity must be non-negative",
            ));
            continue;
        }
        match products::upstream_factor(&purchase.energy_type) {
            Some(factor) => {
                let line_kg = purchase.quantity * factor.factor;
                co2e_kg += line_kg;
                breakdown.insert(
                    purchase.energy_type.clone(),
                    EnergyLine {
                        quantity: purchase.quantity,
                        unit: purchase.unit.clone(),
                        factor: factor.factor,
                        co2e_kg: line_kg,
                        co2e_tonnes: line_kg / 1000.0,
                    },
                );
            }
            None => {
                log::warn!(
                    "skipping unknown upstream energy type '{}'",
                    purchase.energy_type
                );
                skipped.push(SkippedEntry::new(
                    index,
                    &purchase.energy_type,
                    "unknown energy type for Category 3",
                ));
            }
        }
    }

    Category3Result {
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        skipped,
        methodology: "GHG Protocol Scope 3 Category 3",
    }
}

/// One sold-intermediate line (Category 10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedProduct {
    pub product_type: String,
    pub quantity: f64,
    /// Supplier-specific factor overriding the reference table,
    /// kg CO2e per unit.
    #[serde(default)]
    pub factor_override: Option<f64>,
}

/// Per-product line of a Category 10 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingLine {
    pub product_type: String,
    pub quantity: f64,
    pub factor: f64,
    pub co2e_kg: f64,
}

/// Category 10 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category10Result {
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub breakdown: Vec<ProcessingLine>,
    pub skipped: Vec<SkippedEntry>,
    pub methodology: &'static str,
}

/// Category 10: processing of sold products.
///
/// A product with neither a registered factor nor a caller override is
/// skipped with a record; silently charging zero would make a lookup
/// miss indistinguishable from a genuinely zero-emission process.
pub fn category10(products_sold: &[ProcessedProduct]) -> Category10Result {
    let mut co2e_kg = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, product) in products_sold.iter().enumerate() {
        if product.quantity < 0.0 {
            skipped.push(SkippedEntry::new(
                index,
                &product.product_type,
                "quantity must be non-negative",
            ));
            continue;
        }
        let factor = product
            .factor_override
            .or_else(|| products::processing_factor(&product.product_type).map(|f| f.factor));

        match factor {
            Some(factor) => {
                let line_kg = product.quantity * factor;
                co2e_kg += line_kg;
                breakdown.push(ProcessingLine {
                    product_type: product.product_type.clone(),
                    quantity: product.quantity,
                    factor,
                    co2e_kg: line_kg,
                });
            }
            None => {
                log::warn!(
                    "skipping processing entry '{}': no factor registered or supplied",
                    product.product_type
                );
                skipped.push(SkippedEntry::new(
                    index,
                    &product.product_type,
                    "no processing factor registered or supplied",
                ));
            }
        }
    }

    Category10Result {
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        skipped,
        methodology: "GHG Protocol Scope 3 Category 10",
    }
}
