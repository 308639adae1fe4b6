//! Scope 3 — value-chain emissions.
//!
//! Only the categories material to oil & gas are implemented:
//!
//! - Category 3 (fuel- and energy-related activities): [`upstream`]
//! - Categories 4 and 9 (transportation and distribution): [`logistics`]
//! - Category 10 (processing of sold products): [`upstream`]
//! - Category 11 (use of sold products): [`sold_products`] — typically
//!   70-90% of an oil & gas company's total footprint
//!
//! Scope 3 is optional end to end: [`total_scope3`] sums whichever
//! categories were supplied, and a category with no input is absent from
//! the result rather than reported as zero.

pub mod logistics;
pub mod sold_products;
pub mod upstream;

pub use logistics::{category4, category9, TransportLeg, TransportResult};
pub use sold_products::{category11, Category11Result, SoldProduct};
pub use upstream::{
    category10, category3, Category10Result, Category3Result, EnergyPurchase, ProcessedProduct,
};

use serde::{Deserialize, Serialize};

/// Activity data for the supported Scope 3 categories. Every list is
/// optional; leave a category empty to exclude it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope3Input {
    pub category3: Vec<EnergyPurchase>,
    pub category4: Vec<TransportLeg>,
    pub category9: Vec<TransportLeg>,
    pub category10: Vec<ProcessedProduct>,
    pub category11: Vec<SoldProduct>,
}

impl Scope3Input {
    pub fn is_empty(&self) -> bool {
        self.category3.is_empty()
            && self.category4.is_empty()
            && self.category9.is_empty()
            && self.category10.is_empty()
            && self.category11.is_empty()
    }
}

/// Combined Scope 3 result over the supplied categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scope3Result {
    pub category3: Option<Category3Result>,
    pub category4: Option<TransportResult>,
    pub category9: Option<TransportResult>,
    pub category10: Option<Category10Result>,
    pub category11: Option<Category11Result>,
    pub total_co2e_kg: f64,
    pub total_co2e_tonnes: f64,
    pub methodology: &'static str,
}

/// Sums whichever Scope 3 categories were supplied.
///
/// Absent categories contribute zero and do not appear in the breakdown.
pub fn total_scope3(input: &Scope3Input) -> Scope3Result {
    let category3 = (!input.category3.is_empty()).then(|| category3(&input.category3));
    let category4 = (!input.category4.is_empty()).then(|| category4(&input.category4));
    let category9 = (!input.category9.is_empty()).then(|| category9(&input.category9));
    let category10 = (!input.category10.is_empty()).then(|| category10(&input.category10));
    let category11 = (!input.category11.is_empty()).then(|| category11(&input.category11));

    let total_co2e_kg = category3.as_ref().map_or(0.0, |c| c.co2e_kg)
        + category4.as_ref().map_or(0.0, |c| c.co2e_kg)
        + category9.as_ref().map_or(0.0, |c| c.co2e_kg)
        + category10.as_ref().map_or(0.0, |c| c.co2e_kg)
        + category11.as_ref().map_or(0.0, |c| c.co2_kg);

    Scope3Result {
        category3,
        category4,
        category9,
        category10,
        category11,
        total_co2e_kg,
        total_co2e_tonnes: total_co2e_kg / 1000.0,
        methodology: "GHG Protocol Corporate Value Chain (Scope 3)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_sums_supplied_categories_only() {
        let input = Scope3Input {
            category11: vec![SoldProduct {
                product_type: "motorGasoline".to_string(),
                quantity: 1000.0,
                unit: "gallon".to_string(),
            }],
            category4: vec![TransportLeg {
                mode: "truck".to_string(),
                tonnes: 100.0,
                distance_km: 500.0,
            }],
            ..Scope3Input::default()
        };
        let result = total_scope3(&input);

        assert!(result.category11.is_some());
        assert!(result.category4.is_some());
        assert!(result.category3.is_none(), "unsupplied category is absent");
        assert!(result.category9.is_none());
        assert!(result.category10.is_none());

        let expected = 8887.0 + 5350.0;
        assert!((result.total_co2e_kg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_is_zero_with_no_breakdown() {
        let result = total_scope3(&Scope3Input::default());
        assert_eq!(result.total_co2e_tonnes, 0.0);
        assert!(result.category11.is_none());
    }

    #[test]
    fn test_is_empty() {
        assert!(Scope3Input::default().is_empty());
        let input = Scope3Input {
            category3: vec![EnergyPurchase {
                energy_type: "diesel".to_string(),
                quantity: 1.0,
                unit: "gallon".to_string(),
            }],
            ..Scope3Input::default()
        };
        assert!(!input.is_empty());
    }
}
