//! Regulatory threshold checks.
//!
//! Aggregate totals are compared against the registered reporting
//! triggers. No breached thresholds yields an empty list, never an error.

use carbonscope_core::factors::benchmarks::{ThresholdBasis, REGULATORY_THRESHOLDS};
use serde::Serialize;

/// One breached regulatory threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdBreach {
    pub key: &'static str,
    /// The aggregate value that tripped the threshold, tonnes CO2e.
    pub value: f64,
    pub limit: f64,
    pub unit: &'static str,
    pub requirement: &'static str,
}

/// Compares totals against every registered threshold.
pub fn check_thresholds(total_co2e_tonnes: f64, scope1_tonnes: f64) -> Vec<ThresholdBreach> {
    REGULATORY_THRESHOLDS
        .iter()
        .filter_map(|threshold| {
            let (value, unit) = match threshold.basis {
                ThresholdBasis::TotalCo2e => (total_co2e_tonnes, "tonnes CO2e"),
                ThresholdBasis::Scope1Co2e => (scope1_tonnes, "tonnes CO2e Scope 1"),
            };
            (value >= threshold.limit_tonnes).then(|| ThresholdBreach {
                key: threshold.key,
                value,
                limit: threshold.limit_tonnes,
                unit,
                requirement: threshold.requirement,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_all_thresholds_is_empty() {
        let breaches = check_thresholds(10_000.0, 5_000.0);
        assert!(breaches.is_empty(), "no breach must mean an empty list");
    }

    #[test]
    fn test_ghgrp_trigger() {
        let breaches = check_thresholds(30_000.0, 5_000.0);
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].key, "EPA_GHGRP");
        assert_eq!(breaches[0].limit, 25_000.0);
    }

    #[test]
    fn test_multiple_triggers() {
        let breaches = check_thresholds(60_000.0, 120_000.0);
        let keys: Vec<_> = breaches.iter().map(|b| b.key).collect();
        assert!(keys.contains(&"EPA_GHGRP"));
        assert!(keys.contains(&"AU_NGER_Corporate"));
        assert!(keys.contains(&"AU_Safeguard"));
    }

    #[test]
    fn test_scope1_basis_uses_scope1_total() {
        // Total is low but Scope 1 alone trips the Safeguard Mechanism.
        let breaches = check_thresholds(10_000.0, 150_000.0);
        assert_eq!(breaches.len(), 1);
        assert_eq!(breaches[0].key, "AU_Safeguard");
        assert_eq!(breaches[0].value, 150_000.0);
    }

    #[test]
    fn test_exact_limit_counts_as_breach() {
        let breaches = check_thresholds(25_000.0, 0.0);
        assert_eq!(breaches.len(), 1);
    }
}
