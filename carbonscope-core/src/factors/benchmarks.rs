//! Industry benchmarks and regulatory thresholds.
//!
//! Benchmark quartiles and target values are used by the intensity module
//! to rate a facility's normalized metrics against peers; the threshold
//! table drives regulatory-trigger checks on aggregate totals.

use serde::Serialize;

/// Upstream carbon-intensity quartiles, kg CO2e per BOE.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IntensityQuartiles {
    pub top25: f64,
    pub median: f64,
    pub bottom25: f64,
    pub industry_average: f64,
}

pub const CARBON_INTENSITY_UPSTREAM: IntensityQuartiles = IntensityQuartiles {
    top25: 7.0,
    median: 16.0,
    bottom25: 28.0,
    industry_average: 18.0,
};

/// Methane-intensity targets, percent of gas marketed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MethaneTargets {
    pub ogci_2025: f64,
    pub ogci_2030: f64,
    pub ogmp2_gold: f64,
    pub industry_average: f64,
    pub top_performers: f64,
}

pub const METHANE_TARGETS: MethaneTargets = MethaneTargets {
    ogci_2025: 0.25,
    ogci_2030: 0.20,
    ogmp2_gold: 0.20,
    industry_average: 1.2,
    top_performers: 0.08,
};

/// Global average flaring intensity, m3 per BOE.
pub const FLARING_GLOBAL_AVERAGE_M3_PER_BOE: f64 = 4.5;

/// World Bank Zero Routine Flaring initiative label.
pub const WORLD_BANK_ZRF: &str = "World Bank Zero Routine Flaring by 2030";

/// Which aggregate a regulatory threshold applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThresholdBasis {
    TotalCo2e,
    Scope1Co2e,
}

/// One regulatory reporting trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegulatoryThreshold {
    pub key: &'static str,
    pub limit_tonnes: f64,
    pub basis: ThresholdBasis,
    pub requirement: &'static str,
}

pub const REGULATORY_THRESHOLDS: &[RegulatoryThreshold] = &[
    RegulatoryThreshold {
        key: "EPA_GHGRP",
        limit_tonnes: 25_000.0,
        basis: ThresholdBasis::TotalCo2e,
        requirement: "Mandatory annual GHG reporting required",
    },
    RegulatoryThreshold {
        key: "AU_NGER_Corporate",
        limit_tonnes: 50_000.0,
        basis: ThresholdBasis::TotalCo2e,
        requirement: "NGER corporate reporting required",
    },
    RegulatoryThreshold {
        key: "AU_Safeguard",
        limit_tonnes: 100_000.0,
        basis: ThresholdBasis::Scope1Co2e,
        requirement: "Safeguard Mechanism baseline applies",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quartiles_ordered() {
        let q = CARBON_INTENSITY_UPSTREAM;
        assert!(q.top25 < q.median && q.median < q.bottom25);
    }

    #[test]
    fn test_thresholds_ascending_and_positive() {
        for threshold in REGULATORY_THRESHOLDS {
            assert!(threshold.limit_tonnes > 0.0);
        }
        assert_eq!(REGULATORY_THRESHOLDS[0].key, "EPA_GHGRP");
        assert_eq!(REGULATORY_THRESHOLDS[0].limit_tonnes, 25_000.0);
    }

    #[test]
    fn test_methane_targets_tighter_than_industry() {
        let t = METHANE_TARGETS;
        assert!(t.ogci_2030 <= t.ogci_2025);
        assert!(t.ogci_2025 < t.industry_average);
    }
}
