//! Normalized intensity metrics.
//!
//! Intensity ratios are frequently requested before production or revenue
//! data exists, so every metric here soft-fails: a zero or negative
//! denominator produces a result with `value: None` and an error string
//! instead of propagating an error.

use carbonscope_core::factors::benchmarks::{
    self, FLARING_GLOBAL_AVERAGE_M3_PER_BOE, METHANE_TARGETS, WORLD_BANK_ZRF,
};
use serde::{Deserialize, Serialize};

/// 1 tonne of CH4 occupies about 52.38 mcf at standard conditions.
const MCF_PER_TONNE_CH4: f64 = 52.38;

/// Cubic metres per mcf.
const M3_PER_MCF: f64 = 28.32;

/// A metric value or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityMetric {
    pub value: Option<f64>,
    pub unit: &'static str,
    pub error: Option<String>,
}

impl IntensityMetric {
    fn ok(value: f64, unit: &'static str) -> Self {
        Self {
            value: Some(value),
            unit,
            error: None,
        }
    }

    fn failed(unit: &'static str, reason: &str) -> Self {
        Self {
            value: None,
            unit,
            error: Some(reason.to_string()),
        }
    }
}

/// Quartile rating against the industry distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuartileRating {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

/// Benchmark comparison for carbon intensity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuartileComparison {
    pub percentile: &'static str,
    pub rating: QuartileRating,
    pub industry_average: f64,
}

/// Carbon intensity result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonIntensity {
    pub metric: IntensityMetric,
    pub total_emissions_tonnes: f64,
    pub production_boe: f64,
    pub comparison: Option<QuartileComparison>,
}

/// Carbon intensity: kg CO2e per BOE produced.
pub fn carbon_intensity(total_emissions_tonnes: f64, production_boe: f64) -> CarbonIntensity {
    if production_boe <= 0.0 {
        return CarbonIntensity {
            metric: IntensityMetric::failed("kgCO2e/BOE", "production must be greater than zero"),
            total_emissions_tonnes,
            production_boe,
            comparison: None,
        };
    }

    let intensity = total_emissions_tonnes * 1000.0 / production_boe;
    let quartiles = benchmarks::CARBON_INTENSITY_UPSTREAM;
    let (percentile, rating) = if intensity <= quartiles.top25 {
        ("Top 25%", QuartileRating::Excellent)
    } else if intensity <= quartiles.median {
        ("Above median", QuartileRating::Good)
    } else if intensity <= quartiles.bottom25 {
        ("Below median", QuartileRating::Average)
    } else {
        ("Bottom 25%", QuartileRating::BelowAverage)
    };

    CarbonIntensity {
        metric: IntensityMetric::ok(intensity, "kgCO2e/BOE"),
        total_emissions_tonnes,
        production_boe,
        comparison: Some(QuartileComparison {
            percentile,
            rating,
            industry_average: quartiles.industry_average,
        }),
    }
}

/// Comparison against published methane-intensity targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethaneTargetComparison {
    pub ogci_2025_target: f64,
    pub ogci_2025_met: bool,
    pub ogci_2030_target: f64,
    pub ogci_2030_met: bool,
    pub ogmp2_gold_target: f64,
    pub ogmp2_gold_met: bool,
    pub industry_average: f64,
    pub top_performers: f64,
}

/// Methane intensity result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethaneIntensity {
    pub metric: IntensityMetric,
    pub ch4_emissions_tonnes: f64,
    pub gas_production_mcf: f64,
    /// The CH4 mass re-expressed as gas volume.
    pub ch4_equivalent_mcf: Option<f64>,
    pub targets: Option<MethaneTargetComparison>,
}

/// Methane intensity: CH4 volume as a percentage of gas marketed.
pub fn methane_intensity(ch4_emissions_tonnes: f64, gas_production_mcf: f64) -> MethaneIntensity {
    if gas_production_mcf <= 0.0 {
        return MethaneIntensity {
            metric: IntensityMetric::failed("percent", "gas production must be greater than zero"),
            ch4_emissions_tonnes,
            gas_production_mcf,
            ch4_equivalent_mcf: None,
            targets: None,
        };
    }

    let ch4_mcf = ch4_emissions_tonnes * MCF_PER_TONNE_CH4;
    let intensity = ch4_mcf / gas_production_mcf * 100.0;
    let targets = METHANE_TARGETS;

    MethaneIntensity {
        metric: IntensityMetric::ok(intensity, "percent"),
        ch4_emissions_tonnes,
        gas_production_mcf,
        ch4_equivalent_mcf: Some(ch4_mcf),
        targets: Some(MethaneTargetComparison {
            ogci_2025_target: targets.ogci_2025,
            ogci_2025_met: intensity <= targets.ogci_2025,
            ogci_2030_target: targets.ogci_2030,
            ogci_2030_met: intensity <= targets.ogci_2030,
            ogmp2_gold_target: targets.ogmp2_gold,
            ogmp2_gold_met: intensity <= targets.ogmp2_gold,
            industry_average: targets.industry_average,
            top_performers: targets.top_performers,
        }),
    }
}

/// Rating against the global flaring average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlaringRating {
    ZeroFlaring,
    Excellent,
    Good,
    AboveAverage,
}

/// Flaring intensity result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaringIntensity {
    pub metric: IntensityMetric,
    pub flaring_volume_mcf: f64,
    pub flaring_volume_m3: Option<f64>,
    pub production_boe: f64,
    pub rating: Option<FlaringRating>,
    pub global_average: f64,
    pub world_bank_initiative: &'static str,
}

/// Flaring intensity: m3 flared per BOE produced.
pub fn flaring_intensity(flaring_volume_mcf: f64, production_boe: f64) -> FlaringIntensity {
    if production_boe <= 0.0 {
        return FlaringIntensity {
            metric: IntensityMetric::failed("m3/BOE", "production must be greater than zero"),
            flaring_volume_mcf,
            flaring_volume_m3: None,
            production_boe,
            rating: None,
            global_average: FLARING_GLOBAL_AVERAGE_M3_PER_BOE,
            world_bank_initiative: WORLD_BANK_ZRF,
        };
    }

    let flaring_volume_m3 = flaring_volume_mcf * M3_PER_MCF;
    let intensity = flaring_volume_m3 / production_boe;
    let rating = if intensity == 0.0 {
        FlaringRating::ZeroFlaring
    } else if intensity < FLARING_GLOBAL_AVERAGE_M3_PER_BOE / 2.0 {
        FlaringRating::Excellent
    } else if intensity < FLARING_GLOBAL_AVERAGE_M3_PER_BOE {
        FlaringRating::Good
    } else {
        FlaringRating::AboveAverage
    };

    FlaringIntensity {
        metric: IntensityMetric::ok(intensity, "m3/BOE"),
        flaring_volume_mcf,
        flaring_volume_m3: Some(flaring_volume_m3),
        production_boe,
        rating: Some(rating),
        global_average: FLARING_GLOBAL_AVERAGE_M3_PER_BOE,
        world_bank_initiative: WORLD_BANK_ZRF,
    }
}

/// Revenue intensity result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueIntensity {
    pub metric: IntensityMetric,
    pub total_emissions_tonnes: f64,
    pub revenue_million: f64,
}

/// Revenue intensity: t CO2e per million of revenue.
pub fn revenue_intensity(total_emissions_tonnes: f64, revenue_million: f64) -> RevenueIntensity {
    if revenue_million <= 0.0 {
        return RevenueIntensity {
            metric: IntensityMetric::failed(
                "tCO2e/million revenue",
                "revenue must be greater than zero",
            ),
            total_emissions_tonnes,
            revenue_million,
        };
    }

    RevenueIntensity {
        metric: IntensityMetric::ok(
            total_emissions_tonnes / revenue_million,
            "tCO2e/million revenue",
        ),
        total_emissions_tonnes,
        revenue_million,
    }
}

/// Percentage share of each scope in the grand total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeShares {
    pub scope1_percent: f64,
    pub scope2_percent: f64,
    pub scope3_percent: f64,
    pub scope1_and_2_percent: f64,
}

/// Scope shares of the total; all zeros when the total is zero.
pub fn scope_shares(scope1_tonnes: f64, scope2_tonnes: f64, scope3_tonnes: f64) -> ScopeShares {
    let total = scope1_tonnes + scope2_tonnes + scope3_tonnes;
    if total <= 0.0 {
        return ScopeShares {
            scope1_percent: 0.0,
            scope2_percent: 0.0,
            scope3_percent: 0.0,
            scope1_and_2_percent: 0.0,
        };
    }
    ScopeShares {
        scope1_percent: scope1_tonnes / total * 100.0,
        scope2_percent: scope2_tonnes / total * 100.0,
        scope3_percent: scope3_tonnes / total * 100.0,
        scope1_and_2_percent: (scope1_tonnes + scope2_tonnes) / total * 100.0,
    }
}

/// Auxiliary data for the combined intensity report. Absent fields
/// suppress the corresponding metric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntensityInputs {
    pub total_emissions_tonnes: Option<f64>,
    pub ch4_emissions_tonnes: Option<f64>,
    pub production_boe: Option<f64>,
    pub gas_production_mcf: Option<f64>,
    pub flaring_volume_mcf: Option<f64>,
    pub revenue_million: Option<f64>,
    pub scope1_tonnes: Option<f64>,
    pub scope2_tonnes: Option<f64>,
    pub scope3_tonnes: Option<f64>,
}

/// All intensity metrics for which inputs were supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntensityReport {
    pub carbon: Option<CarbonIntensity>,
    pub methane: Option<MethaneIntensity>,
    pub flaring: Option<FlaringIntensity>,
    pub revenue: Option<RevenueIntensity>,
    pub scope_shares: Option<ScopeShares>,
}

/// Derives every metric whose inputs are present.
pub fn all_intensities(inputs: &IntensityInputs) -> IntensityReport {
    let mut report = IntensityReport::default();

    if let (Some(total), Some(boe)) = (inputs.total_emissions_tonnes, inputs.production_boe) {
        report.carbon = Some(carbon_intensity(total, boe));
    }
    if let (Some(ch4), Some(gas)) = (inputs.ch4_emissions_tonnes, inputs.gas_production_mcf) {
        report.methane = Some(methane_intensity(ch4, gas));
    }
    if let (Some(flare), Some(boe)) = (inputs.flaring_volume_mcf, inputs.production_boe) {
        report.flaring = Some(flaring_intensity(flare, boe));
    }
    if let (Some(total), Some(revenue)) = (inputs.total_emissions_tonnes, inputs.revenue_million) {
        report.revenue = Some(revenue_intensity(total, revenue));
    }
    if let (Some(s1), Some(s2)) = (inputs.scope1_tonnes, inputs.scope2_tonnes) {
        report.scope_shares = Some(scope_shares(s1, s2, inputs.scope3_tonnes.unwrap_or(0.0)));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_intensity_hand_check() {
        // 18,000 t over 1,000,000 BOE = 18 kg/BOE
        let result = carbon_intensity(18_000.0, 1_000_000.0);
        assert_eq!(result.metric.value, Some(18.0));
        let comparison = result.comparison.unwrap();
        assert_eq!(comparison.rating, QuartileRating::Average);
    }

    #[test]
    fn test_carbon_intensity_quartile_boundaries() {
        let top = carbon_intensity(5_000.0, 1_000_000.0);
        assert_eq!(top.comparison.unwrap().rating, QuartileRating::Excellent);

        let bottom = carbon_intensity(40_000.0, 1_000_000.0);
        assert_eq!(
            bottom.comparison.unwrap().rating,
            QuartileRating::BelowAverage
        );
    }

    #[test]
    fn test_zero_production_soft_fails() {
        let result = carbon_intensity(1000.0, 0.0);
        assert_eq!(result.metric.value, None);
        assert!(result.metric.error.is_some());
        assert!(result.comparison.is_none());
    }

    #[test]
    fn test_methane_intensity_hand_check() {
        // 100 t CH4 -> 5238 mcf; over 1,000,000 mcf marketed = 0.5238%
        let result = methane_intensity(100.0, 1_000_000.0);
        let value = result.metric.value.unwrap();
        assert!((value - 0.5238).abs() < 1e-9);

        let targets = result.targets.unwrap();
        assert!(!targets.ogci_2025_met, "0.52% misses the 0.25% target");
        assert!(value < targets.industry_average);
    }

    #[test]
    fn test_methane_intensity_target_met() {
        let result = methane_intensity(10.0, 1_000_000.0);
        let targets = result.targets.unwrap();
        assert!(targets.ogci_2025_met);
        assert!(targets.ogci_2030_met);
    }

    #[test]
    fn test_flaring_intensity_ratings() {
        let zero = flaring_intensity(0.0, 1_000_000.0);
        assert_eq!(zero.rating, Some(FlaringRating::ZeroFlaring));

        // 100,000 mcf * 28.32 / 1,000,000 BOE = 2.832 m3/BOE (< 4.5 global avg)
        let good = flaring_intensity(100_000.0, 1_000_000.0);
        assert_eq!(good.rating, Some(FlaringRating::Good));
        assert!((good.metric.value.unwrap() - 2.832).abs() < 1e-9);

        let heavy = flaring_intensity(500_000.0, 1_000_000.0);
        assert_eq!(heavy.rating, Some(FlaringRating::AboveAverage));
    }

    #[test]
    fn test_revenue_intensity() {
        let result = revenue_intensity(50_000.0, 2_500.0);
        assert_eq!(result.metric.value, Some(20.0));

        let failed = revenue_intensity(50_000.0, -1.0);
        assert_eq!(failed.metric.value, None);
    }

    #[test]
    fn test_scope_shares() {
        let shares = scope_shares(30.0, 20.0, 50.0);
        assert!((shares.scope1_percent - 30.0).abs() < 1e-12);
        assert!((shares.scope3_percent - 50.0).abs() < 1e-12);
        assert!((shares.scope1_and_2_percent - 50.0).abs() < 1e-12);

        let empty = scope_shares(0.0, 0.0, 0.0);
        assert_eq!(empty.scope1_percent, 0.0);
    }

    #[test]
    fn test_all_intensities_partial_inputs() {
        let inputs = IntensityInputs {
            total_emissions_tonnes: Some(10_000.0),
            production_boe: Some(500_000.0),
            ..IntensityInputs::default()
        };
        let report = all_intensities(&inputs);
        assert!(report.carbon.is_some());
        assert!(report.methane.is_none(), "metrics without inputs stay absent");
        assert!(report.revenue.is_none());
    }
}
