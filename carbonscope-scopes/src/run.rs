//! Calculation-run orchestration.
//!
//! One [`run_calculation`] call turns a full set of activity data into an
//! immutable [`CalculationRun`] snapshot: per-source results, scope
//! totals, a grand total, and the roll-up of every batch entry that was
//! skipped along the way.
//!
//! The run reads no clock and no ambient configuration: the GWP vintage,
//! method parameters, and the `calculated_at` stamp are all fields of the
//! input. Re-running with changed inputs produces a new, unrelated
//! snapshot.
//!
//! Failure policy follows the per-calculator contracts: directly-supplied
//! single inputs (flaring volume, electricity consumption, average-method
//! production) fail the run loudly, while batch rows (fuel lines, vent
//! sources, component counts, sold products) are skipped and surfaced in
//! [`CalculationRun::skipped`].

use crate::parameters::{FlaringParameters, ThermalParameters, VentingParameters};
use crate::scope1::{self, FuelEntry, MobileEntry, VentEntry};
use crate::scope1::fugitive::{ComponentCount, DeviceCounts};
use crate::scope2::{self, DualReportingResult, MarketOptions, ThermalKind};
use crate::scope3::{self, Scope3Input, Scope3Result};
use carbonscope_core::emissions::{SkippedEntry, SourceKind, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::flare::FlareGasEntry;
use carbonscope_core::factors::leaks::ServiceType;
use carbonscope_core::gwp::GwpVersion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flaring activity data; the method is chosen by the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum FlaringInput {
    /// Default method: volume in MMscf, optional HHV/efficiency overrides.
    Default {
        volume_mmscf: f64,
        #[serde(default)]
        hhv: Option<f64>,
        #[serde(default)]
        combustion_efficiency: Option<f64>,
    },
    /// Composition method: volume in scf plus the metered composition.
    Composition {
        volume_scf: f64,
        composition: Vec<FlareGasEntry>,
        #[serde(default)]
        combustion_efficiency: Option<f64>,
    },
}

/// Fugitive activity data; the method is chosen by the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum FugitiveInput {
    ComponentCount {
        components: Vec<ComponentCount>,
        service_type: ServiceType,
    },
    AverageFactor {
        facility_type: String,
        production_boe: f64,
    },
}

/// Venting activity data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentingInput {
    pub sources: Vec<VentEntry>,
    /// Overrides the parameter default when present.
    #[serde(default)]
    pub methane_content: Option<f64>,
}

/// Scope 1 activity data. Every source is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope1Input {
    pub stationary: Vec<FuelEntry>,
    pub mobile: Vec<MobileEntry>,
    pub flaring: Option<FlaringInput>,
    pub venting: Option<VentingInput>,
    pub fugitive: Option<FugitiveInput>,
    pub pneumatic: Option<DeviceCounts>,
}

/// Market-based electricity accounting data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketInput {
    /// Supplier-specific factor; falls back to the location-based grid
    /// factor.
    pub market_factor: Option<f64>,
    pub options: MarketOptions,
}

/// Purchased electricity consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectricityInput {
    pub kwh: f64,
    pub region: String,
    #[serde(default)]
    pub subregion: Option<String>,
    /// Supplying market data enables dual reporting.
    #[serde(default)]
    pub market: Option<MarketInput>,
}

/// One purchased thermal energy line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalEntry {
    pub kind: ThermalKind,
    pub energy_mmbtu: f64,
    #[serde(default)]
    pub factor: Option<f64>,
}

/// Scope 2 activity data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope2Input {
    pub electricity: Option<ElectricityInput>,
    pub thermal: Vec<ThermalEntry>,
}

/// Per-call method parameters with table defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    pub flaring: FlaringParameters,
    pub venting: VentingParameters,
    pub thermal: ThermalParameters,
}

/// Everything a calculation run consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationInput {
    #[serde(default)]
    pub scope1: Scope1Input,
    #[serde(default)]
    pub scope2: Scope2Input,
    /// Scope 3 is optional end to end.
    #[serde(default)]
    pub scope3: Option<Scope3Input>,
    #[serde(default)]
    pub gwp_version: GwpVersion,
    #[serde(default)]
    pub parameters: RunParameters,
    /// Caller-supplied timestamp (RFC 3339); the core reads no clock.
    pub calculated_at: String,
}

/// Per-scope roll-up: the scope's CO2e total and each contributing
/// source's standardized result.
///
/// `co2e_tonnes` is exactly the floating-point sum of the per-source
/// tonnes; sources with no input are absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeTotal {
    pub co2e_tonnes: f64,
    pub by_source: BTreeMap<SourceKind, SourceResult>,
}

impl ScopeTotal {
    fn add(&mut self, kind: SourceKind, result: SourceResult) {
        self.co2e_tonnes += result.co2e_tonnes;
        self.by_source.insert(kind, result);
    }
}

/// Scope and grand totals, tonnes CO2e.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScopeTotals {
    pub scope1_tonnes: f64,
    pub scope2_tonnes: f64,
    pub scope3_tonnes: f64,
    pub total_tonnes: f64,
}

/// Immutable snapshot of one calculation run.
///
/// This is the sole structure handed to exporters and persistence;
/// they render it without re-deriving any numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRun {
    pub totals: ScopeTotals,
    pub scope1: ScopeTotal,
    pub scope2: ScopeTotal,
    /// Dual-reporting comparison when market data was supplied.
    pub scope2_dual: Option<DualReportingResult>,
    /// Absent when no Scope 3 categories were supplied; contributes
    /// exactly zero to the grand total in that case.
    pub scope3: Option<Scope3Result>,
    /// Roll-up of every batch entry skipped anywhere in the run,
    /// labelled by its source.
    pub skipped: Vec<SkippedEntry>,
    pub gwp_version: GwpVersion,
    pub calculated_at: String,
}

fn collect_skips(into: &mut Vec<SkippedEntry>, prefix: &str, from: &[SkippedEntry]) {
    for entry in from {
        into.push(SkippedEntry::new(
            entry.index,
            format!("{prefix}/{}", entry.label),
            entry.reason.clone(),
        ));
    }
}

fn run_scope1(
    input: &Scope1Input,
    parameters: &RunParameters,
    gwp_version: GwpVersion,
    skipped: &mut Vec<SkippedEntry>,
) -> CalcResult<ScopeTotal> {
    let mut scope1 = ScopeTotal::default();

    if !input.stationary.is_empty() {
        let total = scope1::total_stationary_combustion(&input.stationary, gwp_version);
        collect_skips(skipped, "scope1/stationary", &total.skipped);
        if !total.breakdown.is_empty() {
            scope1.add(
                SourceKind::StationaryCombustion,
                SourceResult::from_vector(total.emissions, scope1::stationary::METHODOLOGY, gwp_version),
            );
        }
    }

    if !input.mobile.is_empty() {
        let total = scope1::total_mobile_combustion(&input.mobile, gwp_version);
        collect_skips(skipped, "scope1/mobile", &total.skipped);
        if !total.breakdown.is_empty() {
            scope1.add(
                SourceKind::MobileCombustion,
                SourceResult::from_vector(total.emissions, scope1::mobile::METHODOLOGY, gwp_version),
            );
        }
    }

    if let Some(flaring) = &input.flaring {
        let summary = match flaring {
            FlaringInput::Default {
                volume_mmscf,
                hhv,
                combustion_efficiency,
            } => {
                let params = FlaringParameters {
                    hhv_mmbtu_per_mmscf: hhv.unwrap_or(parameters.flaring.hhv_mmbtu_per_mmscf),
                    combustion_efficiency: combustion_efficiency
                        .unwrap_or(parameters.flaring.combustion_efficiency),
                    ..parameters.flaring.clone()
                };
                scope1::flaring_default(*volume_mmscf, &params, gwp_version)?.summary
            }
            FlaringInput::Composition {
                volume_scf,
                composition,
                combustion_efficiency,
            } => {
                let params = FlaringParameters {
                    combustion_efficiency: combustion_efficiency
                        .unwrap_or(parameters.flaring.combustion_efficiency),
                    ..parameters.flaring.clone()
                };
                scope1::flaring_with_composition(*volume_scf, composition, &params, gwp_version)?
                    .summary
            }
        };
        scope1.add(SourceKind::Flaring, summary);
    }

    if let Some(venting) = &input.venting {
        let params = VentingParameters {
            methane_content: venting
                .methane_content
                .unwrap_or(parameters.venting.methane_content),
            ..parameters.venting.clone()
        };
        let result = scope1::venting(&venting.sources, &params, gwp_version);
        collect_skips(skipped, "scope1/venting", &result.skipped);
        if !result.breakdown.is_empty() {
            scope1.add(SourceKind::Venting, result.summary);
        }
    }

    if let Some(fugitive) = &input.fugitive {
        match fugitive {
            FugitiveInput::ComponentCount {
                components,
                service_type,
            } => {
                let result =
                    scope1::component_count_method(components, *service_type, gwp_version);
                collect_skips(skipped, "scope1/fugitive", &result.skipped);
                if !result.breakdown.is_empty() {
                    scope1.add(SourceKind::Fugitive, result.summary);
                }
            }
            FugitiveInput::AverageFactor {
                facility_type,
                production_boe,
            } => {
                let result =
                    scope1::average_method(facility_type, *production_boe, gwp_version)?;
                scope1.add(SourceKind::Fugitive, result.summary);
            }
        }
    }

    if let Some(pneumatic) = &input.pneumatic {
        let result = scope1::pneumatic_devices(pneumatic, &parameters.venting, gwp_version);
        if !result.breakdown.is_empty() {
            scope1.add(SourceKind::Pneumatic, result.summary);
        }
    }

    Ok(scope1)
}

fn run_scope2(
    input: &Scope2Input,
    parameters: &RunParameters,
    gwp_version: GwpVersion,
) -> CalcResult<(ScopeTotal, Option<DualReportingResult>)> {
    let mut scope2 = ScopeTotal::default();
    let mut dual = None;

    if let Some(electricity) = &input.electricity {
        match &electricity.market {
            Some(market) => {
                let result = scope2::dual_reporting(
                    electricity.kwh,
                    &electricity.region,
                    electricity.subregion.as_deref(),
                    market.market_factor,
                    &market.options,
                    gwp_version,
                )?;
                // Location-based carries the headline Scope 2 figure; the
                // market-based result stays in the dual comparison.
                scope2.add(SourceKind::Electricity, result.location.summary.clone());
                dual = Some(result);
            }
            None => {
                let result = scope2::location_based(
                    electricity.kwh,
                    &electricity.region,
                    electricity.subregion.as_deref(),
                    gwp_version,
                )?;
                scope2.add(SourceKind::Electricity, result.summary);
            }
        }
    }

    // Repeated thermal entries of the same kind accumulate into one line.
    let mut thermal_totals: BTreeMap<SourceKind, (f64, &'static str)> = BTreeMap::new();
    for entry in &input.thermal {
        let result = scope2::purchased_thermal(
            entry.energy_mmbtu,
            entry.kind,
            entry.factor,
            &parameters.thermal,
            gwp_version,
        )?;
        let kind = match entry.kind {
            ThermalKind::Steam => SourceKind::Steam,
            ThermalKind::Heating | ThermalKind::Cooling => SourceKind::HeatingCooling,
        };
        let slot = thermal_totals
            .entry(kind)
            .or_insert((0.0, entry.kind.methodology()));
        slot.0 += result.co2e_kg;
    }
    for (kind, (co2e_kg, methodology)) in thermal_totals {
        scope2.add(kind, SourceResult::from_co2e(co2e_kg, methodology, gwp_version));
    }

    Ok((scope2, dual))
}

/// Runs a full calculation over the supplied activity data.
///
/// # Errors
///
/// Propagates the typed error of any directly-supplied single input that
/// fails validation or lookup. Batch-row problems never fail the run;
/// they are reported in the result's `skipped` list.
pub fn run_calculation(input: &CalculationInput) -> CalcResult<CalculationRun> {
    let gwp_version = input.gwp_version;
    let mut skipped = Vec::new();

    let scope1 = run_scope1(&input.scope1, &input.parameters, gwp_version, &mut skipped)?;
    let (scope2, scope2_dual) = run_scope2(&input.scope2, &input.parameters, gwp_version)?;

    let scope3 = match &input.scope3 {
        Some(scope3_input) if !scope3_input.is_empty() => {
            let result = scope3::total_scope3(scope3_input);
            if let Some(cat) = &result.category3 {
                collect_skips(&mut skipped, "scope3/category3", &cat.skipped);
            }
            if let Some(cat) = &result.category4 {
                collect_skips(&mut skipped, "scope3/category4", &cat.skipped);
            }
            if let Some(cat) = &result.category9 {
                collect_skips(&mut skipped, "scope3/category9", &cat.skipped);
            }
            if let Some(cat) = &result.category10 {
                collect_skips(&mut skipped, "scope3/category10", &cat.skipped);
            }
            if let Some(cat) = &result.category11 {
                collect_skips(&mut skipped, "scope3/category11", &cat.skipped);
            }
            Some(result)
        }
        _ => None,
    };

    let scope1_tonnes = scope1.co2e_tonnes;
    let scope2_tonnes = scope2.co2e_tonnes;
    let scope3_tonnes = scope3.as_ref().map_or(0.0, |s| s.total_co2e_tonnes);

    Ok(CalculationRun {
        totals: ScopeTotals {
            scope1_tonnes,
            scope2_tonnes,
            scope3_tonnes,
            total_tonnes: scope1_tonnes + scope2_tonnes + scope3_tonnes,
        },
        scope1,
        scope2,
        scope2_dual,
        scope3,
        skipped,
        gwp_version,
        calculated_at: input.calculated_at.clone(),
    })
}
