//! Flare gas combustion (40 CFR § 98.253).
//!
//! Two methods are provided:
//!
//! - **Default method** (Equation Y-2): for flare gas of unknown
//!   composition. CO2 scales with flared energy; CH4 is back-calculated
//!   from the carbon that escaped combustion.
//! - **Composition method** (Equation Y-1): for metered gas composition.
//!   Each carbon-bearing species contributes CO2 in proportion to its
//!   mole fraction, molecular weight, and carbon number; inert species
//!   (CO2, N2) contribute nothing.
//!
//! Both validate the combustion efficiency and volume up front and fail
//! loudly; flaring is a single metered stream, so there is no row to
//! skip.

use crate::parameters::FlaringParameters;
use carbonscope_core::emissions::{require_fraction, require_non_negative, EmissionsVector, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::flare::FlareGasEntry;
use carbonscope_core::gwp::GwpVersion;
use carbonscope_core::units::{convert, UnitCategory};
use is_close::is_close;
use serde::Serialize;

const METHODOLOGY_DEFAULT: &str = "40 CFR § 98.253 (Default Method - Equation Y-2)";
const METHODOLOGY_COMPOSITION: &str = "40 CFR § 98.253 (Composition Method - Equation Y-1)";

const CARBON_IN_CO2: f64 = 12.0 / 44.0;
const CO2_FROM_CARBON: f64 = 44.0 / 12.0;
const CH4_FROM_CARBON: f64 = 16.0 / 12.0;

/// Result of the default (unknown composition) method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaringResult {
    pub volume_mmscf: f64,
    pub hhv_mmbtu_per_mmscf: f64,
    pub combustion_efficiency: f64,
    pub total_energy_mmbtu: f64,
    pub summary: SourceResult,
}

/// Flaring default method.
///
/// `CO2 = V × HHV × EF × CE`, with methane derived from the carbon
/// fraction that escaped combustion and a small fixed N2O term.
///
/// # Errors
///
/// `InvalidInput` for a negative volume or an efficiency outside `[0, 1]`.
pub fn flaring_default(
    volume_mmscf: f64,
    params: &FlaringParameters,
    gwp_version: GwpVersion,
) -> CalcResult<FlaringResult> {
    require_non_negative(volume_mmscf, "flare gas volume")?;
    require_fraction(params.combustion_efficiency, "combustion efficiency")?;

    let efficiency = params.combustion_efficiency;
    let total_energy_mmbtu = volume_mmscf * params.hhv_mmbtu_per_mmscf;

    let co2_kg = total_energy_mmbtu * params.co2_kg_per_mmbtu * efficiency;
    let ch4_kg = ch4_from_uncombusted_carbon(co2_kg, efficiency, params);
    let n2o_kg = total_energy_mmbtu * params.n2o_kg_per_mmbtu;

    Ok(FlaringResult {
        volume_mmscf,
        hhv_mmbtu_per_mmscf: params.hhv_mmbtu_per_mmscf,
        combustion_efficiency: efficiency,
        total_energy_mmbtu,
        summary: SourceResult::from_vector(
            EmissionsVector::new(co2_kg, ch4_kg, n2o_kg),
            METHODOLOGY_DEFAULT,
            gwp_version,
        ),
    })
}

/// Per-species line of a composition-method result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlareComponentLine {
    pub name: String,
    pub mole_fraction: f64,
    pub component_volume_scf: f64,
    pub co2_kg: f64,
}

/// Result of the gas-composition method.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlaringCompositionResult {
    pub volume_scf: f64,
    pub combustion_efficiency: f64,
    pub components: Vec<FlareComponentLine>,
    pub mole_fraction_sum: f64,
    /// Set when the mole fractions missed 1.0 by more than the tolerance.
    pub mole_fraction_warning: bool,
    pub summary: SourceResult,
}

/// Flaring composition method.
///
/// For each species p: `CO2_p = CE × 0.001 × V × x_p × (MW_p / MVC) × C_p × 44/12`.
///
/// A mole-fraction sum off 1.0 by more than the configured tolerance is
/// logged and flagged on the result, not fatal; compositions from lab
/// reports routinely omit trace species.
pub fn flaring_with_composition(
    volume_scf: f64,
    composition: &[FlareGasEntry],
    params: &FlaringParameters,
    gwp_version: GwpVersion,
) -> CalcResult<FlaringCompositionResult> {
    require_non_negative(volume_scf, "flare gas volume")?;
    require_fraction(params.combustion_efficiency, "combustion efficiency")?;
    for entry in composition {
        require_fraction(entry.mole_fraction, "mole fraction")?;
    }

    let efficiency = params.combustion_efficiency;
    let mvc = params.molar_volume_scf_per_kg_mole;

    let mole_fraction_sum: f64 = composition.iter().map(|c| c.mole_fraction).sum();
    let mole_fraction_warning = !is_close!(
        mole_fraction_sum,
        1.0,
        abs_tol = params.mole_fraction_tolerance
    );
    if mole_fraction_warning {
        log::warn!("flare gas composition mole fractions sum to {mole_fraction_sum}, not 1.0");
    }

    let mut co2_kg = 0.0;
    let mut components = Vec::with_capacity(composition.len());

    for entry in composition {
        if entry.carbon_atoms == 0 {
            components.push(FlareComponentLine {
                name: entry.name.clone(),
                mole_fraction: entry.mole_fraction,
                component_volume_scf: volume_scf * entry.mole_fraction,
                co2_kg: 0.0,
            });
            continue;
        }

        let component_volume_scf = volume_scf * entry.mole_fraction;
        let component_co2 = efficiency
            * 0.001
            * component_volume_scf
            * (entry.molecular_weight / mvc)
            * entry.carbon_atoms as f64
            * CO2_FROM_CARBON;

        co2_kg += component_co2;
        components.push(FlareComponentLine {
            name: entry.name.clone(),
            mole_fraction: entry.mole_fraction,
            component_volume_scf,
            co2_kg: component_co2,
        });
    }

    let ch4_kg = ch4_from_uncombusted_carbon(co2_kg, efficiency, params);

    Ok(FlaringCompositionResult {
        volume_scf,
        combustion_efficiency: efficiency,
        components,
        mole_fraction_sum,
        mole_fraction_warning,
        summary: SourceResult::from_vector(
            EmissionsVector::new(co2_kg, ch4_kg, 0.0),
            METHODOLOGY_COMPOSITION,
            gwp_version,
        ),
    })
}

/// Methane from incomplete combustion.
///
/// The CO2 figure reflects only the combusted fraction, so the carbon it
/// contains is scaled back up by the efficiency before taking the
/// uncombusted share.
fn ch4_from_uncombusted_carbon(co2_kg: f64, efficiency: f64, params: &FlaringParameters) -> f64 {
    if efficiency == 0.0 {
        // Nothing combusted: the method has no CO2 to infer carbon from.
        return 0.0;
    }
    let carbon_in_co2_kg = co2_kg * CARBON_IN_CO2;
    let uncombusted_carbon_kg = carbon_in_co2_kg / efficiency * (1.0 - efficiency);
    uncombusted_carbon_kg * params.ch4_fraction_of_uncombusted_carbon * CH4_FROM_CARBON
}

/// Converts a flare gas volume between scf, mcf, MMscf, and m3.
pub fn convert_flare_volume(volume: f64, from: &str, to: &str) -> CalcResult<f64> {
    convert(volume, from, to, UnitCategory::Volume)
}
