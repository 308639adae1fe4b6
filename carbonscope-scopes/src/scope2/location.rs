//! Location-based purchased electricity (GHG Protocol Scope 2).
//!
//! Consumption × the average grid factor where the electricity was
//! consumed. Factors resolve subregion first, then the regional default,
//! and are normalized to kg CO2e/kWh whatever their published unit.

use carbonscope_core::emissions::{require_non_negative, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::grid;
use carbonscope_core::gwp::GwpVersion;
use serde::Serialize;

const METHODOLOGY: &str = "GHG Protocol Location-Based Method";

/// Location-based Scope 2 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBasedResult {
    pub electricity_kwh: f64,
    pub electricity_mwh: f64,
    /// Normalized factor actually applied.
    pub grid_factor_kg_per_kwh: f64,
    pub region: String,
    pub subregion: Option<String>,
    pub factor_source: &'static str,
    pub factor_year: u16,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub summary: SourceResult,
}

/// Location-based method.
///
/// # Errors
///
/// `GridFactorNotFound` when the region is unregistered, `InvalidInput`
/// for negative consumption.
pub fn location_based(
    electricity_kwh: f64,
    region: &str,
    subregion: Option<&str>,
    gwp_version: GwpVersion,
) -> CalcResult<LocationBasedResult> {
    require_non_negative(electricity_kwh, "electricity consumption")?;
    let factor = grid::lookup(region, subregion)?;
    let kg_per_kwh = factor.kg_per_kwh();
    let co2e_kg = electricity_kwh * kg_per_kwh;

    Ok(LocationBasedResult {
        electricity_kwh,
        electricity_mwh: electricity_kwh / 1000.0,
        grid_factor_kg_per_kwh: kg_per_kwh,
        region: region.to_string(),
        subregion: subregion.map(str::to_string),
        factor_source: factor.source,
        factor_year: factor.year,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        summary: SourceResult::from_co2e(co2e_kg, METHODOLOGY, gwp_version),
    })
}
