//! Market-based purchased electricity and dual reporting.
//!
//! The market-based method models the GHG Protocol contractual carve-out
//! precisely: REC and PPA volumes are subtracted from gross consumption,
//! the residual grid share is charged at the residual (or market) factor,
//! and each contractual share is charged at its own factor, usually zero.
//! It is deliberately not `consumption × marketFactor`.

use super::location::{location_based, LocationBasedResult};
use carbonscope_core::emissions::{require_non_negative, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::gwp::GwpVersion;
use serde::{Deserialize, Serialize};

const METHODOLOGY: &str = "GHG Protocol Market-Based Method";
const METHODOLOGY_DUAL: &str = "GHG Protocol Scope 2 Dual Reporting";

/// Contractual instruments applied against gross consumption.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketOptions {
    /// Renewable Energy Certificates, MWh.
    pub rec_mwh: f64,
    /// Emission factor for the REC source, kg CO2e/kWh (usually 0).
    pub rec_factor: f64,
    /// Power Purchase Agreements, MWh.
    pub ppa_mwh: f64,
    /// Emission factor for the PPA source, kg CO2e/kWh.
    pub ppa_factor: f64,
    /// Residual mix factor for the uncovered share, kg CO2e/kWh.
    /// Falls back to the market factor when absent.
    pub residual_factor: Option<f64>,
}

/// Market-based Scope 2 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketBasedResult {
    pub electricity_kwh: f64,
    pub grid_kwh: f64,
    pub contractual_kwh: f64,
    pub rec_kwh: f64,
    pub ppa_kwh: f64,
    pub market_factor: f64,
    pub grid_emissions_kg: f64,
    pub rec_emissions_kg: f64,
    pub ppa_emissions_kg: f64,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub summary: SourceResult,
}

/// Market-based method with the contractual carve-out.
///
/// # Errors
///
/// `InvalidInput` for negative consumption, factors, or instrument
/// volumes.
pub fn market_based(
    electricity_kwh: f64,
    market_factor: f64,
    options: &MarketOptions,
    gwp_version: GwpVersion,
) -> CalcResult<MarketBasedResult> {
    require_non_negative(electricity_kwh, "electricity consumption")?;
    require_non_negative(market_factor, "market factor")?;
    require_non_negative(options.rec_mwh, "REC volume")?;
    require_non_negative(options.rec_factor, "REC factor")?;
    require_non_negative(options.ppa_mwh, "PPA volume")?;
    require_non_negative(options.ppa_factor, "PPA factor")?;

    let rec_kwh = options.rec_mwh * 1000.0;
    let ppa_kwh = options.ppa_mwh * 1000.0;
    let contractual_kwh = rec_kwh + ppa_kwh;

    // Instruments beyond gross consumption cannot push the grid share
    // negative.
    let grid_kwh = (electricity_kwh - contractual_kwh).max(0.0);

    let effective_grid_factor = options.residual_factor.unwrap_or(market_factor);
    let grid_emissions_kg = grid_kwh * effective_grid_factor;
    let rec_emissions_kg = rec_kwh * options.rec_factor;
    let ppa_emissions_kg = ppa_kwh * options.ppa_factor;
    let co2e_kg = grid_emissions_kg + rec_emissions_kg + ppa_emissions_kg;

    Ok(MarketBasedResult {
        electricity_kwh,
        grid_kwh,
        contractual_kwh,
        rec_kwh,
        ppa_kwh,
        market_factor,
        grid_emissions_kg,
        rec_emissions_kg,
        ppa_emissions_kg,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        summary: SourceResult::from_co2e(co2e_kg, METHODOLOGY, gwp_version),
    })
}

/// Both Scope 2 methods on the same consumption figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DualReportingResult {
    pub location: LocationBasedResult,
    pub market: MarketBasedResult,
    pub reduction_tonnes: f64,
    pub reduction_percent: f64,
    pub methodology: &'static str,
}

/// Dual reporting: runs both methods and reports the reduction the
/// market-based accounting achieves relative to location-based.
///
/// The market factor defaults to the location-based grid factor when the
/// caller has no supplier-specific figure.
pub fn dual_reporting(
    electricity_kwh: f64,
    region: &str,
    subregion: Option<&str>,
    market_factor: Option<f64>,
    options: &MarketOptions,
    gwp_version: GwpVersion,
) -> CalcResult<DualReportingResult> {
    let location = location_based(electricity_kwh, region, subregion, gwp_version)?;
    let factor = market_factor.unwrap_or(location.grid_factor_kg_per_kwh);
    let market = market_based(electricity_kwh, factor, options, gwp_version)?;

    let reduction_kg = location.co2e_kg - market.co2e_kg;
    let reduction_percent = if location.co2e_kg > 0.0 {
        reduction_kg / location.co2e_kg * 100.0
    } else {
        0.0
    };

    Ok(DualReportingResult {
        location,
        market,
        reduction_tonnes: reduction_kg / 1000.0,
        reduction_percent,
        methodology: METHODOLOGY_DUAL,
    })
}
