//! Categories 4 and 9 — transportation and distribution.
//!
//! Tonne-kilometres × per-mode freight factors. The two categories share
//! the arithmetic; only the direction (inbound vs outbound) differs.

use carbonscope_core::emissions::SkippedEntry;
use carbonscope_core::factors::products;
use serde::{Deserialize, Serialize};

/// One freight movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportLeg {
    pub mode: String,
    pub tonnes: f64,
    pub distance_km: f64,
}

/// Per-leg line of a transport result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportLine {
    pub mode: String,
    pub tonnes: f64,
    pub distance_km: f64,
    pub tonne_km: f64,
    /// kg CO2e per tonne-km.
    pub factor: f64,
    pub co2e_kg: f64,
}

/// Category 4 or 9 result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransportResult {
    pub category: u8,
    pub category_name: &'static str,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    pub breakdown: Vec<TransportLine>,
    pub skipped: Vec<SkippedEntry>,
    pub methodology: &'static str,
}

fn transport(
    legs: &[TransportLeg],
    category: u8,
    category_name: &'static str,
    methodology: &'static str,
) -> TransportResult {
    let mut co2e_kg = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, leg) in legs.iter().enumerate() {
        if leg.tonnes < 0.0 || leg.distance_km < 0.0 {
            log::warn!("skipping transport leg {index} ({}): negative input", leg.mode);
            skipped.push(SkippedEntry::new(
                index,
                &leg.mode,
                "tonnes and distance must be non-negative",
            ));
            continue;
        }
        match products::transport_factor(&leg.mode) {
            Some(factor) => {
                let tonne_km = leg.tonnes * leg.distance_km;
                let line_kg = tonne_km * factor;
                co2e_kg += line_kg;
                breakdown.push(TransportLine {
                    mode: leg.mode.clone(),
                    tonnes: leg.tonnes,
                    distance_km: leg.distance_km,
                    tonne_km,
                    factor,
                    co2e_kg: line_kg,
                });
            }
            None => {
                log::warn!("skipping unknown transport mode '{}'", leg.mode);
                skipped.push(SkippedEntry::new(index, &leg.mode, "unknown transport mode"));
            }
        }
    }

    TransportResult {
        category,
        category_name,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        skipped,
        methodology,
    }
}

/// Category 4: upstream (inbound) transportation and distribution.
pub fn category4(legs: &[TransportLeg]) -> TransportResult {
    transport(
        legs,
        4,
        "Upstream Transportation and Distribution",
        "GHG Protocol Scope 3 Category 4",
    )
}

/// Category 9: downstream (outbound) transportation and distribution.
pub fn category9(legs: &[TransportLeg]) -> TransportResult {
    transport(
        legs,
        9,
        "Downstream Transportation and Distribution",
        "GHG Protocol Scope 3 Category 9",
    )
}
