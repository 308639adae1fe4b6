//! Grid electricity intensity factors by region and subregion.
//!
//! Entries keep their native units (eGRID subregions publish lb CO2/MWh,
//! national inventories use kg CO2e/kWh or t CO2e/MWh) and normalize on
//! read, so the table can be transcribed from its sources verbatim.
//!
//! Lookup falls back from subregion to the regional default; only a miss
//! on the region itself is an error.

use crate::errors::{CalcError, CalcResult};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

const LB_TO_KG: f64 = 0.45359237;

/// Native unit a grid factor was published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GridFactorUnit {
    #[serde(rename = "kgCO2e/kWh")]
    KgCo2ePerKwh,
    #[serde(rename = "tCO2e/MWh")]
    TCo2ePerMwh,
    #[serde(rename = "lbCO2/MWh")]
    LbCo2PerMwh,
}

/// A published grid intensity factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridFactor {
    pub name: &'static str,
    pub factor: f64,
    pub unit: GridFactorUnit,
    pub source: &'static str,
    pub year: u16,
}

impl GridFactor {
    /// Normalizes the published value to kg CO2e per kWh.
    ///
    /// t CO2e/MWh is numerically equal to kg CO2e/kWh.
    pub fn kg_per_kwh(&self) -> f64 {
        match self.unit {
            GridFactorUnit::KgCo2ePerKwh => self.factor,
            GridFactorUnit::TCo2ePerMwh => self.factor,
            GridFactorUnit::LbCo2PerMwh => self.factor * LB_TO_KG / 1000.0,
        }
    }
}

struct RegionEntry {
    national: GridFactor,
    subregions: &'static [(&'static str, GridFactor)],
}

macro_rules! factor {
    ($name:literal, $value:expr, $unit:ident, $source:literal, $year:literal) => {
        GridFactor {
            name: $name,
            factor: $value,
            unit: GridFactorUnit::$unit,
            source: $source,
            year: $year,
        }
    };
}

static GRID_FACTORS: LazyLock<HashMap<&'static str, RegionEntry>> = LazyLock::new(|| {
    HashMap::from([
        (
            "US",
            RegionEntry {
                national: factor!("United States", 0.373, KgCo2ePerKwh, "EPA eGRID", 2024),
                subregions: &[
                    ("ERCT", factor!("ERCOT (Texas)", 820.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("CAMX", factor!("California", 456.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("NWPP", factor!("Northwest", 602.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("RFCW", factor!("RFC West", 1013.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("NYUP", factor!("Upstate NY", 249.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("FRCC", factor!("Florida", 835.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                    ("MROW", factor!("Midwest West", 935.0, LbCo2PerMwh, "EPA eGRID", 2024)),
                ],
            },
        ),
        (
            "CA",
            RegionEntry {
                national: factor!("Canada", 0.13, KgCo2ePerKwh, "ECCC NIR", 2023),
                subregions: &[
                    ("AB", factor!("Alberta", 0.54, KgCo2ePerKwh, "ECCC NIR", 2023)),
                    ("QC", factor!("Quebec", 0.0017, KgCo2ePerKwh, "ECCC NIR", 2023)),
                    ("ON", factor!("Ontario", 0.025, KgCo2ePerKwh, "ECCC NIR", 2023)),
                    ("BC", factor!("British Columbia", 0.014, KgCo2ePerKwh, "ECCC NIR", 2023)),
                ],
            },
        ),
        (
            "GB",
            RegionEntry {
                national: factor!("United Kingdom", 0.207, KgCo2ePerKwh, "UK DESNZ", 2024),
                subregions: &[],
            },
        ),
        (
            "DE",
            RegionEntry {
                national: factor!("Germany", 0.380, KgCo2ePerKwh, "UBA", 2023),
                subregions: &[],
            },
        ),
        (
            "FR",
            RegionEntry {
                national: factor!("France", 0.052, KgCo2ePerKwh, "ADEME", 2023),
                subregions: &[],
            },
        ),
        (
            "NO",
            RegionEntry {
                national: factor!("Norway", 0.008, KgCo2ePerKwh, "NVE", 2023),
                subregions: &[],
            },
        ),
        (
            "AU",
            RegionEntry {
                national: factor!("Australia", 0.68, TCo2ePerMwh, "AU NGA Factors", 2023),
                subregions: &[],
            },
        ),
        (
            "CN",
            RegionEntry {
                national: factor!("China", 0.555, KgCo2ePerKwh, "MEE", 2023),
                subregions: &[],
            },
        ),
        (
            "IN",
            RegionEntry {
                national: factor!("India", 0.713, KgCo2ePerKwh, "CEA", 2023),
                subregions: &[],
            },
        ),
        (
            "JP",
            RegionEntry {
                national: factor!("Japan", 0.457, KgCo2ePerKwh, "METI", 2023),
                subregions: &[],
            },
        ),
        (
            "SA",
            RegionEntry {
                national: factor!("Saudi Arabia", 0.614, KgCo2ePerKwh, "IEA", 2023),
                subregions: &[],
            },
        ),
        (
            "AE",
            RegionEntry {
                national: factor!("United Arab Emirates", 0.49, KgCo2ePerKwh, "IEA", 2023),
                subregions: &[],
            },
        ),
        (
            "QA",
            RegionEntry {
                national: factor!("Qatar", 0.49, KgCo2ePerKwh, "IEA", 2023),
                subregions: &[],
            },
        ),
        (
            "SG",
            RegionEntry {
                national: factor!("Singapore", 0.408, KgCo2ePerKwh, "EMA", 2023),
                subregions: &[],
            },
        ),
        (
            "BR",
            RegionEntry {
                national: factor!("Brazil", 0.074, KgCo2ePerKwh, "MCTI", 2023),
                subregions: &[],
            },
        ),
        (
            "MX",
            RegionEntry {
                national: factor!("Mexico", 0.423, KgCo2ePerKwh, "CRE", 2023),
                subregions: &[],
            },
        ),
        (
            "ZA",
            RegionEntry {
                national: factor!("South Africa", 0.95, KgCo2ePerKwh, "Eskom", 2023),
                subregions: &[],
            },
        ),
    ])
});

/// Resolves the grid factor for a region, preferring the subregion entry
/// when one is registered and falling back to the regional default.
pub fn lookup(region: &str, subregion: Option<&str>) -> CalcResult<GridFactor> {
    let entry = GRID_FACTORS
        .get(region)
        .ok_or_else(|| CalcError::GridFactorNotFound {
            region: region.to_string(),
            subregion: subregion.map(str::to_string),
        })?;

    if let Some(sub) = subregion {
        if let Some((_, factor)) = entry.subregions.iter().find(|(code, _)| *code == sub) {
            return Ok(*factor);
        }
    }

    Ok(entry.national)
}

/// Region summary for display layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub subregions: Vec<&'static str>,
}

/// All registered regions, sorted by code.
pub fn regions() -> Vec<RegionInfo> {
    let mut list: Vec<RegionInfo> = GRID_FACTORS
        .iter()
        .map(|(&code, entry)| RegionInfo {
            code,
            name: entry.national.name,
            subregions: entry.subregions.iter().map(|(sub, _)| *sub).collect(),
        })
        .collect();
    list.sort_by_key(|r| r.code);
    list
}

/// Checks that every entry normalizes to a positive kg/kWh factor.
pub fn validate() -> CalcResult<()> {
    for (code, entry) in GRID_FACTORS.iter() {
        if entry.national.kg_per_kwh() <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "grid factor for '{code}' must normalize to a positive value"
            )));
        }
        for (sub, factor) in entry.subregions {
            if factor.kg_per_kwh() <= 0.0 {
                return Err(CalcError::InvalidInput(format!(
                    "grid factor for '{code}/{sub}' must normalize to a positive value"
                )));
            }
        }
    }
    Ok(())
}
