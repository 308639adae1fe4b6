//! Global Warming Potential tables and CO2-equivalent aggregation.
//!
//! GWP multipliers convert a mass of greenhouse gas into the mass of CO2
//! with the same warming effect over a 100-year horizon. Three IPCC
//! assessment-report vintages are supported (AR4, AR5, AR6); AR5 is the
//! reporting default and AR4 is retained for legacy inventories only.
//!
//! # Gas keys
//!
//! Gas identifiers are normalized before lookup, so `"methane"`, `"ch4"`
//! and `"CH4"` all resolve to fossil methane. Biogenic methane must be
//! requested explicitly (`"CH4_biogenic"` / `"CH4_non_fossil"`).
//!
//! # Example
//!
//! ```
//! use carbonscope_core::gwp::{aggregate_to_co2e, Gas, GwpVersion};
//!
//! let total = aggregate_to_co2e(
//!     &[(Gas::Co2, 1000.0), (Gas::Ch4Fossil, 10.0)],
//!     GwpVersion::Ar5,
//! )
//! .unwrap();
//! // 1000 + 10 * 30 = 1300 kg CO2e
//! assert!((total.co2e_kg - 1300.0).abs() < 1e-9);
//! ```

use crate::errors::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// IPCC assessment-report vintage selecting a GWP table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GwpVersion {
    #[serde(rename = "AR4")]
    Ar4,
    #[serde(rename = "AR5")]
    Ar5,
    #[serde(rename = "AR6")]
    Ar6,
}

impl GwpVersion {
    pub const ALL: [GwpVersion; 3] = [GwpVersion::Ar4, GwpVersion::Ar5, GwpVersion::Ar6];

    pub fn as_str(&self) -> &'static str {
        match self {
            GwpVersion::Ar4 => "AR4",
            GwpVersion::Ar5 => "AR5",
            GwpVersion::Ar6 => "AR6",
        }
    }

    /// Citation for the underlying assessment report.
    pub fn source(&self) -> &'static str {
        match self {
            GwpVersion::Ar4 => "IPCC Fourth Assessment Report (2007)",
            GwpVersion::Ar5 => "IPCC Fifth Assessment Report (2013)",
            GwpVersion::Ar6 => "IPCC Sixth Assessment Report (2021)",
        }
    }

    /// Time horizon of the multipliers, in years.
    pub fn time_horizon_years(&self) -> u32 {
        100
    }

    /// AR4 is superseded and kept only for comparing against old filings.
    pub fn is_deprecated(&self) -> bool {
        matches!(self, GwpVersion::Ar4)
    }

    pub fn is_default(&self) -> bool {
        matches!(self, GwpVersion::Ar5)
    }
}

impl Default for GwpVersion {
    fn default() -> Self {
        GwpVersion::Ar5
    }
}

impl fmt::Display for GwpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GwpVersion {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "AR4" => Ok(GwpVersion::Ar4),
            "AR5" => Ok(GwpVersion::Ar5),
            "AR6" => Ok(GwpVersion::Ar6),
            _ => Err(CalcError::UnknownGwpVersion(s.to_string())),
        }
    }
}

/// Greenhouse gases with registered multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gas {
    #[serde(rename = "CO2")]
    Co2,
    #[serde(rename = "CH4_fossil")]
    Ch4Fossil,
    #[serde(rename = "CH4_non_fossil")]
    Ch4NonFossil,
    #[serde(rename = "N2O")]
    N2o,
    #[serde(rename = "SF6")]
    Sf6,
    #[serde(rename = "NF3")]
    Nf3,
    #[serde(rename = "HFC_23")]
    Hfc23,
    #[serde(rename = "HFC_32")]
    Hfc32,
    #[serde(rename = "HFC_134a")]
    Hfc134a,
    #[serde(rename = "PFC_14")]
    Pfc14,
}

impl Gas {
    pub const ALL: [Gas; 10] = [
        Gas::Co2,
        Gas::Ch4Fossil,
        Gas::Ch4NonFossil,
        Gas::N2o,
        Gas::Sf6,
        Gas::Nf3,
        Gas::Hfc23,
        Gas::Hfc32,
        Gas::Hfc134a,
        Gas::Pfc14,
    ];

    /// Canonical table key, matching reporting-framework conventions.
    pub fn key(&self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Ch4Fossil => "CH4_fossil",
            Gas::Ch4NonFossil => "CH4_non_fossil",
            Gas::N2o => "N2O",
            Gas::Sf6 => "SF6",
            Gas::Nf3 => "NF3",
            Gas::Hfc23 => "HFC_23",
            Gas::Hfc32 => "HFC_32",
            Gas::Hfc134a => "HFC_134a",
            Gas::Pfc14 => "PFC_14",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gas::Co2 => "Carbon Dioxide (CO2)",
            Gas::Ch4Fossil => "Methane - Fossil (CH4)",
            Gas::Ch4NonFossil => "Methane - Biogenic (CH4)",
            Gas::N2o => "Nitrous Oxide (N2O)",
            Gas::Sf6 => "Sulfur Hexafluoride (SF6)",
            Gas::Nf3 => "Nitrogen Trifluoride (NF3)",
            Gas::Hfc23 => "HFC-23",
            Gas::Hfc32 => "HFC-32",
            Gas::Hfc134a => "HFC-134a",
            Gas::Pfc14 => "PFC-14 (CF4)",
        }
    }

    /// Resolves a user-facing gas identifier, normalizing common aliases.
    ///
    /// Bare methane identifiers resolve to fossil methane, which is the
    /// correct attribution for oil & gas operations.
    pub fn parse(s: &str) -> CalcResult<Self> {
        // Exact table keys first, then case-insensitive aliases.
        for gas in Gas::ALL {
            if gas.key() == s {
                return Ok(gas);
            }
        }
        match s.to_ascii_lowercase().as_str() {
            "co2" | "carbon dioxide" => Ok(Gas::Co2),
            "ch4" | "methane" | "ch4_fossil" => Ok(Gas::Ch4Fossil),
            "ch4_biogenic" | "ch4_non_fossil" | "biogenic methane" => Ok(Gas::Ch4NonFossil),
            "n2o" | "nitrous oxide" => Ok(Gas::N2o),
            "sf6" | "sulfur hexafluoride" => Ok(Gas::Sf6),
            "nf3" => Ok(Gas::Nf3),
            "hfc-23" | "hfc_23" | "hfc23" => Ok(Gas::Hfc23),
            "hfc-32" | "hfc_32" | "hfc32" => Ok(Gas::Hfc32),
            "hfc-134a" | "hfc_134a" | "hfc134a" => Ok(Gas::Hfc134a),
            "pfc-14" | "pfc_14" | "cf4" => Ok(Gas::Pfc14),
            _ => Err(CalcError::UnknownGasType(s.to_string())),
        }
    }
}

/// 100-year GWP multiplier for a gas under a given table version.
///
/// CO2 is exactly 1 in every version.
pub fn gwp(gas: Gas, version: GwpVersion) -> f64 {
    match version {
        GwpVersion::Ar4 => match gas {
            Gas::Co2 => 1.0,
            // AR4 does not distinguish fossil from biogenic methane.
            Gas::Ch4Fossil => 25.0,
            Gas::Ch4NonFossil => 25.0,
            Gas::N2o => 298.0,
            Gas::Sf6 => 22_800.0,
            Gas::Nf3 => 17_200.0,
            Gas::Hfc23 => 14_800.0,
            Gas::Hfc32 => 675.0,
            Gas::Hfc134a => 1_430.0,
            Gas::Pfc14 => 7_390.0,
        },
        GwpVersion::Ar5 => match gas {
            Gas::Co2 => 1.0,
            Gas::Ch4Fossil => 30.0,
            Gas::Ch4NonFossil => 28.0,
            Gas::N2o => 265.0,
            Gas::Sf6 => 23_500.0,
            Gas::Nf3 => 16_100.0,
            Gas::Hfc23 => 12_400.0,
            Gas::Hfc32 => 677.0,
            Gas::Hfc134a => 1_300.0,
            Gas::Pfc14 => 6_630.0,
        },
        GwpVersion::Ar6 => match gas {
            Gas::Co2 => 1.0,
            Gas::Ch4Fossil => 29.8,
            Gas::Ch4NonFossil => 27.0,
            Gas::N2o => 273.0,
            Gas::Sf6 => 25_200.0,
            Gas::Nf3 => 17_400.0,
            Gas::Hfc23 => 14_600.0,
            Gas::Hfc32 => 771.0,
            Gas::Hfc134a => 1_530.0,
            Gas::Pfc14 => 7_380.0,
        },
    }
}

/// String-keyed lookup for callers holding raw identifiers.
pub fn gwp_of(gas: &str, version: &str) -> CalcResult<f64> {
    let version = GwpVersion::from_str(version)?;
    let gas = Gas::parse(gas)?;
    Ok(gwp(gas, version))
}

/// CO2e contribution of a single gas amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasCo2e {
    pub gas: Gas,
    pub amount_kg: f64,
    pub gwp: f64,
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
}

/// Aggregated CO2e across a multi-gas emissions vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Co2eTotal {
    pub co2e_kg: f64,
    pub co2e_tonnes: f64,
    /// Per-gas contributions, in input order. Zero amounts are omitted.
    pub breakdown: Vec<GasCo2e>,
    pub gwp_version: GwpVersion,
    pub source: &'static str,
    pub time_horizon_years: u32,
}

/// Converts one gas amount to CO2e.
///
/// Fails with `InvalidInput` on negative amounts; a negative gas mass is
/// never meaningful and must not be folded into a total.
pub fn convert_to_co2e(amount_kg: f64, gas: Gas, version: GwpVersion) -> CalcResult<GasCo2e> {
    if amount_kg < 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "gas amount must be non-negative, got {amount_kg} kg for {}",
            gas.key()
        )));
    }
    let multiplier = gwp(gas, version);
    let co2e_kg = amount_kg * multiplier;
    Ok(GasCo2e {
        gas,
        amount_kg,
        gwp: multiplier,
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
    })
}

/// Aggregates a multi-gas vector into a single CO2e total.
///
/// Zero amounts are skipped rather than treated as errors; they carry no
/// information and would only pad the breakdown.
pub fn aggregate_to_co2e(amounts: &[(Gas, f64)], version: GwpVersion) -> CalcResult<Co2eTotal> {
    let mut breakdown = Vec::new();
    let mut co2e_kg = 0.0;

    for &(gas, amount_kg) in amounts {
        if amount_kg == 0.0 {
            continue;
        }
        let entry = convert_to_co2e(amount_kg, gas, version)?;
        co2e_kg += entry.co2e_kg;
        breakdown.push(entry);
    }

    Ok(Co2eTotal {
        co2e_kg,
        co2e_tonnes: co2e_kg / 1000.0,
        breakdown,
        gwp_version: version,
        source: version.source(),
        time_horizon_years: version.time_horizon_years(),
    })
}

/// AR5-vs-AR6 comparison for the same emissions vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionComparison {
    pub ar5: Co2eTotal,
    pub ar6: Co2eTotal,
    pub difference_tonnes: f64,
    pub difference_percent: f64,
}

/// Runs the same vector through AR5 and AR6 and reports the shift.
///
/// Useful when migrating an inventory between reporting vintages.
pub fn compare_versions(amounts: &[(Gas, f64)]) -> CalcResult<VersionComparison> {
    let ar5 = aggregate_to_co2e(amounts, GwpVersion::Ar5)?;
    let ar6 = aggregate_to_co2e(amounts, GwpVersion::Ar6)?;

    let difference_kg = ar6.co2e_kg - ar5.co2e_kg;
    let difference_percent = if ar5.co2e_kg > 0.0 {
        difference_kg / ar5.co2e_kg * 100.0
    } else {
        0.0
    };

    Ok(VersionComparison {
        ar5,
        ar6,
        difference_tonnes: difference_kg / 1000.0,
        difference_percent,
    })
}

/// One row of a displayed GWP table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GwpTableRow {
    pub gas: Gas,
    pub key: &'static str,
    pub label: &'static str,
    pub gwp: f64,
}

/// Full table listing for a version, sorted by descending multiplier.
pub fn table(version: GwpVersion) -> Vec<GwpTableRow> {
    let mut rows: Vec<GwpTableRow> = Gas::ALL
        .iter()
        .map(|&gas| GwpTableRow {
            gas,
            key: gas.key(),
            label: gas.label(),
            gwp: gwp(gas, version),
        })
        .collect();
    rows.sort_by(|a, b| b.gwp.total_cmp(&a.gwp));
    rows
}
