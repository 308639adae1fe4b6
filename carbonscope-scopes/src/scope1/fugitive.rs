//! Fugitive emissions from equipment leaks and pneumatic devices.
//!
//! Three estimation methods, in decreasing order of fidelity:
//!
//! - **Component count**: per-component THC leak rates (service-specific)
//!   scaled to a year, then reduced to methane by the service's
//!   methane-in-THC fraction.
//! - **Pneumatic devices**: per-device-class annual whole-gas rates from
//!   Subpart W, reduced by methane content.
//! - **Average factor**: a single kg CH4/BOE factor per facility type for
//!   screening estimates when no equipment survey exists.

use crate::parameters::VentingParameters;
use carbonscope_core::emissions::{require_non_negative, EmissionsVector, SkippedEntry, SourceResult};
use carbonscope_core::errors::CalcResult;
use carbonscope_core::factors::leaks::{
    self, ServiceType, HOURS_PER_YEAR, LB_TO_KG, PNEUMATIC_DEVICES,
};
use carbonscope_core::gwp::GwpVersion;
use serde::{Deserialize, Serialize};

const METHODOLOGY_COMPONENT: &str =
    "EPA Protocol for Equipment Leak Estimates - Component Count Method";
const METHODOLOGY_AVERAGE: &str = "Industry Average Emission Factors";
const METHODOLOGY_PNEUMATIC: &str = "40 CFR Part 98 Subpart W - Pneumatic Device Emissions";

/// One surveyed component population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCount {
    pub component_type: String,
    pub count: u32,
}

/// Per-component-type line of a component-count result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentLine {
    pub component_type: String,
    pub count: u32,
    /// lb THC per hour per component.
    pub factor_lb_per_hour: f64,
    pub thc_lb_per_hour: f64,
    pub thc_lb_per_year: f64,
}

/// Component-count method result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentCountResult {
    pub service_type: ServiceType,
    pub thc_lb_per_hour: f64,
    pub thc_lb_per_year: f64,
    pub ch4_lb_per_year: f64,
    pub ch4_kg: f64,
    pub ch4_tonnes: f64,
    pub methane_fraction_of_thc: f64,
    pub breakdown: Vec<ComponentLine>,
    pub skipped: Vec<SkippedEntry>,
    pub summary: SourceResult,
}

/// Component-count method.
///
/// Unknown component types are skipped with a warning; zero counts are
/// ignored. The batch never fails.
pub fn component_count_method(
    components: &[ComponentCount],
    service_type: ServiceType,
    gwp_version: GwpVersion,
) -> ComponentCountResult {
    let mut thc_lb_per_hour = 0.0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();

    for (index, component) in components.iter().enumerate() {
        if component.count == 0 {
            continue;
        }
        match leaks::component_factor(service_type, &component.component_type) {
            Some(factor) => {
                let hourly = component.count as f64 * factor.lb_per_hour;
                thc_lb_per_hour += hourly;
                breakdown.push(ComponentLine {
                    component_type: component.component_type.clone(),
                    count: component.count,
                    factor_lb_per_hour: factor.lb_per_hour,
                    thc_lb_per_hour: hourly,
                    thc_lb_per_year: hourly * HOURS_PER_YEAR,
                });
            }
            None => {
                log::warn!(
                    "skipping unknown component type '{}' ({})",
                    component.component_type,
                    service_type.as_str()
                );
                skipped.push(SkippedEntry::new(
                    index,
                    &component.component_type,
                    format!(
                        "unknown component type for {} service",
                        service_type.as_str()
                    ),
                ));
            }
        }
    }

    let thc_lb_per_year = thc_lb_per_hour * HOURS_PER_YEAR;
    let methane_fraction = service_type.methane_fraction_of_thc();
    let ch4_lb_per_year = thc_lb_per_year * methane_fraction;
    let ch4_kg = ch4_lb_per_year * LB_TO_KG;

    ComponentCountResult {
        service_type,
        thc_lb_per_hour,
        thc_lb_per_year,
        ch4_lb_per_year,
        ch4_kg,
        ch4_tonnes: ch4_kg / 1000.0,
        methane_fraction_of_thc: methane_fraction,
        breakdown,
        skipped,
        summary: SourceResult::from_vector(
            EmissionsVector::new(0.0, ch4_kg, 0.0),
            METHODOLOGY_COMPONENT,
            gwp_version,
        ),
    }
}

/// Average-factor method result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMethodResult {
    pub facility_type: String,
    pub production_boe: f64,
    /// kg CH4 per BOE.
    pub emission_factor: f64,
    pub ch4_kg: f64,
    pub ch4_tonnes: f64,
    pub summary: SourceResult,
}

/// Average-factor method: production × per-facility-type factor.
///
/// # Errors
///
/// `UnknownFacilityType` when no factor is registered, `InvalidInput` for
/// negative production.
pub fn average_method(
    facility_type: &str,
    production_boe: f64,
    gwp_version: GwpVersion,
) -> CalcResult<AverageMethodResult> {
    require_non_negative(production_boe, "production")?;
    let factor = leaks::average_factor(facility_type)?;
    let ch4_kg = production_boe * factor;

    Ok(AverageMethodResult {
        facility_type: facility_type.to_string(),
        production_boe,
        emission_factor: factor,
        ch4_kg,
        ch4_tonnes: ch4_kg / 1000.0,
        summary: SourceResult::from_vector(
            EmissionsVector::new(0.0, ch4_kg, 0.0),
            METHODOLOGY_AVERAGE,
            gwp_version,
        ),
    })
}

/// Counts of each pneumatic device class in service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCounts {
    pub high_bleed_continuous: u32,
    pub low_bleed_continuous: u32,
    pub intermittent_bleed: u32,
    pub diaphragm_pump: u32,
    pub piston_pump: u32,
}

impl DeviceCounts {
    fn count_for(&self, name: &str) -> u32 {
        match name {
            "highBleedContinuous" => self.high_bleed_continuous,
            "lowBleedContinuous" => self.low_bleed_continuous,
            "intermittentBleed" => self.intermittent_bleed,
            "diaphragmPump" => self.diaphragm_pump,
            "pistonPump" => self.piston_pump,
            _ => 0,
        }
    }
}

/// Per-device-class line of a pneumatic result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceLine {
    pub device: String,
    pub count: u32,
    pub emission_rate_scfh: f64,
    pub annual_emissions_mcf: f64,
}

/// Pneumatic-device method result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PneumaticResult {
    pub total_gas_mcf_per_year: f64,
    pub total_gas_scf_per_year: f64,
    pub ch4_scf_per_year: f64,
    pub ch4_kg: f64,
    pub ch4_tonnes: f64,
    pub methane_content: f64,
    pub breakdown: Vec<DeviceLine>,
    pub summary: SourceResult,
}

/// Pneumatic-device method: device counts × Subpart W annual rates.
pub fn pneumatic_devices(
    counts: &DeviceCounts,
    params: &VentingParameters,
    gwp_version: GwpVersion,
) -> PneumaticResult {
    let mut total_gas_mcf = 0.0;
    let mut breakdown = Vec::new();

    for device in PNEUMATIC_DEVICES {
        let count = counts.count_for(device.name);
        if count == 0 {
            continue;
        }
        let annual_mcf = count as f64 * device.annual_mcf;
        total_gas_mcf += annual_mcf;
        breakdown.push(DeviceLine {
            device: device.name.to_string(),
            count,
            emission_rate_scfh: device.emission_rate_scfh,
            annual_emissions_mcf: annual_mcf,
        });
    }

    let total_gas_scf = total_gas_mcf * 1000.0;
    let ch4_scf = total_gas_scf * params.methane_content;
    let ch4_kg = ch4_scf * params.ch4_kg_per_scf;

    PneumaticResult {
        total_gas_mcf_per_year: total_gas_mcf,
        total_gas_scf_per_year: total_gas_scf,
        ch4_scf_per_year: ch4_scf,
        ch4_kg,
        ch4_tonnes: ch4_kg / 1000.0,
        methane_content: params.methane_content,
        breakdown,
        summary: SourceResult::from_vector(
            EmissionsVector::new(0.0, ch4_kg, 0.0),
            METHODOLOGY_PNEUMATIC,
            gwp_version,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbonscope_core::errors::CalcError;

    #[test]
    fn test_component_count_hand_check() {
        // 100 gas-service valves at 9.92e-3 lb/hr
        let result = component_count_method(
            &[ComponentCount {
                component_type: "valve".to_string(),
                count: 100,
            }],
            ServiceType::GasService,
            GwpVersion::Ar5,
        );

        let thc_hourly = 100.0 * 9.92e-3;
        assert!((result.thc_lb_per_hour - thc_hourly).abs() < 1e-12);
        assert!((result.thc_lb_per_year - thc_hourly * 8760.0).abs() < 1e-9);

        let ch4_kg = thc_hourly * 8760.0 * 0.83 * 0.45359237;
        assert!((result.ch4_kg - ch4_kg).abs() < 1e-9);
        assert!((result.summary.co2e_kg - ch4_kg * 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_component_count_unknown_type_skipped() {
        let result = component_count_method(
            &[
                ComponentCount {
                    component_type: "valve".to_string(),
                    count: 10,
                },
                ComponentCount {
                    component_type: "sprocket".to_string(),
                    count: 10,
                },
            ],
            ServiceType::GasService,
            GwpVersion::Ar5,
        );
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].label, "sprocket");
    }

    #[test]
    fn test_component_count_zero_counts_ignored() {
        let result = component_count_method(
            &[ComponentCount {
                component_type: "valve".to_string(),
                count: 0,
            }],
            ServiceType::GasService,
            GwpVersion::Ar5,
        );
        assert!(result.breakdown.is_empty());
        assert!(result.skipped.is_empty());
        assert_eq!(result.ch4_kg, 0.0);
    }

    #[test]
    fn test_service_type_changes_result() {
        let components = [ComponentCount {
            component_type: "valve".to_string(),
            count: 100,
        }];
        let gas = component_count_method(&components, ServiceType::GasService, GwpVersion::Ar5);
        let liquid =
            component_count_method(&components, ServiceType::LightLiquid, GwpVersion::Ar5);
        assert_ne!(gas.ch4_kg, liquid.ch4_kg);
    }

    #[test]
    fn test_average_method() {
        let result = average_method("production_onshore", 1_000_000.0, GwpVersion::Ar5).unwrap();
        // 1,000,000 BOE * 0.15 kg/BOE = 150,000 kg CH4
        assert!((result.ch4_kg - 150_000.0).abs() < 1e-6);
        assert!((result.ch4_tonnes - 150.0).abs() < 1e-9);
        assert!((result.summary.co2e_tonnes - 4500.0).abs() < 1e-6);
    }

    #[test]
    fn test_average_method_unknown_facility() {
        assert!(matches!(
            average_method("moonbase", 1000.0, GwpVersion::Ar5),
            Err(CalcError::UnknownFacilityType(_, _))
        ));
    }

    #[test]
    fn test_pneumatic_hand_check() {
        let counts = DeviceCounts {
            high_bleed_continuous: 10,
            ..DeviceCounts::default()
        };
        let result = pneumatic_devices(&counts, &VentingParameters::default(), GwpVersion::Ar5);

        // 10 * 326.7 mcf = 3267 mcf -> 3,267,000 scf
        assert!((result.total_gas_mcf_per_year - 3267.0).abs() < 1e-9);
        let ch4_kg = 3_267_000.0 * 0.86 * 0.0192;
        assert!((result.ch4_kg - ch4_kg).abs() < 1e-6);
    }

    #[test]
    fn test_pneumatic_no_devices_is_zero() {
        let result = pneumatic_devices(
            &DeviceCounts::default(),
            &VentingParameters::default(),
            GwpVersion::Ar5,
        );
        assert_eq!(result.ch4_kg, 0.0);
        assert!(result.breakdown.is_empty());
    }
}
