//! Equipment-leak and vented-gas reference factors.
//!
//! Component leak rates follow the EPA Protocol for Equipment Leak
//! Emission Estimates average-factor approach: a total-hydrocarbon rate
//! per component, per hour, specific to the service the component is in.
//! Methane is then taken as a service-specific fraction of THC.
//!
//! Pneumatic-device rates follow 40 CFR Part 98 Subpart W.

use crate::errors::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// Hours in a reporting year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Pounds to kilograms.
pub const LB_TO_KG: f64 = 0.45359237;

/// Methane density at standard conditions, kg per scf.
///
/// Commonly used EPA default; confirm provenance before a regulatory
/// filing (see the repository design notes).
pub const CH4_KG_PER_SCF: f64 = 0.0192;

/// Default methane content of produced natural gas, fraction.
pub const DEFAULT_METHANE_CONTENT: f64 = 0.86;

/// Service a leaking component is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ServiceType {
    GasService,
    LightLiquid,
    HeavyLiquid,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::GasService => "gasService",
            ServiceType::LightLiquid => "lightLiquid",
            ServiceType::HeavyLiquid => "heavyLiquid",
        }
    }

    /// Methane fraction of total hydrocarbons for this service.
    pub fn methane_fraction_of_thc(&self) -> f64 {
        match self {
            ServiceType::GasService => 0.83,
            ServiceType::LightLiquid | ServiceType::HeavyLiquid => 0.15,
        }
    }
}

/// THC leak rate for one component type in one service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComponentFactor {
    pub name: &'static str,
    pub description: &'static str,
    /// lb THC per hour per component.
    pub lb_per_hour: f64,
}

const GAS_SERVICE: &[ComponentFactor] = &[
    ComponentFactor { name: "valve", description: "Valves", lb_per_hour: 9.92e-3 },
    ComponentFactor { name: "pumpSeal", description: "Pump seals", lb_per_hour: 5.3e-3 },
    ComponentFactor { name: "connector", description: "Connectors", lb_per_hour: 4.4e-4 },
    ComponentFactor { name: "flange", description: "Flanges", lb_per_hour: 8.6e-4 },
    ComponentFactor { name: "openEndedLine", description: "Open-ended lines", lb_per_hour: 4.4e-3 },
    ComponentFactor { name: "compressorSeal", description: "Compressor seals", lb_per_hour: 1.94e-2 },
    ComponentFactor { name: "reliefValve", description: "Pressure relief valves", lb_per_hour: 1.94e-2 },
    ComponentFactor { name: "samplingConnection", description: "Sampling connections", lb_per_hour: 3.3e-2 },
];

const LIGHT_LIQUID: &[ComponentFactor] = &[
    ComponentFactor { name: "valve", description: "Valves", lb_per_hour: 5.5e-3 },
    ComponentFactor { name: "pumpSeal", description: "Pump seals", lb_per_hour: 2.87e-2 },
    ComponentFactor { name: "connector", description: "Connectors", lb_per_hour: 4.6e-4 },
    ComponentFactor { name: "flange", description: "Flanges", lb_per_hour: 2.4e-4 },
    ComponentFactor { name: "openEndedLine", description: "Open-ended lines", lb_per_hour: 3.1e-3 },
];

const HEAVY_LIQUID: &[ComponentFactor] = &[
    ComponentFactor { name: "valve", description: "Valves", lb_per_hour: 1.85e-5 },
    ComponentFactor { name: "pumpSeal", description: "Pump seals", lb_per_hour: 1.9e-4 },
    ComponentFactor { name: "connector", description: "Connectors", lb_per_hour: 1.65e-5 },
    ComponentFactor { name: "flange", description: "Flanges", lb_per_hour: 8.6e-7 },
];

/// Looks up the leak factor for a component in a service.
pub fn component_factor(service: ServiceType, component: &str) -> Option<&'static ComponentFactor> {
    let table = match service {
        ServiceType::GasService => GAS_SERVICE,
        ServiceType::LightLiquid => LIGHT_LIQUID,
        ServiceType::HeavyLiquid => HEAVY_LIQUID,
    };
    table.iter().find(|f| f.name == component)
}

/// Component types registered for a service, for display layers.
pub fn component_types(service: ServiceType) -> &'static [ComponentFactor] {
    match service {
        ServiceType::GasService => GAS_SERVICE,
        ServiceType::LightLiquid => LIGHT_LIQUID,
        ServiceType::HeavyLiquid => HEAVY_LIQUID,
    }
}

/// Facility-level average fugitive factors, kg CH4 per BOE produced.
///
/// Industry-study values for quick estimates when no component survey
/// exists.
const AVERAGE_FACTORS: &[(&str, f64)] = &[
    ("production_onshore", 0.15),
    ("production_offshore", 0.08),
    ("gathering", 0.12),
    ("processing", 0.10),
    ("transmission", 0.05),
    ("distribution", 0.08),
    ("refinery", 0.03),
    ("storage", 0.06),
];

/// Average fugitive factor for a facility type, kg CH4/BOE.
pub fn average_factor(facility_type: &str) -> CalcResult<f64> {
    AVERAGE_FACTORS
        .iter()
        .find(|(key, _)| *key == facility_type)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| {
            let valid: Vec<&str> = AVERAGE_FACTORS.iter().map(|(key, _)| *key).collect();
            CalcError::UnknownFacilityType(facility_type.to_string(), valid.join(", "))
        })
}

/// Emission rates for one pneumatic device class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PneumaticDevice {
    pub name: &'static str,
    /// Continuous emission rate, scf per hour.
    pub emission_rate_scfh: f64,
    /// Annual whole-gas emissions, mcf per device-year.
    pub annual_mcf: f64,
}

pub const PNEUMATIC_DEVICES: &[PneumaticDevice] = &[
    PneumaticDevice { name: "highBleedContinuous", emission_rate_scfh: 37.3, annual_mcf: 326.7 },
    PneumaticDevice { name: "lowBleedContinuous", emission_rate_scfh: 1.39, annual_mcf: 12.2 },
    PneumaticDevice { name: "intermittentBleed", emission_rate_scfh: 13.5, annual_mcf: 118.3 },
    PneumaticDevice { name: "diaphragmPump", emission_rate_scfh: 13.3, annual_mcf: 116.5 },
    PneumaticDevice { name: "pistonPump", emission_rate_scfh: 1.8, annual_mcf: 15.8 },
];

/// Looks up a pneumatic device class.
pub fn pneumatic_device(name: &str) -> Option<&'static PneumaticDevice> {
    PNEUMATIC_DEVICES.iter().find(|d| d.name == name)
}

/// Checks table consistency.
pub fn validate() -> CalcResult<()> {
    for service in [
        ServiceType::GasService,
        ServiceType::LightLiquid,
        ServiceType::HeavyLiquid,
    ] {
        let fraction = service.methane_fraction_of_thc();
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CalcError::InvalidInput(format!(
                "methane fraction for {} out of range",
                service.as_str()
            )));
        }
        for factor in component_types(service) {
            if factor.lb_per_hour <= 0.0 {
                return Err(CalcError::InvalidInput(format!(
                    "leak factor '{}' ({}) must be positive",
                    factor.name,
                    service.as_str()
                )));
            }
        }
    }
    for (key, factor) in AVERAGE_FACTORS {
        if *factor <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "average fugitive factor '{key}' must be positive"
            )));
        }
    }
    for device in PNEUMATIC_DEVICES {
        if device.annual_mcf <= 0.0 || device.emission_rate_scfh <= 0.0 {
            return Err(CalcError::InvalidInput(format!(
                "pneumatic device '{}' has non-positive rates",
                device.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_lookup_by_service() {
        let gas_valve = component_factor(ServiceType::GasService, "valve").unwrap();
        let liquid_valve = component_factor(ServiceType::LightLiquid, "valve").unwrap();
        assert_ne!(
            gas_valve.lb_per_hour, liquid_valve.lb_per_hour,
            "leak rates are service-specific"
        );
        assert!(component_factor(ServiceType::GasService, "widget").is_none());
    }

    #[test]
    fn test_methane_fraction_by_service() {
        assert!(
            ServiceType::GasService.methane_fraction_of_thc()
                > ServiceType::LightLiquid.methane_fraction_of_thc(),
            "gas streams are methane-richer than liquid streams"
        );
    }

    #[test]
    fn test_average_factor_lookup() {
        let onshore = average_factor("production_onshore").unwrap();
        assert!((onshore - 0.15).abs() < 1e-12);

        let err = average_factor("moonbase").unwrap_err();
        assert!(matches!(err, CalcError::UnknownFacilityType(_, _)));
        assert!(
            err.to_string().contains("production_onshore"),
            "error should list valid types"
        );
    }

    #[test]
    fn test_pneumatic_annual_rates_match_hourly() {
        // annual_mcf should be within rounding of scfh * 8760 / 1000
        for device in PNEUMATIC_DEVICES {
            let derived = device.emission_rate_scfh * HOURS_PER_YEAR / 1000.0;
            let relative = ((device.annual_mcf - derived) / derived).abs();
            assert!(
                relative < 0.01,
                "device '{}': annual {} vs derived {derived:.1}",
                device.name,
                device.annual_mcf
            );
        }
    }

    #[test]
    fn test_table_validates() {
        validate().expect("leak tables must be internally consistent");
    }
}
