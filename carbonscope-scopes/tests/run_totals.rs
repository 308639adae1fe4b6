//! Whole-run invariant tests.
//!
//! These exercise the documented accounting invariants end to end:
//! - scope totals are exactly the sum of their per-source results
//! - the grand total is exactly the sum of the scope totals
//! - Scope 3 is optional and contributes exactly zero when absent
//! - reference scenarios reproduce their published figures

use approx::assert_relative_eq;
use carbonscope_core::emissions::SourceKind;
use carbonscope_core::gwp::GwpVersion;
use carbonscope_scopes::run::{
    run_calculation, CalculationInput, ElectricityInput, FlaringInput, FugitiveInput,
    RunParameters, Scope1Input, Scope2Input, ThermalEntry,
};
use carbonscope_scopes::scope1::{ComponentCount, FuelEntry, MobileEntry, VentEntry};
use carbonscope_scopes::run::VentingInput;
use carbonscope_scopes::scope2::ThermalKind;
use carbonscope_scopes::scope3::{Scope3Input, SoldProduct, TransportLeg};
use carbonscope_core::factors::leaks::ServiceType;

fn full_input() -> CalculationInput {
    CalculationInput {
        scope1: Scope1Input {
            stationary: vec![
                FuelEntry {
                    fuel_type: "naturalGas".to_string(),
                    quantity: 50_000.0,
                    unit: "mcf".to_string(),
                },
                FuelEntry {
                    fuel_type: "distillateFuelOil".to_string(),
                    quantity: 20_000.0,
                    unit: "gallon".to_string(),
                },
            ],
            mobile: vec![MobileEntry {
                vehicle_type: "HeavyTruck".to_string(),
                fuel_type: "diesel".to_string(),
                quantity: 15_000.0,
                unit: "gallon".to_string(),
            }],
            flaring: Some(FlaringInput::Default {
                volume_mmscf: 10.0,
                hhv: None,
                combustion_efficiency: None,
            }),
            venting: Some(VentingInput {
                sources: vec![VentEntry {
                    source: "tank battery".to_string(),
                    volume: 500.0,
                    unit: "mcf".to_string(),
                }],
                methane_content: None,
            }),
            fugitive: Some(FugitiveInput::ComponentCount {
                components: vec![
                    ComponentCount {
                        component_type: "valve".to_string(),
                        count: 500,
                    },
                    ComponentCount {
                        component_type: "connector".to_string(),
                        count: 2000,
                    },
                ],
                service_type: ServiceType::GasService,
            }),
            pneumatic: None,
        },
        scope2: Scope2Input {
            electricity: Some(ElectricityInput {
                kwh: 2_000_000.0,
                region: "US".to_string(),
                subregion: Some("ERCT".to_string()),
                market: None,
            }),
            thermal: vec![ThermalEntry {
                kind: ThermalKind::Steam,
                energy_mmbtu: 5_000.0,
                factor: None,
            }],
        },
        scope3: Some(Scope3Input {
            category11: vec![
                SoldProduct {
                    product_type: "crudeOil".to_string(),
                    quantity: 1_000_000.0,
                    unit: "barrel".to_string(),
                },
                SoldProduct {
                    product_type: "naturalGas".to_string(),
                    quantity: 800_000.0,
                    unit: "mcf".to_string(),
                },
            ],
            category4: vec![TransportLeg {
                mode: "pipeline".to_string(),
                tonnes: 100_000.0,
                distance_km: 800.0,
            }],
            ..Scope3Input::default()
        }),
        gwp_version: GwpVersion::Ar5,
        parameters: RunParameters::default(),
        calculated_at: "2024-06-30T12:00:00Z".to_string(),
    }
}

mod additivity {
    use super::*;

    #[test]
    fn test_scope_totals_equal_sum_of_sources() {
        let run = run_calculation(&full_input()).unwrap();

        let scope1_sum: f64 = run.scope1.by_source.values().map(|r| r.co2e_tonnes).sum();
        assert_eq!(run.scope1.co2e_tonnes, scope1_sum);
        assert_eq!(run.totals.scope1_tonnes, run.scope1.co2e_tonnes);

        let scope2_sum: f64 = run.scope2.by_source.values().map(|r| r.co2e_tonnes).sum();
        assert_eq!(run.scope2.co2e_tonnes, scope2_sum);
    }

    #[test]
    fn test_grand_total_is_sum_of_scopes() {
        let run = run_calculation(&full_input()).unwrap();
        assert_eq!(
            run.totals.total_tonnes,
            run.totals.scope1_tonnes + run.totals.scope2_tonnes + run.totals.scope3_tonnes
        );
    }

    #[test]
    fn test_every_supplied_source_appears() {
        let run = run_calculation(&full_input()).unwrap();
        for kind in [
            SourceKind::StationaryCombustion,
            SourceKind::MobileCombustion,
            SourceKind::Flaring,
            SourceKind::Venting,
            SourceKind::Fugitive,
        ] {
            assert!(
                run.scope1.by_source.contains_key(&kind),
                "missing scope 1 source {kind:?}"
            );
        }
        assert!(run.scope1.by_source.len() == 5, "nothing extra appears");
        assert!(run.scope2.by_source.contains_key(&SourceKind::Electricity));
        assert!(run.scope2.by_source.contains_key(&SourceKind::Steam));
    }

    #[test]
    fn test_each_source_result_internally_consistent() {
        let run = run_calculation(&full_input()).unwrap();
        for (kind, result) in run.scope1.by_source.iter().chain(run.scope2.by_source.iter()) {
            let recomputed =
                result.emissions.co2_kg + result.ch4_co2e_kg + result.n2o_co2e_kg;
            assert_relative_eq!(result.co2e_kg, recomputed, max_relative = 1e-12);
            assert_eq!(
                result.co2e_tonnes,
                result.co2e_kg / 1000.0,
                "tonnes/kg mismatch for {kind:?}"
            );
        }
    }
}

mod optionality {
    use super::*;

    #[test]
    fn test_run_without_scope3() {
        let mut input = full_input();
        input.scope3 = None;
        let run = run_calculation(&input).unwrap();

        assert!(run.scope3.is_none());
        assert_eq!(run.totals.scope3_tonnes, 0.0);
        assert_eq!(
            run.totals.total_tonnes,
            run.totals.scope1_tonnes + run.totals.scope2_tonnes
        );
    }

    #[test]
    fn test_scope3_dominates_for_producers() {
        // Category 11 on a million barrels dwarfs operational emissions,
        // matching the documented 70-90% industry norm.
        let run = run_calculation(&full_input()).unwrap();
        let share = run.totals.scope3_tonnes / run.totals.total_tonnes;
        assert!(
            share > 0.7,
            "scope 3 share was {:.1}%",
            share * 100.0
        );
    }

    #[test]
    fn test_zero_activity_zero_totals() {
        let input = CalculationInput {
            scope1: Scope1Input::default(),
            scope2: Scope2Input::default(),
            scope3: None,
            gwp_version: GwpVersion::Ar5,
            parameters: RunParameters::default(),
            calculated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let run = run_calculation(&input).unwrap();
        assert_eq!(run.totals.total_tonnes, 0.0);
        assert!(run.scope1.by_source.is_empty());
        assert!(run.skipped.is_empty());
    }
}

mod reference_scenarios {
    use super::*;

    #[test]
    fn test_flaring_default_reference_figures() {
        let run = run_calculation(&full_input()).unwrap();
        let flaring = &run.scope1.by_source[&SourceKind::Flaring];

        // 10 MMscf * 1000 MMBtu/MMscf * 59.0 kg/MMBtu * 0.98
        assert_relative_eq!(flaring.emissions.co2_kg, 578_200.0, max_relative = 1e-9);

        let carbon = 578_200.0 * 12.0 / 44.0;
        let expected_ch4 = carbon / 0.98 * 0.02 * 0.4 * 16.0 / 12.0;
        assert_relative_eq!(flaring.emissions.ch4_kg, expected_ch4, max_relative = 1e-9);

        let expected_co2e = 578_200.0 + expected_ch4 * 30.0 + 0.6 * 265.0;
        assert_relative_eq!(
            flaring.co2e_tonnes,
            expected_co2e / 1000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_location_based_reference_figures() {
        let mut input = full_input();
        input.scope2.electricity = Some(ElectricityInput {
            kwh: 100_000.0,
            region: "US".to_string(),
            subregion: None,
            market: None,
        });
        input.scope2.thermal.clear();
        let run = run_calculation(&input).unwrap();

        // 100,000 kWh * 0.373 kg/kWh = 37.3 t
        assert_relative_eq!(run.totals.scope2_tonnes, 37.3, max_relative = 1e-12);
    }

    #[test]
    fn test_category11_reference_figures() {
        let mut input = full_input();
        input.scope3 = Some(Scope3Input {
            category11: vec![SoldProduct {
                product_type: "motorGasoline".to_string(),
                quantity: 1000.0,
                unit: "gallon".to_string(),
            }],
            ..Scope3Input::default()
        });
        let run = run_calculation(&input).unwrap();
        assert_relative_eq!(run.totals.scope3_tonnes, 8.887, max_relative = 1e-12);
    }

    #[test]
    fn test_gwp_version_changes_methane_weighting() {
        let ar5 = run_calculation(&full_input()).unwrap();
        let mut input = full_input();
        input.gwp_version = GwpVersion::Ar6;
        let ar6 = run_calculation(&input).unwrap();

        // Methane-heavy sources shift with the vintage (30 vs 29.8).
        let ar5_venting = ar5.scope1.by_source[&SourceKind::Venting].co2e_kg;
        let ar6_venting = ar6.scope1.by_source[&SourceKind::Venting].co2e_kg;
        assert!(ar5_venting > ar6_venting);
        assert_relative_eq!(ar5_venting / 30.0, ar6_venting / 29.8, max_relative = 1e-12);
    }
}

mod exporter_surface {
    use super::*;

    /// Exporters consume the serialized run; the fields they render must
    /// be present under their documented names.
    #[test]
    fn test_run_serializes_for_exporters() {
        let run = run_calculation(&full_input()).unwrap();
        let json = serde_json::to_value(&run).unwrap();

        assert!(json["totals"]["scope1_tonnes"].is_number());
        assert!(json["totals"]["total_tonnes"].is_number());
        assert_eq!(json["gwp_version"], "AR5");
        assert_eq!(json["calculated_at"], "2024-06-30T12:00:00Z");
        assert!(json["scope1"]["by_source"]["flaring"]["co2e_tonnes"].is_number());
        assert!(json["scope3"]["category11"]["co2_tonnes"].is_number());
    }

    #[test]
    fn test_skipped_entries_serialized_with_labels() {
        let mut input = full_input();
        input.scope1.stationary.push(FuelEntry {
            fuel_type: "unobtainium".to_string(),
            quantity: 1.0,
            unit: "MMBtu".to_string(),
        });
        let run = run_calculation(&input).unwrap();
        let json = serde_json::to_value(&run).unwrap();
        let skipped = json["skipped"].as_array().unwrap();
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0]["reason"]
            .as_str()
            .unwrap()
            .contains("unknown fuel type"));
    }
}
