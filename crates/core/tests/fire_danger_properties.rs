//! Property tests for the fire danger pipeline
//!
//! Covers the classification table, missing-value propagation, the reference
//! grass meter value, branch selection, the grass/heath spread pairing,
//! monotonicity in the drought index and scenario isolation.
//!
//! Run tests with: cargo test --test `fire_danger_properties`

use approx::assert_relative_eq;
use fire_danger_core::{
    classify, compare, model::drought_factor, model::forest_danger_index, summarize,
    ClimateScenario, FireDangerModel, FuelType, FuelTypeRaster, LandCoverRaster, ParameterTable,
    Raster, ReclassTable,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every land-cover code 1-21 once, plus a no-data cell
fn all_codes() -> LandCoverRaster {
    let mut codes: Vec<i32> = (1..=21).collect();
    codes.extend([-9999, 0, 22]);
    LandCoverRaster::new(8, 3, codes, Some(-9999)).unwrap()
}

fn fuel_at(fuel: &FuelTypeRaster, code: i32) -> Option<FuelType> {
    // Codes 1-21 sit at index code-1
    fuel.cells()[(code - 1) as usize]
}

// ═══════════════════════════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_code_groups_map_to_fuel_types() {
    let fuel = classify(&all_codes(), &ReclassTable::reference());

    assert_eq!(fuel_at(&fuel, 1), Some(FuelType::Deciduous));
    assert_eq!(fuel_at(&fuel, 2), Some(FuelType::Conifer));
    assert_eq!(fuel_at(&fuel, 3), Some(FuelType::Arable));
    for code in 4..=7 {
        assert_eq!(fuel_at(&fuel, code), Some(FuelType::Grassland), "code {code}");
    }
    for code in 9..=10 {
        assert_eq!(fuel_at(&fuel, code), Some(FuelType::Heathland), "code {code}");
    }
    for code in std::iter::once(8).chain(11..=21) {
        assert_eq!(fuel_at(&fuel, code), Some(FuelType::NonVeg), "code {code}");
    }

    // No-data, 0 and 22 match nothing
    assert_eq!(&fuel.cells()[21..], &[None, None, None]);
}

#[test]
fn test_classification_is_idempotent() {
    let land_cover = all_codes();
    let table = ReclassTable::reference();
    assert_eq!(classify(&land_cover, &table), classify(&land_cover, &table));
}

#[test]
fn test_arable_and_nonveg_have_no_vegetation_parameters() {
    let landscape = FireDangerModel::default().prepare(&all_codes());

    for ((fuel, curing), biomass) in landscape
        .fuel()
        .cells()
        .iter()
        .zip(landscape.curing().cells())
        .zip(landscape.biomass().cells())
    {
        if matches!(fuel, Some(FuelType::Arable | FuelType::NonVeg) | None) {
            assert_eq!(*curing, None);
            assert_eq!(*biomass, None);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Danger model
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_nonveg_danger_is_zero_for_any_scenario() {
    let model = FireDangerModel::default();
    let landscape = model.prepare(&all_codes());

    for scenario in [
        ClimateScenario::reference(),
        ClimateScenario::moderate(),
        ClimateScenario::severe(),
    ] {
        let run = model.run(&landscape, &scenario).unwrap();
        for (fuel, danger) in landscape.fuel().cells().iter().zip(run.danger.cells()) {
            if *fuel == Some(FuelType::NonVeg) {
                assert_eq!(*danger, Some(0.0));
            }
        }
    }
}

#[test]
fn test_reference_grassland_cell_matches_hand_computed_value() {
    // GrassM = ((97.7 + 4.06*50)/(20+6) - 0.00854*50) * (100-29.1)/100 = 7.897115
    // GrassFDM = 3.35 * 0.716 * exp(-0.0897*7.897115 + 0.0403*10) = 1.767408
    let model = FireDangerModel::default();
    let land_cover = LandCoverRaster::new(2, 1, vec![4, 6], None).unwrap();
    let landscape = model.prepare(&land_cover);
    let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();

    for cell in run.danger.cells() {
        assert_relative_eq!(cell.unwrap(), 1.767408, max_relative = 1e-6);
    }
    assert_relative_eq!(
        run.danger_aggregates.arable_index.unwrap(),
        1.767408 / 2.0,
        max_relative = 1e-6
    );
}

#[test]
fn test_drought_and_forest_index_increase_with_kbdi() {
    let base = ClimateScenario::reference();
    let mut previous_drought = f64::NEG_INFINITY;
    let mut previous_forest = f64::NEG_INFINITY;

    for kbdi in [0.0, 100.0, 250.0, 400.0, 550.0, 800.0] {
        let scenario = base.with_drought_index(kbdi);
        let drought = drought_factor(&scenario).unwrap();
        let forest = forest_danger_index(&scenario, drought);
        assert!(drought > previous_drought, "KBDI {kbdi}");
        assert!(forest > previous_forest, "KBDI {kbdi}");
        previous_drought = drought;
        previous_forest = forest;
    }
}

#[test]
fn test_forest_cells_follow_kbdi() {
    let model = FireDangerModel::default();
    let land_cover = LandCoverRaster::new(2, 1, vec![1, 2], None).unwrap();
    let landscape = model.prepare(&land_cover);

    let low = model
        .run(&landscape, &ClimateScenario::reference().with_drought_index(200.0))
        .unwrap();
    let high = model
        .run(&landscape, &ClimateScenario::reference().with_drought_index(600.0))
        .unwrap();

    for (lo, hi) in low.danger.cells().iter().zip(high.danger.cells()) {
        assert!(hi.unwrap() > lo.unwrap());
    }
}

#[test]
fn test_no_grassland_leaves_arable_missing() {
    let model = FireDangerModel::default();
    let land_cover = LandCoverRaster::new(3, 1, vec![3, 1, 9], None).unwrap();
    let landscape = model.prepare(&land_cover);
    let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();

    assert_eq!(run.danger_aggregates.arable_index, None);
    assert_eq!(run.danger.cells()[0], None);
    // Heathland has no Grassland-derived rate to borrow either
    assert_eq!(run.spread.cells()[2], None);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Spread model
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_grassland_spread_uses_heathland_rate() {
    let model = FireDangerModel::default();
    // Deciduous, Arable, Grassland, Heathland, Non-Veg
    let land_cover = LandCoverRaster::new(5, 1, vec![1, 3, 5, 10, 15], None).unwrap();
    let landscape = model.prepare(&land_cover);
    let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();

    let heath_rate = run.spread_aggregates.heath_rate.unwrap();
    let grass_rate = run.spread_aggregates.grass_rate.unwrap();
    assert!((heath_rate - grass_rate).abs() > 1e-6);

    let spread = run.spread.cells();
    assert_eq!(spread[2], Some(heath_rate));
    assert_eq!(spread[3], Some(grass_rate));
    assert_eq!(spread[1], Some(grass_rate));
    assert_eq!(spread[4], Some(0.0));

    // Heath rate is 0.13 × the Heathland danger maximum
    assert_relative_eq!(heath_rate, run.danger.cells()[3].unwrap() * 0.13);

    // Forest spread scales with the cell's own fuel load
    let forest_multiplier = run.spread_aggregates.forest_multiplier.unwrap();
    assert_relative_eq!(spread[0].unwrap(), 12.0 * forest_multiplier);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scenario isolation and comparison
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_second_scenario_leaves_first_untouched() {
    let model = FireDangerModel::default();
    let landscape = model.prepare(&all_codes());

    let run_a = model.run(&landscape, &ClimateScenario::reference()).unwrap();
    let snapshot = run_a.danger.clone();
    let run_b = model.run(&landscape, &ClimateScenario::severe()).unwrap();

    assert_eq!(run_a.danger, snapshot);
    assert_ne!(run_a.danger, run_b.danger);
}

#[test]
fn test_compare_reports_increase_under_severe_weather() {
    let model = FireDangerModel::default();
    let landscape = model.prepare(&all_codes());
    let runs = model
        .run_all(
            &landscape,
            &[ClimateScenario::reference(), ClimateScenario::severe()],
        )
        .unwrap();

    let comparison = compare(&runs[0], &runs[1]).unwrap();
    // Missing cells in either run stay missing in the difference
    assert_eq!(
        comparison.danger_statistics.missing,
        runs[0].danger.missing_count()
    );
    assert!(comparison.danger_statistics.max.unwrap() > 0.0);
    // Non-Veg stays at zero in both runs
    assert_eq!(comparison.danger_statistics.min, Some(0.0));
}

#[test]
fn test_summary_by_fuel_type() {
    let model = FireDangerModel::default();
    let landscape = model.prepare(&all_codes());
    let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();

    let summary = summarize(&run.danger, landscape.fuel()).unwrap();
    assert_eq!(summary.fuel_type(FuelType::Grassland).cells, 4);
    assert_eq!(summary.fuel_type(FuelType::NonVeg).max, Some(0.0));
    assert_eq!(summary.unclassified.cells, 3);
    assert_eq!(summary.overall.cells, 24);
}

#[test]
fn test_custom_table_without_grass_curing() {
    // A table lacking Grassland curing leaves every grass-branch cell missing
    let table = ParameterTable::reference().with(
        FuelType::Grassland,
        fire_danger_core::VegetationParameters::new(
            None,
            Some(fire_danger_core::TonnesPerHectare::new(0.716)),
        ),
    )
    .unwrap();
    let model = FireDangerModel::new(ReclassTable::reference(), table);
    let land_cover = LandCoverRaster::new(3, 1, vec![4, 3, 12], None).unwrap();
    let landscape = model.prepare(&land_cover);
    let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();

    assert_eq!(run.danger.cells(), &[None, None, Some(0.0)]);
    assert_eq!(
        run.danger,
        Raster::from_vec(3, 1, vec![None, None, Some(0.0)]).unwrap()
    );
}
