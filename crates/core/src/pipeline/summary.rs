//! Summary statistics and scenario comparison over output rasters

use super::ScenarioRun;
use crate::core_types::FuelType;
use crate::error::Result;
use crate::grid::{FuelTypeRaster, ValueRaster};
use rustc_hash::FxHashMap;

/// Count, missing count and range of a set of cells
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStatistics {
    pub cells: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

#[derive(Debug, Default)]
struct StatisticsAccumulator {
    cells: usize,
    missing: usize,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl StatisticsAccumulator {
    fn push(&mut self, value: Option<f64>) {
        self.cells += 1;
        let Some(value) = value else {
            self.missing += 1;
            return;
        };
        self.sum += value;
        self.min = Some(self.min.map_or(value, |min| min.min(value)));
        self.max = Some(self.max.map_or(value, |max| max.max(value)));
    }

    fn finish(&self) -> CellStatistics {
        let defined = self.cells - self.missing;
        CellStatistics {
            cells: self.cells,
            missing: self.missing,
            min: self.min,
            max: self.max,
            mean: (defined > 0).then(|| self.sum / defined as f64),
        }
    }
}

/// Statistics of one raster, overall and per fuel type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RasterSummary {
    pub overall: CellStatistics,
    pub by_fuel_type: FxHashMap<FuelType, CellStatistics>,
    /// Cells without a fuel type
    pub unclassified: CellStatistics,
}

impl RasterSummary {
    /// Statistics for one fuel type (all zero if the type does not occur)
    #[must_use]
    pub fn fuel_type(&self, fuel_type: FuelType) -> CellStatistics {
        self.by_fuel_type
            .get(&fuel_type)
            .copied()
            .unwrap_or_default()
    }
}

/// Summarize a value raster grouped by fuel type
///
/// # Errors
/// Returns [`crate::FireDangerError::InputShape`] if the rasters are not aligned.
pub fn summarize(values: &ValueRaster, fuel: &FuelTypeRaster) -> Result<RasterSummary> {
    values.ensure_same_shape(fuel)?;

    let mut overall = StatisticsAccumulator::default();
    let mut unclassified = StatisticsAccumulator::default();
    let mut by_fuel_type: FxHashMap<FuelType, StatisticsAccumulator> = FxHashMap::default();

    for (value, cell) in values.cells().iter().zip(fuel.cells()) {
        overall.push(*value);
        match cell {
            Some(fuel_type) => by_fuel_type.entry(*fuel_type).or_default().push(*value),
            None => unclassified.push(*value),
        }
    }

    Ok(RasterSummary {
        overall: overall.finish(),
        by_fuel_type: by_fuel_type
            .into_iter()
            .map(|(fuel_type, acc)| (fuel_type, acc.finish()))
            .collect(),
        unclassified: unclassified.finish(),
    })
}

/// Per-cell differences between two scenario runs (alternative − baseline)
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioComparison {
    pub danger_difference: ValueRaster,
    pub spread_difference: ValueRaster,
    pub danger_statistics: CellStatistics,
    pub spread_statistics: CellStatistics,
}

fn difference(baseline: &ValueRaster, alternative: &ValueRaster) -> Result<ValueRaster> {
    baseline.zip_map(alternative, |a, b| Some((*b)? - (*a)?))
}

fn statistics(values: &ValueRaster) -> CellStatistics {
    let mut acc = StatisticsAccumulator::default();
    for value in values.cells() {
        acc.push(*value);
    }
    acc.finish()
}

/// Compare two runs over the same landscape.
///
/// Cells missing in either run are missing in the difference. Neither run is
/// modified.
///
/// # Errors
/// Returns [`crate::FireDangerError::InputShape`] if the runs cover different grids.
pub fn compare(baseline: &ScenarioRun, alternative: &ScenarioRun) -> Result<ScenarioComparison> {
    let danger_difference = difference(&baseline.danger, &alternative.danger)?;
    let spread_difference = difference(&baseline.spread, &alternative.spread)?;
    Ok(ScenarioComparison {
        danger_statistics: statistics(&danger_difference),
        spread_statistics: statistics(&spread_difference),
        danger_difference,
        spread_difference,
    })
}
