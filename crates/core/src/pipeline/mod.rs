//! End-to-end fire danger pipeline
//!
//! [`FireDangerModel`] owns the reclassification rules and the vegetation
//! table. A landscape is prepared once (classification plus curing and biomass
//! rasters) and then run against any number of climate scenarios. Every run
//! allocates fresh output rasters, so results for different scenarios can be
//! held and compared side by side.

pub mod summary;

pub use summary::*;

use crate::core_types::{ClimateScenario, ParameterTable, VegetationParameter};
use crate::error::Result;
use crate::grid::{FuelTypeRaster, LandCoverRaster, Raster, ValueRaster};
use crate::model::{
    assign_biomass, assign_curing, classify, compute_danger, compute_spread, rate_danger,
    DangerAggregates, DangerRating, ReclassTable, SpreadAggregates,
};
use tracing::info;

/// Scenario-independent rasters derived from the land cover
#[derive(Debug, Clone, PartialEq)]
pub struct Landscape {
    fuel: FuelTypeRaster,
    curing: ValueRaster,
    biomass: ValueRaster,
}

impl Landscape {
    /// Assemble a landscape from externally produced rasters
    ///
    /// # Errors
    /// Returns [`crate::FireDangerError::InputShape`] unless all three rasters share
    /// the fuel raster's dimensions, and [`crate::FireDangerError::InvalidParameter`]
    /// for any defined curing or biomass cell outside its range.
    pub fn from_parts(fuel: FuelTypeRaster, curing: ValueRaster, biomass: ValueRaster) -> Result<Self> {
        fuel.ensure_same_shape(&curing)?;
        fuel.ensure_same_shape(&biomass)?;
        for (raster, parameter) in [
            (&curing, VegetationParameter::Curing),
            (&biomass, VegetationParameter::Biomass),
        ] {
            for value in raster.cells().iter().flatten() {
                parameter.check(*value)?;
            }
        }
        Ok(Self {
            fuel,
            curing,
            biomass,
        })
    }

    #[must_use]
    pub fn fuel(&self) -> &FuelTypeRaster {
        &self.fuel
    }

    #[must_use]
    pub fn curing(&self) -> &ValueRaster {
        &self.curing
    }

    #[must_use]
    pub fn biomass(&self) -> &ValueRaster {
        &self.biomass
    }

    /// `(width, height)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.fuel.dimensions()
    }
}

/// Outputs of one scenario run
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioRun {
    pub scenario: ClimateScenario,
    pub danger: ValueRaster,
    pub spread: ValueRaster,
    pub danger_aggregates: DangerAggregates,
    pub spread_aggregates: SpreadAggregates,
}

impl ScenarioRun {
    /// Danger rating class per cell
    #[must_use]
    pub fn ratings(&self) -> Raster<Option<DangerRating>> {
        rate_danger(&self.danger)
    }
}

/// Classification rules plus vegetation table
///
/// # Example
/// ```
/// use fire_danger_core::{ClimateScenario, FireDangerModel, LandCoverRaster};
///
/// let land_cover = LandCoverRaster::new(3, 1, vec![1, 4, 12], None).unwrap();
/// let model = FireDangerModel::default();
/// let landscape = model.prepare(&land_cover);
///
/// let run = model.run(&landscape, &ClimateScenario::reference()).unwrap();
/// assert_eq!(run.danger.cells()[2], Some(0.0)); // Non-Veg
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FireDangerModel {
    rules: ReclassTable,
    parameters: ParameterTable,
}

impl FireDangerModel {
    #[must_use]
    pub fn new(rules: ReclassTable, parameters: ParameterTable) -> Self {
        Self { rules, parameters }
    }

    #[must_use]
    pub fn rules(&self) -> &ReclassTable {
        &self.rules
    }

    #[must_use]
    pub fn parameters(&self) -> &ParameterTable {
        &self.parameters
    }

    /// Classify the land cover and assign curing and biomass
    pub fn prepare(&self, land_cover: &LandCoverRaster) -> Landscape {
        let (width, height) = land_cover.dimensions();
        info!("Preparing landscape: {}x{} cells", width, height);

        let fuel = classify(land_cover, &self.rules);
        let curing = assign_curing(&fuel, &self.parameters);
        let biomass = assign_biomass(&fuel, &self.parameters);

        Landscape {
            fuel,
            curing,
            biomass,
        }
    }

    /// Run one climate scenario over a prepared landscape
    ///
    /// # Errors
    /// Fails before producing any output when the scenario is malformed or
    /// leaves the drought or moisture terms undefined.
    pub fn run(&self, landscape: &Landscape, scenario: &ClimateScenario) -> Result<ScenarioRun> {
        info!("Running scenario: {}", scenario);

        let danger = compute_danger(
            &landscape.fuel,
            &landscape.curing,
            &landscape.biomass,
            scenario,
        )?;
        let spread = compute_spread(&danger.danger, &landscape.fuel, &landscape.biomass)?;

        Ok(ScenarioRun {
            scenario: *scenario,
            danger: danger.danger,
            spread: spread.spread,
            danger_aggregates: danger.aggregates,
            spread_aggregates: spread.aggregates,
        })
    }

    /// Run several scenarios over the same landscape.
    ///
    /// # Errors
    /// Returns the first scenario error; no partial results are returned.
    pub fn run_all(
        &self,
        landscape: &Landscape,
        scenarios: &[ClimateScenario],
    ) -> Result<Vec<ScenarioRun>> {
        scenarios
            .iter()
            .map(|scenario| self.run(landscape, scenario))
            .collect()
    }
}
