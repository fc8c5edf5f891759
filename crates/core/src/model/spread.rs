//! Rate of spread per cell (km/h)
//!
//! Spread is driven by raster-wide maxima of the danger index over specific
//! fuel-type subsets:
//!
//! - forest multiplier = max(danger over Deciduous) × 0.0012, scaled by the
//!   cell's fuel load for Deciduous and Conifer cells
//! - grass rate = max(danger over Grassland) × 0.13, applied to Arable and
//!   Heathland cells
//! - heath rate = max(danger over Heathland) × 0.13, applied to Grassland cells
//!
//! Grassland cells take the heath rate and Heathland cells the grass rate.

use crate::core_types::FuelType;
use crate::error::Result;
use crate::grid::{FuelTypeRaster, ValueRaster};
use tracing::debug;

/// Forest spread per unit danger index per t/ha of fuel
pub const FOREST_SPREAD_COEFFICIENT: f64 = 0.0012;

/// Grass and heath spread per unit danger index
pub const GRASS_SPREAD_COEFFICIENT: f64 = 0.13;

/// Raster-wide scalars computed during a spread pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadAggregates {
    /// Spread per t/ha of fuel for forest cells
    pub forest_multiplier: Option<f64>,
    /// Spread derived from the Grassland danger maximum
    pub grass_rate: Option<f64>,
    /// Spread derived from the Heathland danger maximum
    pub heath_rate: Option<f64>,
}

/// Spread raster plus the scalars it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadOutput {
    pub spread: ValueRaster,
    pub aggregates: SpreadAggregates,
}

/// Compute the rate-of-spread raster from a danger raster.
///
/// A subset with no defined danger value yields a missing scalar, so every
/// cell relying on it is missing as well.
///
/// # Errors
/// Returns [`crate::FireDangerError::InputShape`] if the rasters are not aligned.
pub fn compute_spread(
    danger: &ValueRaster,
    fuel: &FuelTypeRaster,
    biomass: &ValueRaster,
) -> Result<SpreadOutput> {
    fuel.ensure_same_shape(danger)?;
    fuel.ensure_same_shape(biomass)?;

    let aggregates = SpreadAggregates {
        forest_multiplier: danger
            .max_over(fuel, FuelType::Deciduous)?
            .map(|max| max * FOREST_SPREAD_COEFFICIENT),
        grass_rate: danger
            .max_over(fuel, FuelType::Grassland)?
            .map(|max| max * GRASS_SPREAD_COEFFICIENT),
        heath_rate: danger
            .max_over(fuel, FuelType::Heathland)?
            .map(|max| max * GRASS_SPREAD_COEFFICIENT),
    };
    debug!("Spread aggregates: {:?}", aggregates);

    let SpreadAggregates {
        forest_multiplier,
        grass_rate,
        heath_rate,
    } = aggregates;

    let spread = fuel.zip_map(biomass, |cell, biomass| match (*cell)? {
        FuelType::Deciduous | FuelType::Conifer => Some((*biomass)? * forest_multiplier?),
        FuelType::Arable | FuelType::Heathland => grass_rate,
        FuelType::Grassland => heath_rate,
        FuelType::NonVeg => Some(0.0),
    })?;

    Ok(SpreadOutput { spread, aggregates })
}
