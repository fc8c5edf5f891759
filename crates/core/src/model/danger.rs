//! Fire danger index per cell
//!
//! Implements the `McArthur` Mark 4 grassland and Mark 5 forest fire danger
//! meters in their closed-form equation versions:
//!
//! - Drought factor: `DF = 0.191 (I + 104) (N + 1)^1.5 / (3.52 (N + 1)^1.5 + R − 1)`
//! - Grass moisture: `M = ((97.7 + 4.06 H) / (T + 6) − 0.00854 H) (100 − C) / 100`
//! - Grass danger: `GFDI = 3.35 W exp(−0.0897 M + 0.0403 V)`
//! - Forest danger: `FFDI = 1.25 DF exp((T − H) / 30 + 0.0234 V)`
//!
//! where I is the Keetch-Byram drought index, N days since rain, R the last
//! rain amount (mm), T temperature (°C), H relative humidity (%), V wind speed
//! (km/h), C curing (%) and W fuel load (t/ha).
//!
//! # Scientific References
//!
//! - Noble, I.R., Bary, G.A.V., Gill, A.M. (1980). "`McArthur`'s fire-danger meters
//!   expressed as equations." Australian Journal of Ecology, 5(2), 201-203.
//!
//! The computation runs in two passes: raster-wide scalars (drought factor,
//! forest index, grassland maximum) are reduced first, then each cell picks its
//! branch by fuel type.

use crate::core_types::{ClimateScenario, FuelType};
use crate::error::{FireDangerError, Result};
use crate::grid::{FuelTypeRaster, ValueRaster};
use tracing::{debug, warn};

/// Raster-wide scalars computed during a danger pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DangerAggregates {
    /// Drought factor (uniform over the raster)
    pub drought_factor: f64,
    /// Forest danger index applied to Deciduous and Conifer cells
    pub forest_index: f64,
    /// Maximum grass danger index over Grassland cells
    pub grassland_max: Option<f64>,
    /// Value broadcast to Arable cells (half the grassland maximum)
    pub arable_index: Option<f64>,
}

/// Danger raster plus the scalars it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct DangerOutput {
    pub danger: ValueRaster,
    pub aggregates: DangerAggregates,
}

/// Drought factor for a scenario.
///
/// # Errors
/// Returns [`FireDangerError::Domain`] if the denominator is not positive,
/// which would otherwise yield an infinite or negative danger value.
pub fn drought_factor(scenario: &ClimateScenario) -> Result<f64> {
    let rain_term = (f64::from(scenario.days_since_rain) + 1.0).powf(1.5);
    let denominator = 3.52 * rain_term + *scenario.last_rain - 1.0;
    if denominator.is_nan() || denominator <= 0.0 {
        return Err(FireDangerError::Domain(format!(
            "drought factor denominator {denominator:.3} is not positive \
             (days since rain = {}, last rain = {})",
            scenario.days_since_rain, scenario.last_rain
        )));
    }
    Ok(0.191 * (scenario.drought_index + 104.0) * rain_term / denominator)
}

/// Weather part of the grass moisture factor, shared by every cell
fn grass_weather_term(scenario: &ClimateScenario) -> Result<f64> {
    let humidity = *scenario.humidity;
    let offset_temperature = *scenario.temperature + 6.0;
    if offset_temperature <= 0.0 {
        return Err(FireDangerError::Domain(format!(
            "grass moisture factor needs a temperature above -6°C, got {}",
            scenario.temperature
        )));
    }
    Ok((97.7 + 4.06 * humidity) / offset_temperature - 0.00854 * humidity)
}

/// Grassland moisture factor for one curing value (percent).
///
/// # Errors
/// Returns [`FireDangerError::Domain`] when the temperature is at or below -6°C.
pub fn grass_moisture(scenario: &ClimateScenario, curing: f64) -> Result<f64> {
    Ok(grass_weather_term(scenario)? * (100.0 - curing) / 100.0)
}

/// Grass danger index from a moisture factor and fuel load (t/ha)
#[inline]
pub fn grass_danger_index(scenario: &ClimateScenario, moisture: f64, biomass: f64) -> f64 {
    3.35 * biomass * (-0.0897 * moisture + 0.0403 * *scenario.wind_speed).exp()
}

/// Forest danger index from a drought factor
#[inline]
pub fn forest_danger_index(scenario: &ClimateScenario, drought: f64) -> f64 {
    let exponent = (*scenario.temperature - *scenario.humidity) / 30.0 + 0.0234 * *scenario.wind_speed;
    1.25 * drought * exponent.exp()
}

/// Compute the danger raster for one scenario.
///
/// - Deciduous, Conifer: forest index (uniform)
/// - Arable: half the maximum grass index over Grassland cells (uniform)
/// - Grassland, Heathland: per-cell grass index
/// - Non-Veg: 0
///
/// Cells without a fuel type, or grass cells missing curing or biomass, are
/// missing. With no Grassland cell the Arable value is missing too.
///
/// # Errors
/// Returns [`FireDangerError::InputShape`] if the rasters are not aligned,
/// [`FireDangerError::InvalidScenario`] for a malformed scenario and
/// [`FireDangerError::Domain`] when the drought or moisture terms are undefined.
/// Nothing is computed per cell before these checks pass.
pub fn compute_danger(
    fuel: &FuelTypeRaster,
    curing: &ValueRaster,
    biomass: &ValueRaster,
    scenario: &ClimateScenario,
) -> Result<DangerOutput> {
    fuel.ensure_same_shape(curing)?;
    fuel.ensure_same_shape(biomass)?;
    scenario.validate()?;

    let drought = drought_factor(scenario)?;
    let weather_term = grass_weather_term(scenario)?;
    let forest_index = forest_danger_index(scenario, drought);

    // Pass 1: per-cell grass index and the grassland reduction
    let grass_index = curing.zip_map(biomass, |curing, biomass| {
        let moisture = weather_term * (100.0 - (*curing)?) / 100.0;
        Some(grass_danger_index(scenario, moisture, (*biomass)?))
    })?;
    let grassland_max = grass_index.max_over(fuel, FuelType::Grassland)?;
    let arable_index = grassland_max.map(|max| max * 0.5);

    if arable_index.is_none() && fuel.count(FuelType::Arable) > 0 {
        warn!("No Grassland cell with a defined grass index; Arable danger left missing");
    }

    let aggregates = DangerAggregates {
        drought_factor: drought,
        forest_index,
        grassland_max,
        arable_index,
    };
    debug!("Danger aggregates: {:?}", aggregates);

    // Pass 2: branch per cell
    let danger = fuel.zip_map(&grass_index, |cell, grass| match (*cell)? {
        FuelType::Deciduous | FuelType::Conifer => Some(forest_index),
        FuelType::Arable => arable_index,
        FuelType::Grassland | FuelType::Heathland => *grass,
        FuelType::NonVeg => Some(0.0),
    })?;

    Ok(DangerOutput { danger, aggregates })
}
