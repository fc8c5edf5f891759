//! Fire Danger Core Library
//!
//! Gridded wildfire danger and rate-of-spread estimation based on the
//! `McArthur` grassland and forest fire danger meters.
//!
//! ## Pipeline
//!
//! - Reclassify a land-cover raster into six fuel types
//! - Assign curing and fuel load per fuel type
//! - Compute the drought factor, grass moisture factor and the grass/forest
//!   danger index per cell, selecting the branch by fuel type
//! - Derive rate of spread from raster-wide danger maxima
//!
//! Missing data is carried as `Option` values cell by cell. Climate inputs are
//! immutable [`ClimateScenario`] values, so several scenarios can be run over
//! the same [`Landscape`] and compared side by side.

// Core types and utilities
pub mod core_types;
pub mod error;

// Rasters and model stages
pub mod grid;
pub mod model;
pub mod pipeline;

// Re-export core types
pub use core_types::{
    Celsius, ClimateScenario, FuelType, KilometersPerHour, Millimeters, ParameterTable, Percent,
    TonnesPerHectare, VegetationParameter, VegetationParameters,
};
pub use error::{FireDangerError, Result};

// Re-export grid and model types
pub use grid::{FuelTypeRaster, LandCoverRaster, Raster, ValueRaster};
pub use model::{
    classify, compute_danger, compute_spread, DangerAggregates, DangerRating, ReclassRule,
    ReclassTable, SpreadAggregates,
};
pub use pipeline::{
    compare, summarize, CellStatistics, FireDangerModel, Landscape, RasterSummary,
    ScenarioComparison, ScenarioRun,
};
