//! Fire danger model stages
//!
//! Classifier → parameter assigner → danger → spread. Each stage is a pure
//! function over immutable rasters.

pub mod classifier;
pub mod danger;
pub mod parameters;
pub mod rating;
pub mod spread;

pub use classifier::{classify, fuel_type_histogram, ReclassRule, ReclassTable};
pub use danger::{
    compute_danger, drought_factor, forest_danger_index, grass_danger_index, grass_moisture,
    DangerAggregates, DangerOutput,
};
pub use parameters::{assign_biomass, assign_curing, assign_parameter};
pub use rating::{danger_ranges, rate_danger, DangerRating};
pub use spread::{compute_spread, SpreadAggregates, SpreadOutput};
