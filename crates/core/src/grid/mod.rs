//! Grid containers for land-cover input and derived rasters

pub mod land_cover;
pub mod raster;

// Re-export main types
pub use land_cover::*;
pub use raster::*;
