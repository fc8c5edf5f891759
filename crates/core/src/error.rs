//! Error type shared by every stage of the fire danger pipeline.
//!
//! Missing vegetation parameters and empty fuel-type subsets are not errors:
//! they surface as `None` cells (or a `None` aggregate) and propagate through
//! the downstream formulas. Everything below aborts the run before any output
//! raster is handed back.

use crate::core_types::VegetationParameter;
use std::fmt;

/// Errors that can occur while classifying a landscape or running a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum FireDangerError {
    /// Cell buffer length does not match `width * height`
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    /// A raster does not share the land-cover grid dimensions
    InputShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Raw fuel-type code outside the six enumerated fuel types
    UnknownFuelType { code: u8, index: usize },
    /// Reclassification rule with `low > high`
    InvalidRule { low: i32, high: i32 },
    /// Climate value outside its physical range
    InvalidScenario {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Curing or biomass value outside its physical range
    InvalidParameter {
        parameter: VegetationParameter,
        value: f64,
        reason: &'static str,
    },
    /// Climate inputs that leave a model term undefined
    Domain(String),
}

impl fmt::Display for FireDangerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireDangerError::InvalidDimensions { width, height, len } => {
                match width.checked_mul(*height) {
                    Some(cells) => write!(
                        f,
                        "Grid size mismatch: expected {width}x{height} = {cells} cells, got {len}"
                    ),
                    None => write!(f, "Grid of {width}x{height} cells is too large (got {len})"),
                }
            }
            FireDangerError::InputShape { expected, found } => write!(
                f,
                "Raster shape mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FireDangerError::UnknownFuelType { code, index } => {
                write!(f, "Unknown fuel type code {code} at cell {index}")
            }
            FireDangerError::InvalidRule { low, high } => {
                write!(f, "Invalid reclassification interval [{low}, {high}]")
            }
            FireDangerError::InvalidScenario {
                field,
                value,
                reason,
            } => write!(f, "Invalid climate scenario: {field} = {value} ({reason})"),
            FireDangerError::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {parameter} value {value} ({reason})"),
            FireDangerError::Domain(msg) => write!(f, "Model domain error: {msg}"),
        }
    }
}

impl std::error::Error for FireDangerError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, FireDangerError>;
