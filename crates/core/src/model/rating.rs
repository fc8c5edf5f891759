//! Fire danger rating classes
//!
//! Buckets danger index values into the Bureau of Meteorology rating
//! categories used with the `McArthur` meters.

use crate::grid::{Raster, ValueRaster};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Danger index threshold constants based on Australian Bureau of Meteorology standards.
///
/// Note: Rust `Range` types use **inclusive lower bound and exclusive upper bound** [a, b).
///
/// Reference: Australian Bureau of Meteorology and `McArthur` (1967) FFDI classification.
pub mod danger_ranges {
    use std::ops::{Range, RangeFrom};

    /// "Low" rating range `[0.0, 5.0)`
    pub const LOW: Range<f64> = 0.0..5.0;

    /// "Moderate" rating range `[5.0, 12.0)`
    pub const MODERATE: Range<f64> = 5.0..12.0;

    /// "High" rating range `[12.0, 24.0)`
    pub const HIGH: Range<f64> = 12.0..24.0;

    /// "Very High" rating range `[24.0, 50.0)`
    pub const VERY_HIGH: Range<f64> = 24.0..50.0;

    /// "Severe" rating range `[50.0, 100.0)`
    pub const SEVERE: Range<f64> = 50.0..100.0;

    /// "Extreme" rating range `[100.0, 150.0)`
    pub const EXTREME: Range<f64> = 100.0..150.0;

    /// "Catastrophic" (Code Red) rating `[150.0, ∞)`
    pub const CATASTROPHIC: RangeFrom<f64> = 150.0..;
}

/// Fire danger rating category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DangerRating {
    Low,
    Moderate,
    High,
    VeryHigh,
    Severe,
    Extreme,
    Catastrophic,
}

impl DangerRating {
    /// Rating for a danger index value (negative and NaN values rate as Low)
    #[must_use]
    pub fn from_index(index: f64) -> Self {
        match index {
            _ if index.is_nan() || index < danger_ranges::LOW.end => DangerRating::Low,
            _ if danger_ranges::MODERATE.contains(&index) => DangerRating::Moderate,
            _ if danger_ranges::HIGH.contains(&index) => DangerRating::High,
            _ if danger_ranges::VERY_HIGH.contains(&index) => DangerRating::VeryHigh,
            _ if danger_ranges::SEVERE.contains(&index) => DangerRating::Severe,
            _ if danger_ranges::EXTREME.contains(&index) => DangerRating::Extreme,
            _ => {
                debug_assert!(danger_ranges::CATASTROPHIC.contains(&index));
                DangerRating::Catastrophic // Code Red
            }
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DangerRating::Low => "Low",
            DangerRating::Moderate => "Moderate",
            DangerRating::High => "High",
            DangerRating::VeryHigh => "Very High",
            DangerRating::Severe => "Severe",
            DangerRating::Extreme => "Extreme",
            DangerRating::Catastrophic => "CATASTROPHIC",
        }
    }
}

impl fmt::Display for DangerRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rate every cell of a danger raster; missing cells stay missing
pub fn rate_danger(danger: &ValueRaster) -> Raster<Option<DangerRating>> {
    danger.map(|cell| cell.map(DangerRating::from_index))
}
