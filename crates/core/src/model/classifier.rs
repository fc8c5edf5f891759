//! Land-cover code → fuel type reclassification
//!
//! Maps raw land-cover codes to the six fuel types through an ordered list of
//! closed code intervals. The first interval containing a code wins.
//!
//! # Reference land-cover codes
//!
//! - Code 1: Broadleaf woodland → Deciduous
//! - Code 2: Coniferous woodland → Conifer
//! - Code 3: Arable and horticulture → Arable
//! - Codes 4-7: Improved, neutral, calcareous and acid grassland → Grassland
//! - Code 8: Fen, marsh and swamp → Non-Veg
//! - Codes 9-10: Heather and heather grassland → Heathland
//! - Codes 11-21: Bog, inland rock, water, coastal, urban and suburban → Non-Veg

use crate::core_types::FuelType;
use crate::error::{FireDangerError, Result};
use crate::grid::{FuelTypeRaster, LandCoverRaster};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One closed interval `[low, high]` of land-cover codes mapped to a fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclassRule {
    pub low: i32,
    pub high: i32,
    pub fuel_type: FuelType,
}

impl ReclassRule {
    #[must_use]
    pub const fn new(low: i32, high: i32, fuel_type: FuelType) -> Self {
        Self {
            low,
            high,
            fuel_type,
        }
    }

    /// Rule for a single code
    #[must_use]
    pub const fn single(code: i32, fuel_type: FuelType) -> Self {
        Self::new(code, code, fuel_type)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, code: i32) -> bool {
        (self.low..=self.high).contains(&code)
    }
}

/// Ordered reclassification rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclassTable {
    rules: Vec<ReclassRule>,
}

impl ReclassTable {
    /// Build a table, rejecting inverted intervals
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidRule`] for the first rule with `low > high`.
    pub fn new(rules: Vec<ReclassRule>) -> Result<Self> {
        if let Some(bad) = rules.iter().find(|rule| rule.low > rule.high) {
            return Err(FireDangerError::InvalidRule {
                low: bad.low,
                high: bad.high,
            });
        }
        Ok(Self { rules })
    }

    /// Reference land-cover table
    #[must_use]
    pub fn reference() -> Self {
        Self {
            rules: vec![
                ReclassRule::single(1, FuelType::Deciduous),
                ReclassRule::single(2, FuelType::Conifer),
                ReclassRule::single(3, FuelType::Arable),
                ReclassRule::new(4, 7, FuelType::Grassland),
                ReclassRule::new(9, 10, FuelType::Heathland),
                ReclassRule::single(8, FuelType::NonVeg),
                ReclassRule::new(11, 21, FuelType::NonVeg),
            ],
        }
    }

    #[must_use]
    pub fn rules(&self) -> &[ReclassRule] {
        &self.rules
    }

    /// Fuel type of the first rule containing `code`
    #[must_use]
    pub fn lookup(&self, code: i32) -> Option<FuelType> {
        self.rules
            .iter()
            .find(|rule| rule.contains(code))
            .map(|rule| rule.fuel_type)
    }
}

impl Default for ReclassTable {
    fn default() -> Self {
        Self::reference()
    }
}

/// Reclassify a land-cover raster into fuel types.
///
/// No-data cells and codes matched by no rule become missing; they are never
/// defaulted to a fuel type. Pure: the same input always yields the same output.
pub fn classify(land_cover: &LandCoverRaster, table: &ReclassTable) -> FuelTypeRaster {
    let fuel = land_cover
        .codes()
        .map(|&code| land_cover.valid_code(code).and_then(|code| table.lookup(code)));

    let missing = fuel.cells().iter().filter(|cell| cell.is_none()).count();
    debug!(
        "Classified {}x{} land cover: {} cells without a fuel type",
        fuel.width(),
        fuel.height(),
        missing
    );

    fuel
}

/// Cell count per fuel type (missing cells are not counted)
pub fn fuel_type_histogram(fuel: &FuelTypeRaster) -> FxHashMap<FuelType, usize> {
    let mut histogram = FxHashMap::default();
    for fuel_type in fuel.cells().iter().flatten() {
        *histogram.entry(*fuel_type).or_insert(0) += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::land_cover::create_test_land_cover;

    #[test]
    fn test_reference_codes() {
        let table = ReclassTable::reference();

        assert_eq!(table.lookup(1), Some(FuelType::Deciduous));
        assert_eq!(table.lookup(2), Some(FuelType::Conifer));
        assert_eq!(table.lookup(3), Some(FuelType::Arable));
        for code in 4..=7 {
            assert_eq!(table.lookup(code), Some(FuelType::Grassland), "code {code}");
        }
        for code in [9, 10] {
            assert_eq!(table.lookup(code), Some(FuelType::Heathland), "code {code}");
        }
        for code in std::iter::once(8).chain(11..=21) {
            assert_eq!(table.lookup(code), Some(FuelType::NonVeg), "code {code}");
        }
    }

    #[test]
    fn test_unmatched_codes_are_missing() {
        let table = ReclassTable::reference();
        assert_eq!(table.lookup(0), None);
        assert_eq!(table.lookup(22), None);
        assert_eq!(table.lookup(-9999), None);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let table = ReclassTable::new(vec![
            ReclassRule::new(1, 5, FuelType::Grassland),
            ReclassRule::new(3, 8, FuelType::Heathland),
        ])
        .unwrap();
        assert_eq!(table.lookup(4), Some(FuelType::Grassland));
        assert_eq!(table.lookup(6), Some(FuelType::Heathland));
    }

    #[test]
    fn test_inverted_rule_rejected() {
        let result = ReclassTable::new(vec![ReclassRule::new(10, 9, FuelType::Heathland)]);
        assert_eq!(result, Err(FireDangerError::InvalidRule { low: 10, high: 9 }));
    }

    #[test]
    fn test_classify_respects_nodata() {
        let land_cover =
            LandCoverRaster::new(4, 1, vec![1, -9999, 5, 30], Some(-9999)).unwrap();
        let fuel = classify(&land_cover, &ReclassTable::reference());

        assert_eq!(
            fuel.cells(),
            &[Some(FuelType::Deciduous), None, Some(FuelType::Grassland), None]
        );
    }

    #[test]
    fn test_classify_stripes_and_histogram() {
        let land_cover = create_test_land_cover(21, 3);
        let fuel = classify(&land_cover, &ReclassTable::reference());
        let histogram = fuel_type_histogram(&fuel);

        assert_eq!(histogram[&FuelType::Deciduous], 3);
        assert_eq!(histogram[&FuelType::Grassland], 12);
        assert_eq!(histogram[&FuelType::Heathland], 6);
        assert_eq!(histogram[&FuelType::NonVeg], 36);
        assert_eq!(fuel.count(FuelType::Arable), 3);
    }
}
