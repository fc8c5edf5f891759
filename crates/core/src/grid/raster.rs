//! Generic row-major raster shared by every stage of the pipeline.
//!
//! Missing cells are modelled as `Option` values inside the raster, never as
//! sentinel numbers. Per-cell maps run on the rayon pool; cells are
//! independent so no ordering is required between them.

use crate::core_types::FuelType;
use crate::error::{FireDangerError, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Fuel type per cell; `None` where the land cover was no-data or unmatched
pub type FuelTypeRaster = Raster<Option<FuelType>>;

/// Floating point value per cell; `None` marks missing data
pub type ValueRaster = Raster<Option<f64>>;

/// Row-major 2-D grid of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raster<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Require `len == width * height` without overflowing
fn check_cell_count(width: usize, height: usize, len: usize) -> Result<()> {
    if width.checked_mul(height) == Some(len) {
        Ok(())
    } else {
        Err(FireDangerError::InvalidDimensions { width, height, len })
    }
}

impl<T> Raster<T> {
    /// Build a raster from a row-major cell buffer
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidDimensions`] if `cells.len() != width * height`
    /// or the cell count overflows.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> Result<Self> {
        check_cell_count(width, height, cells.len())?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Raster with the same shape as `shape`, from a buffer produced by a
    /// per-cell pass over it
    pub(crate) fn with_shape_of<U>(shape: &Raster<U>, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), shape.len());
        Self {
            width: shape.width,
            height: shape.height,
            cells,
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major cell slice
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Cell at `(col, row)`, or `None` outside the grid
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<&T> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// One row of cells
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[T]> {
        if row >= self.height {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Consume the raster and return its cell buffer
    #[must_use]
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Check that `other` is aligned with this raster.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InputShape`] when the dimensions differ.
    pub fn ensure_same_shape<U>(&self, other: &Raster<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(FireDangerError::InputShape {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(())
    }
}

impl<T: Sync> Raster<T> {
    /// Apply `f` to every cell in parallel, producing a raster of the same shape
    pub fn map<U, F>(&self, f: F) -> Raster<U>
    where
        U: Send,
        F: Fn(&T) -> U + Sync + Send,
    {
        let cells = self.cells.par_iter().map(f).collect();
        Raster::with_shape_of(self, cells)
    }

    /// Combine two aligned rasters cell by cell.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InputShape`] when the rasters are not aligned.
    pub fn zip_map<U, V, F>(&self, other: &Raster<U>, f: F) -> Result<Raster<V>>
    where
        U: Sync,
        V: Send,
        F: Fn(&T, &U) -> V + Sync + Send,
    {
        self.ensure_same_shape(other)?;
        let cells = self
            .cells
            .par_iter()
            .zip(other.cells.par_iter())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Raster::with_shape_of(self, cells))
    }
}

impl<T: Clone> Raster<T> {
    /// Raster with every cell set to `value`
    ///
    /// An overflowing cell count fails the allocation like any oversized `Vec`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width.saturating_mul(height)],
        }
    }
}

impl Raster<Option<FuelType>> {
    /// Build a fuel-type raster from raw integer IDs (0 = missing).
    ///
    /// Guards against corrupt or foreign fuel rasters supplied from outside
    /// the classifier.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidDimensions`] for a mis-sized buffer and
    /// [`FireDangerError::UnknownFuelType`] for any code other than 0-6.
    pub fn from_fuel_codes(width: usize, height: usize, codes: &[u8]) -> Result<Self> {
        check_cell_count(width, height, codes.len())?;
        let cells = codes
            .iter()
            .enumerate()
            .map(|(index, &code)| match code {
                0 => Ok(None),
                code => FuelType::try_from(code)
                    .map(Some)
                    .map_err(|code| FireDangerError::UnknownFuelType { code, index }),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_vec(width, height, cells)
    }

    /// Export as integer IDs 1-6, with 0 for missing cells
    #[must_use]
    pub fn to_fuel_codes(&self) -> Vec<u8> {
        self.cells
            .par_iter()
            .map(|cell| cell.map_or(0, FuelType::id))
            .collect()
    }

    /// Number of cells of one fuel type
    #[must_use]
    pub fn count(&self, fuel_type: FuelType) -> usize {
        self.cells
            .par_iter()
            .filter(|cell| **cell == Some(fuel_type))
            .count()
    }
}

impl Raster<Option<f64>> {
    /// Maximum over the cells whose fuel type is `fuel_type`.
    ///
    /// Missing cells are excluded. Returns `None` when the subset has no
    /// defined value (including when the fuel type does not occur at all).
    ///
    /// # Errors
    /// Returns [`FireDangerError::InputShape`] when the rasters are not aligned.
    pub fn max_over(&self, fuel: &FuelTypeRaster, fuel_type: FuelType) -> Result<Option<f64>> {
        self.ensure_same_shape(fuel)?;
        Ok(self
            .cells
            .par_iter()
            .zip(fuel.cells.par_iter())
            .filter_map(|(value, cell)| match cell {
                Some(ft) if *ft == fuel_type => *value,
                _ => None,
            })
            .reduce_with(f64::max))
    }

    /// Number of missing cells
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.cells.par_iter().filter(|cell| cell.is_none()).count()
    }

    /// Export with `NaN` standing in for missing cells
    #[must_use]
    pub fn to_nan_filled(&self) -> Vec<f64> {
        self.cells
            .par_iter()
            .map(|cell| cell.unwrap_or(f64::NAN))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_size_mismatch() {
        let result = Raster::from_vec(10, 10, vec![1_i32; 50]);
        assert_eq!(
            result,
            Err(FireDangerError::InvalidDimensions {
                width: 10,
                height: 10,
                len: 50
            })
        );
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        // usize::MAX * 2 would wrap to usize::MAX - 1 without the check
        let result = Raster::<u8>::from_vec(usize::MAX, 2, Vec::new());
        assert_eq!(
            result,
            Err(FireDangerError::InvalidDimensions {
                width: usize::MAX,
                height: 2,
                len: 0
            })
        );
        assert!(FuelTypeRaster::from_fuel_codes(usize::MAX, usize::MAX, &[1]).is_err());
        assert!(Raster::<i32>::from_vec(0, 5, Vec::new()).is_ok());
    }

    #[test]
    fn test_row_major_indexing() {
        let raster = Raster::from_vec(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(raster.get(2, 0), Some(&2));
        assert_eq!(raster.get(0, 1), Some(&3));
        assert_eq!(raster.get(3, 0), None);
        assert_eq!(raster.row(1), Some(&[3, 4, 5][..]));
        assert_eq!(raster.row(2), None);
    }

    #[test]
    fn test_map_preserves_shape_and_order() {
        let raster = Raster::from_vec(4, 2, (0..8).collect::<Vec<i32>>()).unwrap();
        let doubled = raster.map(|v| v * 2);
        assert_eq!(doubled.dimensions(), (4, 2));
        assert_eq!(doubled.cells(), &[0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn test_zip_map_rejects_misaligned() {
        let a = Raster::filled(4, 3, 1.0_f64);
        let b = Raster::filled(3, 4, 1.0_f64);
        let result = a.zip_map(&b, |x, y| x + y);
        assert_eq!(
            result,
            Err(FireDangerError::InputShape {
                expected: (4, 3),
                found: (3, 4)
            })
        );
    }

    #[test]
    fn test_fuel_codes_guard() {
        let ok = FuelTypeRaster::from_fuel_codes(3, 1, &[0, 4, 6]).unwrap();
        assert_eq!(ok.cells(), &[None, Some(FuelType::Grassland), Some(FuelType::NonVeg)]);
        assert_eq!(ok.to_fuel_codes(), vec![0, 4, 6]);

        let err = FuelTypeRaster::from_fuel_codes(3, 1, &[1, 9, 2]).unwrap_err();
        assert_eq!(err, FireDangerError::UnknownFuelType { code: 9, index: 1 });
    }

    #[test]
    fn test_max_over_subset_skips_missing_and_other_types() {
        let fuel = FuelTypeRaster::from_fuel_codes(4, 1, &[4, 4, 5, 4]).unwrap();
        let values = Raster::from_vec(4, 1, vec![Some(1.0), None, Some(9.0), Some(3.0)]).unwrap();

        assert_eq!(values.max_over(&fuel, FuelType::Grassland).unwrap(), Some(3.0));
        assert_eq!(values.max_over(&fuel, FuelType::Heathland).unwrap(), Some(9.0));
        assert_eq!(values.max_over(&fuel, FuelType::Conifer).unwrap(), None);
    }

    #[test]
    fn test_nan_export() {
        let values = Raster::from_vec(2, 1, vec![Some(1.5), None]).unwrap();
        let exported = values.to_nan_filled();
        assert_eq!(exported[0], 1.5);
        assert!(exported[1].is_nan());
        assert_eq!(values.missing_count(), 1);
    }
}
