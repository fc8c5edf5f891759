//! Source land-cover classification grid
//!
//! Single-band integer codes as read from a raster interchange file by an
//! external loader, together with the file's no-data sentinel. Reading the file
//! itself is left to the caller.

use crate::error::Result;
use crate::grid::Raster;

/// Land-cover code raster with an optional no-data value
#[derive(Debug, Clone, PartialEq)]
pub struct LandCoverRaster {
    codes: Raster<i32>,
    nodata: Option<i32>,
}

impl LandCoverRaster {
    /// Wrap a row-major code buffer
    ///
    /// # Arguments
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `codes` - Land-cover codes, row-major
    /// * `nodata` - Sentinel marking cells without data, if the source defines one
    ///
    /// # Errors
    /// Returns an error if grid dimensions don't match data length or the cell
    /// count overflows
    pub fn new(width: usize, height: usize, codes: Vec<i32>, nodata: Option<i32>) -> Result<Self> {
        Ok(Self {
            codes: Raster::from_vec(width, height, codes)?,
            nodata,
        })
    }

    /// Underlying code raster, no-data cells included verbatim
    #[must_use]
    pub fn codes(&self) -> &Raster<i32> {
        &self.codes
    }

    #[must_use]
    pub fn nodata(&self) -> Option<i32> {
        self.nodata
    }

    /// `(width, height)`
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        self.codes.dimensions()
    }

    /// Code for a cell value, or `None` if it is the no-data sentinel
    #[inline]
    #[must_use]
    pub fn valid_code(&self, code: i32) -> Option<i32> {
        match self.nodata {
            Some(nodata) if nodata == code => None,
            _ => Some(code),
        }
    }
}

/// Create a simple test land-cover grid (for testing without a source file)
///
/// Stripes every code 1-21 across the grid, one code per column.
#[cfg(test)]
pub(crate) fn create_test_land_cover(width: usize, height: usize) -> LandCoverRaster {
    let codes = (0..width * height)
        .map(|idx| (idx % width % 21) as i32 + 1)
        .collect();
    LandCoverRaster::new(width, height, codes, None).unwrap()
}
