//! C interface to the fire danger model
//!
//! One call runs the default model (reference classification table and
//! vegetation parameters) over a caller-owned land-cover buffer and writes the
//! fuel type, danger index and rate of spread per cell into caller-owned
//! output buffers. Missing values are written as fuel code 0 and `NaN`.
//!
//! Errors are reported as a [`FireDangerErrorCode`]; the message is available
//! through `fire_danger_get_last_error()` on the same thread.

mod error;
mod helpers;

pub use error::{fire_danger_get_last_error, fire_danger_get_last_error_code, FireDangerErrorCode};

use error::DefaultFfiError;
use fire_danger_core::{model, ClimateScenario, FireDangerModel, LandCoverRaster};
use helpers::{clear_last_error, track_error, track_result};
use std::slice;

/// Climate inputs for one scenario
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireDangerClimate {
    /// Air temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Wind speed at 10 m (km/h)
    pub wind_speed: f64,
    /// Keetch-Byram drought index (0-800)
    pub drought_index: f64,
    pub days_since_rain: u32,
    /// Amount of the last rain event (mm)
    pub last_rain: f64,
}

impl From<FireDangerClimate> for ClimateScenario {
    fn from(climate: FireDangerClimate) -> Self {
        ClimateScenario::new(
            climate.temperature,
            climate.humidity,
            climate.wind_speed,
            climate.drought_index,
            climate.days_since_rain,
            climate.last_rain,
        )
    }
}

/// Row-major land-cover grid
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FireDangerGrid {
    pub width: usize,
    pub height: usize,
    /// `width * height` land-cover codes
    pub land_cover: *const i32,
    /// Whether `nodata` marks missing cells
    pub has_nodata: bool,
    pub nodata: i32,
}

/// Caller-owned output buffers, each `width * height` long.
///
/// A null buffer is skipped.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FireDangerOutputs {
    /// Fuel type id 1-6, 0 where unclassified
    pub fuel_types: *mut u8,
    /// Danger index, `NaN` where missing
    pub danger: *mut f64,
    /// Rate of spread, `NaN` where missing
    pub spread: *mut f64,
}

/// Drought factor for a climate scenario.
///
/// # Returns
/// `FireDangerErrorCode::Ok` and the factor in `out`, or an error code with
/// `out` left untouched.
///
/// # Safety
/// `climate` must point to a valid `FireDangerClimate` and `out` to a
/// writable `double`.
#[no_mangle]
pub unsafe extern "C" fn fire_danger_drought_factor(
    climate: *const FireDangerClimate,
    out: *mut f64,
) -> FireDangerErrorCode {
    if climate.is_null() {
        return track_error(&DefaultFfiError::null_pointer("climate"));
    }
    if out.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out"));
    }

    // SAFETY: checked non-null above, validity is the caller's contract
    let scenario = ClimateScenario::from(unsafe { *climate });
    let result = scenario
        .validate()
        .and_then(|()| model::drought_factor(&scenario));
    match track_result(result) {
        Ok(drought) => {
            // SAFETY: checked non-null above
            unsafe { *out = drought };
            clear_last_error();
            FireDangerErrorCode::Ok
        }
        Err(code) => code,
    }
}

/// Run the default fire danger model over a land-cover grid.
///
/// Nothing is written to `outputs` unless the whole run succeeds.
///
/// # Safety
/// - `grid`, `climate` and `outputs` must point to valid structs
/// - `grid.land_cover` must be readable for `width * height` values
/// - every non-null buffer in `outputs` must be writable for `width * height`
///   values and must not overlap the input
#[no_mangle]
pub unsafe extern "C" fn fire_danger_run(
    grid: *const FireDangerGrid,
    climate: *const FireDangerClimate,
    outputs: *const FireDangerOutputs,
) -> FireDangerErrorCode {
    if grid.is_null() {
        return track_error(&DefaultFfiError::null_pointer("grid"));
    }
    if climate.is_null() {
        return track_error(&DefaultFfiError::null_pointer("climate"));
    }
    if outputs.is_null() {
        return track_error(&DefaultFfiError::null_pointer("outputs"));
    }

    // SAFETY: all three checked non-null above
    let (grid, scenario, outputs) =
        unsafe { (*grid, ClimateScenario::from(*climate), *outputs) };

    if grid.land_cover.is_null() {
        return track_error(&DefaultFfiError::null_pointer("grid.land_cover"));
    }
    let Some(len) = grid.width.checked_mul(grid.height) else {
        return track_error(&DefaultFfiError::invalid_parameter(format!(
            "Grid of {}x{} cells is too large",
            grid.width, grid.height
        )));
    };

    // SAFETY: caller guarantees `len` readable codes
    let codes = unsafe { slice::from_raw_parts(grid.land_cover, len) }.to_vec();
    let nodata = grid.has_nodata.then_some(grid.nodata);

    let result = LandCoverRaster::new(grid.width, grid.height, codes, nodata).and_then(|land_cover| {
        let model = FireDangerModel::default();
        let landscape = model.prepare(&land_cover);
        model
            .run(&landscape, &scenario)
            .map(|run| (landscape, run))
    });
    let (landscape, run) = match track_result(result) {
        Ok(results) => results,
        Err(code) => return code,
    };

    if !outputs.fuel_types.is_null() {
        // SAFETY: caller guarantees `len` writable cells
        unsafe { slice::from_raw_parts_mut(outputs.fuel_types, len) }
            .copy_from_slice(&landscape.fuel().to_fuel_codes());
    }
    if !outputs.danger.is_null() {
        // SAFETY: as above
        unsafe { slice::from_raw_parts_mut(outputs.danger, len) }
            .copy_from_slice(&run.danger.to_nan_filled());
    }
    if !outputs.spread.is_null() {
        // SAFETY: as above
        unsafe { slice::from_raw_parts_mut(outputs.spread, len) }
            .copy_from_slice(&run.spread.to_nan_filled());
    }

    clear_last_error();
    FireDangerErrorCode::Ok
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::ptr;

    fn reference_climate() -> FireDangerClimate {
        FireDangerClimate {
            temperature: 20.0,
            humidity: 50.0,
            wind_speed: 10.0,
            drought_index: 400.0,
            days_since_rain: 1,
            last_rain: 10.0,
        }
    }

    fn last_error() -> String {
        let message = fire_danger_get_last_error();
        assert!(!message.is_null());
        unsafe { CStr::from_ptr(message) }
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_drought_factor_reference() {
        let climate = reference_climate();
        let mut out = 0.0;
        let code = unsafe { fire_danger_drought_factor(&climate, &mut out) };

        assert_eq!(code, FireDangerErrorCode::Ok);
        assert!((out - 14.363515348884016).abs() < 1e-9);
        assert!(fire_danger_get_last_error().is_null());
    }

    #[test]
    fn test_drought_factor_rejects_invalid_climate() {
        let climate = FireDangerClimate {
            humidity: 150.0,
            ..reference_climate()
        };
        let mut out = -1.0;
        let code = unsafe { fire_danger_drought_factor(&climate, &mut out) };

        assert_eq!(code, FireDangerErrorCode::InvalidScenario);
        assert_eq!(fire_danger_get_last_error_code(), FireDangerErrorCode::InvalidScenario);
        assert_eq!(out, -1.0);
        assert!(last_error().contains("humidity"));
    }

    #[test]
    fn test_null_climate() {
        let mut out = 0.0;
        let code = unsafe { fire_danger_drought_factor(ptr::null(), &mut out) };
        assert_eq!(code, FireDangerErrorCode::NullPointer);
        assert_eq!(last_error(), "Parameter 'climate' cannot be null");
    }

    #[test]
    fn test_run_writes_all_outputs() {
        // Deciduous, Grassland, Non-Veg, no-data
        let land_cover = [1, 4, 12, -9999];
        let grid = FireDangerGrid {
            width: 2,
            height: 2,
            land_cover: land_cover.as_ptr(),
            has_nodata: true,
            nodata: -9999,
        };
        let mut fuel_types = [0xFF_u8; 4];
        let mut danger = [0.0; 4];
        let mut spread = [0.0; 4];
        let outputs = FireDangerOutputs {
            fuel_types: fuel_types.as_mut_ptr(),
            danger: danger.as_mut_ptr(),
            spread: spread.as_mut_ptr(),
        };

        let code = unsafe { fire_danger_run(&grid, &reference_climate(), &outputs) };

        assert_eq!(code, FireDangerErrorCode::Ok);
        assert_eq!(fuel_types, [1, 4, 6, 0]);
        assert!((danger[1] - 1.7674079635931041).abs() < 1e-9);
        assert!((danger[0] - 8.34643821206002).abs() < 1e-9);
        assert_eq!(danger[2], 0.0);
        assert!(danger[3].is_nan());
        assert_eq!(spread[2], 0.0);
        assert!(spread[3].is_nan());
    }

    #[test]
    fn test_run_skips_null_outputs() {
        let land_cover = [4, 4];
        let grid = FireDangerGrid {
            width: 2,
            height: 1,
            land_cover: land_cover.as_ptr(),
            has_nodata: false,
            nodata: 0,
        };
        let mut danger = [0.0; 2];
        let outputs = FireDangerOutputs {
            fuel_types: ptr::null_mut(),
            danger: danger.as_mut_ptr(),
            spread: ptr::null_mut(),
        };

        let code = unsafe { fire_danger_run(&grid, &reference_climate(), &outputs) };
        assert_eq!(code, FireDangerErrorCode::Ok);
        assert!(danger.iter().all(|d| d.is_finite() && *d > 0.0));
    }

    #[test]
    fn test_run_domain_error_leaves_outputs_untouched() {
        let land_cover = [4];
        let grid = FireDangerGrid {
            width: 1,
            height: 1,
            land_cover: land_cover.as_ptr(),
            has_nodata: false,
            nodata: 0,
        };
        let climate = FireDangerClimate {
            temperature: -12.0,
            ..reference_climate()
        };
        let mut danger = [42.0];
        let outputs = FireDangerOutputs {
            fuel_types: ptr::null_mut(),
            danger: danger.as_mut_ptr(),
            spread: ptr::null_mut(),
        };

        let code = unsafe { fire_danger_run(&grid, &climate, &outputs) };
        assert_eq!(code, FireDangerErrorCode::Domain);
        assert_eq!(danger, [42.0]);
    }

    #[test]
    fn test_run_rejects_null_land_cover() {
        let grid = FireDangerGrid {
            width: 1,
            height: 1,
            land_cover: ptr::null(),
            has_nodata: false,
            nodata: 0,
        };
        let outputs = FireDangerOutputs {
            fuel_types: ptr::null_mut(),
            danger: ptr::null_mut(),
            spread: ptr::null_mut(),
        };
        let code = unsafe { fire_danger_run(&grid, &reference_climate(), &outputs) };
        assert_eq!(code, FireDangerErrorCode::NullPointer);
    }
}
