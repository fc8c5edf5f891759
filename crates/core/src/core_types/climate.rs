//! Climate scenario inputs for one model run
//!
//! Climate is spatially uniform over the landscape: a scenario is a flat bundle
//! of six scalars. Scenarios are immutable values; a variation of a scenario
//! is a new value (see [`ClimateScenario::with_drought_index`]) so two runs can
//! be compared side by side.

use crate::core_types::units::{Celsius, KilometersPerHour, Millimeters, Percent};
use crate::error::{FireDangerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper end of the Keetch-Byram drought index scale
pub const MAX_DROUGHT_INDEX: f64 = 800.0;

/// Scalar climate inputs for a single model run
///
/// # Example
/// ```
/// use fire_danger_core::ClimateScenario;
///
/// let base = ClimateScenario::reference();
/// let drier = base.with_drought_index(600.0);
///
/// // The original scenario is untouched
/// assert_eq!(base.drought_index, 400.0);
/// assert_eq!(drier.drought_index, 600.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateScenario {
    /// Air temperature (°C)
    pub temperature: Celsius,
    /// Relative humidity (%)
    pub humidity: Percent,
    /// Wind speed (km/h)
    pub wind_speed: KilometersPerHour,
    /// Keetch-Byram drought index (0-800)
    pub drought_index: f64,
    /// Days since the last rain event
    pub days_since_rain: u32,
    /// Amount of the last rain event (mm)
    pub last_rain: Millimeters,
}

impl ClimateScenario {
    /// Create a scenario from raw values
    ///
    /// # Arguments
    /// * `temperature` - Air temperature in °C
    /// * `humidity` - Relative humidity in %
    /// * `wind_speed` - Wind speed in km/h
    /// * `drought_index` - KBDI, 0-800
    /// * `days_since_rain` - Whole days since the last rain
    /// * `last_rain` - Last rain amount in mm
    #[must_use]
    pub fn new(
        temperature: f64,
        humidity: f64,
        wind_speed: f64,
        drought_index: f64,
        days_since_rain: u32,
        last_rain: f64,
    ) -> Self {
        ClimateScenario {
            temperature: Celsius::new(temperature),
            humidity: Percent::new(humidity),
            wind_speed: KilometersPerHour::new(wind_speed),
            drought_index,
            days_since_rain,
            last_rain: Millimeters::new(last_rain),
        }
    }

    /// Reference scenario used to check the grass meter:
    /// 20°C, 50% RH, 10 km/h, KBDI 400, one day since 10 mm of rain
    #[must_use]
    pub fn reference() -> Self {
        Self::new(20.0, 50.0, 10.0, 400.0, 1, 10.0)
    }

    /// Warm, moderately dry afternoon
    #[must_use]
    pub fn moderate() -> Self {
        Self::new(28.0, 35.0, 20.0, 300.0, 5, 4.0)
    }

    /// Hot, dry and windy after a long dry spell
    #[must_use]
    pub fn severe() -> Self {
        Self::new(40.0, 12.0, 45.0, 650.0, 20, 2.0)
    }

    /// Copy of this scenario with a different drought index
    #[must_use]
    pub fn with_drought_index(self, drought_index: f64) -> Self {
        Self {
            drought_index,
            ..self
        }
    }

    /// Copy of this scenario with a different wind speed
    #[must_use]
    pub fn with_wind_speed(self, wind_speed: f64) -> Self {
        Self {
            wind_speed: KilometersPerHour::new(wind_speed),
            ..self
        }
    }

    /// Check every field against its physical range.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidScenario`] naming the first offending
    /// field: non-finite values, humidity outside 0-100 %, negative wind,
    /// drought index outside 0-800 or negative rainfall.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("temperature", *self.temperature),
            ("humidity", *self.humidity),
            ("wind_speed", *self.wind_speed),
            ("drought_index", self.drought_index),
            ("last_rain", *self.last_rain),
        ];
        for (field, value) in checks {
            if !value.is_finite() {
                return Err(FireDangerError::InvalidScenario {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
        }

        if !(0.0..=100.0).contains(&*self.humidity) {
            return Err(FireDangerError::InvalidScenario {
                field: "humidity",
                value: *self.humidity,
                reason: "must be within 0-100 %",
            });
        }
        if *self.wind_speed < 0.0 {
            return Err(FireDangerError::InvalidScenario {
                field: "wind_speed",
                value: *self.wind_speed,
                reason: "must not be negative",
            });
        }
        if !(0.0..=MAX_DROUGHT_INDEX).contains(&self.drought_index) {
            return Err(FireDangerError::InvalidScenario {
                field: "drought_index",
                value: self.drought_index,
                reason: "must be within 0-800",
            });
        }
        if *self.last_rain < 0.0 {
            return Err(FireDangerError::InvalidScenario {
                field: "last_rain",
                value: *self.last_rain,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

impl Default for ClimateScenario {
    fn default() -> Self {
        Self::reference()
    }
}

impl fmt::Display for ClimateScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T={} RH={} V={} KBDI={:.0} days={} rain={}",
            self.temperature,
            self.humidity,
            self.wind_speed,
            self.drought_index,
            self.days_since_rain,
            self.last_rain
        )
    }
}
