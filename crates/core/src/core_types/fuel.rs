//! Fuel types and per-fuel-type vegetation parameters
//!
//! The landscape is reduced to six coarse fuel types. Each one selects a
//! branch of the danger and spread formulas, and may carry a curing
//! percentage and a fuel load taken from a reference table.

use crate::core_types::units::{Percent, TonnesPerHectare};
use crate::error::{FireDangerError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse vegetation category driving the formula branch for a cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum FuelType {
    /// Broadleaf forest
    Deciduous = 1,
    /// Needleleaf forest
    Conifer = 2,
    /// Cropland
    Arable = 3,
    /// Natural and improved grassland
    Grassland = 4,
    /// Heath, moorland and shrub
    Heathland = 5,
    /// Water, rock, urban and other non-burnable cover
    NonVeg = 6,
}

impl FuelType {
    /// All fuel types in ID order
    pub const ALL: [FuelType; 6] = [
        FuelType::Deciduous,
        FuelType::Conifer,
        FuelType::Arable,
        FuelType::Grassland,
        FuelType::Heathland,
        FuelType::NonVeg,
    ];

    /// Integer ID (1-6) used in exported fuel-type rasters
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Human readable label for legends
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FuelType::Deciduous => "Deciduous",
            FuelType::Conifer => "Conifer",
            FuelType::Arable => "Arable",
            FuelType::Grassland => "Grassland",
            FuelType::Heathland => "Heathland",
            FuelType::NonVeg => "Non-Veg",
        }
    }

    /// Legend colour (RGB) for the rendering collaborator
    #[must_use]
    pub const fn legend_color(self) -> [u8; 3] {
        match self {
            FuelType::Deciduous => [0x4d, 0xa8, 0x3c],
            FuelType::Conifer => [0x1b, 0x5e, 0x20],
            FuelType::Arable => [0xe6, 0xc2, 0x29],
            FuelType::Grassland => [0xa6, 0xd9, 0x6a],
            FuelType::Heathland => [0x8e, 0x44, 0xad],
            FuelType::NonVeg => [0xbd, 0xbd, 0xbd],
        }
    }
}

impl TryFrom<u8> for FuelType {
    type Error = u8;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(FuelType::Deciduous),
            2 => Ok(FuelType::Conifer),
            3 => Ok(FuelType::Arable),
            4 => Ok(FuelType::Grassland),
            5 => Ok(FuelType::Heathland),
            6 => Ok(FuelType::NonVeg),
            other => Err(other),
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which vegetation parameter to read from a [`ParameterTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VegetationParameter {
    /// Dead fraction of the fuel, percent
    Curing,
    /// Fuel load, tonnes per hectare
    Biomass,
}

impl VegetationParameter {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            VegetationParameter::Curing => "curing",
            VegetationParameter::Biomass => "biomass",
        }
    }

    /// Check a raw value against the parameter's physical range.
    ///
    /// Curing must lie within 0-100 %, biomass must be finite and not negative.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidParameter`] for an out-of-range or
    /// non-finite value.
    pub fn check(self, value: f64) -> Result<f64> {
        let reason = if value.is_finite() {
            match self {
                VegetationParameter::Curing if !(0.0..=100.0).contains(&value) => {
                    Some("must be within 0-100 %")
                }
                VegetationParameter::Biomass if value < 0.0 => Some("must not be negative"),
                VegetationParameter::Curing | VegetationParameter::Biomass => None,
            }
        } else {
            Some("must be finite")
        };
        match reason {
            Some(reason) => Err(FireDangerError::InvalidParameter {
                parameter: self,
                value,
                reason,
            }),
            None => Ok(value),
        }
    }
}

impl fmt::Display for VegetationParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Vegetation parameters for one fuel type.
///
/// `None` means the fuel type has no value for that parameter; it never stands
/// for zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VegetationParameters {
    pub curing: Option<Percent>,
    pub biomass: Option<TonnesPerHectare>,
}

impl VegetationParameters {
    /// Parameters for a fuel type with no vegetation values
    pub const UNDEFINED: VegetationParameters = VegetationParameters {
        curing: None,
        biomass: None,
    };

    #[must_use]
    pub const fn new(curing: Option<Percent>, biomass: Option<TonnesPerHectare>) -> Self {
        Self { curing, biomass }
    }

    /// Raw value of the requested parameter, if defined
    #[must_use]
    pub fn get(&self, parameter: VegetationParameter) -> Option<f64> {
        match parameter {
            VegetationParameter::Curing => self.curing.map(Percent::value),
            VegetationParameter::Biomass => self.biomass.map(TonnesPerHectare::value),
        }
    }

    /// Check every defined value against its range.
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidParameter`] for the first bad value.
    pub fn validate(&self) -> Result<()> {
        for parameter in [VegetationParameter::Curing, VegetationParameter::Biomass] {
            if let Some(value) = self.get(parameter) {
                parameter.check(value)?;
            }
        }
        Ok(())
    }
}

/// Per-fuel-type curing and biomass table.
///
/// Fuel types absent from the table behave as if every parameter is undefined.
/// Every stored value has passed [`VegetationParameters::validate`], including
/// tables deserialized from a file.
///
/// # Example
/// ```
/// use fire_danger_core::{FuelType, ParameterTable, VegetationParameter};
///
/// let table = ParameterTable::reference();
/// assert_eq!(table.value(FuelType::Grassland, VegetationParameter::Curing), Some(29.1));
/// assert_eq!(table.value(FuelType::Arable, VegetationParameter::Biomass), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(
    try_from = "FxHashMap<FuelType, VegetationParameters>",
    into = "FxHashMap<FuelType, VegetationParameters>"
)]
pub struct ParameterTable {
    entries: FxHashMap<FuelType, VegetationParameters>,
}

impl ParameterTable {
    /// Empty table (every parameter undefined)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference vegetation table.
    ///
    /// Grassland values are the published reference (curing 29.1 %, load
    /// 0.716 t/ha). Forest and heath loads are representative litter and
    /// shrub loads. Arable and Non-Veg carry no values.
    #[must_use]
    pub fn reference() -> Self {
        let entries = [
            (
                FuelType::Deciduous,
                VegetationParameters::new(None, Some(TonnesPerHectare::new(12.0))),
            ),
            (
                FuelType::Conifer,
                VegetationParameters::new(None, Some(TonnesPerHectare::new(15.0))),
            ),
            (FuelType::Arable, VegetationParameters::UNDEFINED),
            (
                FuelType::Grassland,
                VegetationParameters::new(
                    Some(Percent::new(29.1)),
                    Some(TonnesPerHectare::new(0.716)),
                ),
            ),
            (
                FuelType::Heathland,
                VegetationParameters::new(
                    Some(Percent::new(45.0)),
                    Some(TonnesPerHectare::new(4.5)),
                ),
            ),
            (FuelType::NonVeg, VegetationParameters::UNDEFINED),
        ];
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Builder-style insert
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidParameter`] if a value is out of range.
    pub fn with(mut self, fuel_type: FuelType, parameters: VegetationParameters) -> Result<Self> {
        self.set(fuel_type, parameters)?;
        Ok(self)
    }

    /// Replace the parameters of one fuel type
    ///
    /// # Errors
    /// Returns [`FireDangerError::InvalidParameter`] if a value is out of range;
    /// the table is left unchanged.
    pub fn set(&mut self, fuel_type: FuelType, parameters: VegetationParameters) -> Result<()> {
        parameters.validate()?;
        self.entries.insert(fuel_type, parameters);
        Ok(())
    }

    /// Parameters for a fuel type (undefined if absent)
    #[must_use]
    pub fn get(&self, fuel_type: FuelType) -> VegetationParameters {
        self.entries
            .get(&fuel_type)
            .copied()
            .unwrap_or(VegetationParameters::UNDEFINED)
    }

    /// Raw value of one parameter for a fuel type, if defined
    #[must_use]
    pub fn value(&self, fuel_type: FuelType, parameter: VegetationParameter) -> Option<f64> {
        self.get(fuel_type).get(parameter)
    }
}

impl TryFrom<FxHashMap<FuelType, VegetationParameters>> for ParameterTable {
    type Error = FireDangerError;

    fn try_from(entries: FxHashMap<FuelType, VegetationParameters>) -> Result<Self> {
        entries.into_iter().try_fold(Self::new(), |table, (fuel_type, parameters)| {
            table.with(fuel_type, parameters)
        })
    }
}

impl From<ParameterTable> for FxHashMap<FuelType, VegetationParameters> {
    fn from(table: ParameterTable) -> Self {
        table.entries
    }
}
