//! Per-cell vegetation parameter assignment
//!
//! Looks up each cell's fuel type in a [`ParameterTable`] and writes the
//! requested value. Fuel types without a value (Arable and Non-Veg in the
//! reference table) and unclassified cells become missing, never zero.

use crate::core_types::{FuelType, ParameterTable, VegetationParameter};
use crate::grid::{FuelTypeRaster, ValueRaster};

/// Assign one vegetation parameter to every cell
pub fn assign_parameter(
    fuel: &FuelTypeRaster,
    table: &ParameterTable,
    parameter: VegetationParameter,
) -> ValueRaster {
    // Resolve the table once so the per-cell pass is a plain array lookup (IDs are 1-6)
    let mut by_id: [Option<f64>; 7] = [None; 7];
    for fuel_type in FuelType::ALL {
        by_id[usize::from(fuel_type.id())] = table.value(fuel_type, parameter);
    }

    fuel.map(|cell| cell.and_then(|fuel_type| by_id[usize::from(fuel_type.id())]))
}

/// Curing raster (percent)
pub fn assign_curing(fuel: &FuelTypeRaster, table: &ParameterTable) -> ValueRaster {
    assign_parameter(fuel, table, VegetationParameter::Curing)
}

/// Biomass raster (t/ha)
pub fn assign_biomass(fuel: &FuelTypeRaster, table: &ParameterTable) -> ValueRaster {
    assign_parameter(fuel, table, VegetationParameter::Biomass)
}
