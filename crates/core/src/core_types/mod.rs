//! Core types and utilities

pub mod climate;
pub mod fuel;
pub mod units;

pub use climate::*;
pub use fuel::*;
pub use units::*;
