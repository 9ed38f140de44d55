//! Utility modules shared by the engine and its downstream consumers
//!
//! - Normalization: min-max scaling across a candidate set
//! - Units: plot area units and their conversions

pub mod normalization;
pub mod units;

// Re-export commonly used types
pub use normalization::{MinMax, NORMALIZATION_EPSILON};
pub use units::AreaUnit;
