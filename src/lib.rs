//! NPK Planner
//!
//! Recommends nitrogen, phosphorus and potassium application levels for a
//! crop plot by exhaustive multi-objective search over a discretized grid.
//!
//! Module layout:
//! - `objectives/`: yield, cost and environmental-impact models
//! - `search/`: candidate generation, constraint filter, Pareto frontier, ideal-point selection
//! - `planner`: the end-to-end `optimize` entry point (sequential and Rayon-parallel)
//! - `products`: maps the chosen point to commercial fertilizer blends
//! - `water`: stage-based weekly irrigation schedule
//! - `table`: Polars candidate table for rendering and CSV export
//! - `utils/`: normalization and area units

pub mod error;
pub mod config;
pub mod objectives;
pub mod search;
pub mod planner;
pub mod products;
pub mod water;
pub mod table;
pub mod utils;

// Re-export commonly used types
pub use error::EngineError;
pub use config::{Configuration, Goal, SearchParams, Thresholds, UnitCosts, GridSpec};
pub use objectives::{NutrientLevels, Objectives};
pub use search::{Candidate, Selection};
pub use planner::{optimize, Optimization, Planner, SearchLimits, DEFAULT_MAX_GRID_POINTS};
pub use products::{map_products, recommend_products, Blend, BlendStrategy, ProductQuantity};
pub use water::{plan_water, CropTable, IrrigationTable, WaterPlanError, WaterRequest, WaterSchedule};
pub use utils::AreaUnit;
