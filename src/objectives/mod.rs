//! Objective Model
//!
//! Each objective lives in its own module:
//! - `crop_yield`: logarithmic yield response (higher is better)
//! - `application_cost`: linear price of the application (lower is better)
//! - `environmental_impact`: quadratic runoff/leaching penalty (lower is better)
//!
//! All three are pure functions of the nutrient levels (and unit prices for cost).

pub mod crop_yield;
pub mod application_cost;
pub mod environmental_impact;

pub use crop_yield::calculate_yield;
pub use application_cost::calculate_cost;
pub use environmental_impact::calculate_impact;

use crate::config::UnitCosts;
use serde::{Deserialize, Serialize};

/// One point of the N×P×K grid, in nutrient units per unit area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NutrientLevels {
    pub n: u32,
    pub p: u32,
    pub k: u32,
}

impl NutrientLevels {
    pub const ZERO: NutrientLevels = NutrientLevels { n: 0, p: 0, k: 0 };

    pub fn new(n: u32, p: u32, k: u32) -> Self {
        Self { n, p, k }
    }

    pub(crate) fn as_f64(&self) -> (f64, f64, f64) {
        (f64::from(self.n), f64::from(self.p), f64::from(self.k))
    }
}

/// Scores of one application on the three objectives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    pub crop_yield: f64,
    pub cost: f64,
    pub env_impact: f64,
}

impl Objectives {
    /// Minimization form used for dominance: (−Yield, Cost, Env)
    pub fn effective(&self) -> [f64; 3] {
        [-self.crop_yield, self.cost, self.env_impact]
    }

    /// Natural orientation used by the selector: (Yield, Cost, Env)
    pub fn as_array(&self) -> [f64; 3] {
        [self.crop_yield, self.cost, self.env_impact]
    }
}

/// Evaluate all three objectives for one grid point
pub fn evaluate(levels: NutrientLevels, costs: &UnitCosts) -> Objectives {
    Objectives {
        crop_yield: calculate_yield(levels),
        cost: calculate_cost(levels, costs),
        env_impact: calculate_impact(levels),
    }
}
