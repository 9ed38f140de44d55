//! Search Configuration
//!
//! The caller-facing description of one optimization request: grid maxima and
//! step, per-unit nutrient prices, optional feasibility bounds and the goal.
//!
//! `Configuration` is what the caller builds (or deserializes from JSON).
//! `validate()` turns it into `SearchParams`, the typed form the engine runs on,
//! so nothing downstream re-checks ranges.

use crate::error::EngineError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Optimization goal, selects the weight vector of the ideal-point selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    Balanced,
    SaveMoney,
    MoreYield,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::Balanced, Goal::SaveMoney, Goal::MoreYield];

    /// Weights over normalized (Yield, Cost, Env) distance to the ideal point.
    /// A larger weight penalizes distance along that axis more.
    pub fn weights(self) -> [f64; 3] {
        match self {
            Goal::Balanced => [1.0, 1.0, 1.0],
            Goal::SaveMoney => [0.5, 2.0, 1.0],
            Goal::MoreYield => [2.0, 1.0, 1.0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Goal::Balanced => "Balanced",
            Goal::SaveMoney => "Save money",
            Goal::MoreYield => "More yield",
        }
    }
}

/// One optimization request as supplied by the caller
///
/// Threshold fields follow the form convention: absent or `0` means "no constraint".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub max_n: i64,
    pub max_p: i64,
    pub max_k: i64,
    pub step: i64,

    /// Price per unit of nutrient
    pub cost_n: f64,
    pub cost_p: f64,
    pub cost_k: f64,

    #[serde(default)]
    pub max_budget: Option<f64>,
    #[serde(default)]
    pub max_impact: Option<f64>,
    #[serde(default)]
    pub min_yield: Option<f64>,

    #[serde(default)]
    pub goal: Goal,
}

impl Default for Configuration {
    /// Form defaults: N ≤ 200, P ≤ 150, K ≤ 150 at step 10, prices 12/10/8
    fn default() -> Self {
        Self {
            max_n: 200,
            max_p: 150,
            max_k: 150,
            step: 10,
            cost_n: 12.0,
            cost_p: 10.0,
            cost_k: 8.0,
            max_budget: None,
            max_impact: None,
            min_yield: None,
            goal: Goal::Balanced,
        }
    }
}

/// Grid bounds after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub max_n: u32,
    pub max_p: u32,
    pub max_k: u32,
    pub step: u32,
}

impl GridSpec {
    /// Number of levels on one axis: 0, step, 2·step, … ≤ max
    pub fn axis_len(max: u32, step: u32) -> u64 {
        u64::from(max / step) + 1
    }

    /// Total grid size, `None` on u64 overflow
    pub fn point_count(&self) -> Option<u64> {
        Self::axis_len(self.max_n, self.step)
            .checked_mul(Self::axis_len(self.max_p, self.step))?
            .checked_mul(Self::axis_len(self.max_k, self.step))
    }
}

/// Per-unit nutrient prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCosts {
    pub n: f64,
    pub p: f64,
    pub k: f64,
}

/// Feasibility bounds with the "0 means unset" rule already applied
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thresholds {
    pub max_budget: Option<f64>,
    pub max_impact: Option<f64>,
    pub min_yield: Option<f64>,
}

impl Thresholds {
    /// Build from raw form values. `Some(0.0)` collapses to `None`.
    pub fn from_raw(max_budget: Option<f64>, max_impact: Option<f64>, min_yield: Option<f64>) -> Self {
        fn active(v: Option<f64>) -> Option<f64> {
            v.filter(|x| *x != 0.0)
        }
        Self {
            max_budget: active(max_budget),
            max_impact: active(max_impact),
            min_yield: active(min_yield),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.max_budget.is_none() && self.max_impact.is_none() && self.min_yield.is_none()
    }
}

/// Validated, typed form of a `Configuration`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub grid: GridSpec,
    pub costs: UnitCosts,
    pub thresholds: Thresholds,
    pub goal: Goal,
}

impl Configuration {
    /// Load a configuration from a JSON file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {:?}", path))?;

        let config: Configuration = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse configuration JSON")?;

        config
            .validate()
            .with_context(|| format!("Configuration rejected: {:?}", path))?;

        Ok(config)
    }

    /// Check ranges and produce the engine's typed parameters
    ///
    /// Rejected: step < 1, negative maxima, maxima beyond u32, negative or
    /// non-finite prices, negative or non-finite thresholds. A step larger
    /// than every maximum collapses the grid to the origin.
    pub fn validate(&self) -> Result<SearchParams, EngineError> {
        if self.step < 1 {
            return Err(EngineError::invalid(format!(
                "step must be at least 1 (got {})",
                self.step
            )));
        }
        let max_n = nutrient_max("max_n", self.max_n)?;
        let max_p = nutrient_max("max_p", self.max_p)?;
        let max_k = nutrient_max("max_k", self.max_k)?;

        // A step past every maximum reaches only the origin
        let grid = match u32::try_from(self.step) {
            Ok(step) if step <= max_n.max(max_p).max(max_k) => GridSpec { max_n, max_p, max_k, step },
            _ => GridSpec { max_n: 0, max_p: 0, max_k: 0, step: 1 },
        };

        let costs = UnitCosts {
            n: non_negative("cost_n", self.cost_n)?,
            p: non_negative("cost_p", self.cost_p)?,
            k: non_negative("cost_k", self.cost_k)?,
        };

        let max_budget = self.max_budget.map(|v| non_negative("max_budget", v)).transpose()?;
        let max_impact = self.max_impact.map(|v| non_negative("max_impact", v)).transpose()?;
        let min_yield = self.min_yield.map(|v| non_negative("min_yield", v)).transpose()?;

        Ok(SearchParams {
            grid,
            costs,
            thresholds: Thresholds::from_raw(max_budget, max_impact, min_yield),
            goal: self.goal,
        })
    }
}

fn nutrient_max(field: &str, value: i64) -> Result<u32, EngineError> {
    if value < 0 {
        return Err(EngineError::invalid(format!(
            "{} must be non-negative (got {})",
            field, value
        )));
    }
    u32::try_from(value)
        .map_err(|_| EngineError::invalid(format!("{} {} is out of range", field, value)))
}

fn non_negative(field: &str, value: f64) -> Result<f64, EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::invalid(format!(
            "{} must be a finite non-negative number (got {})",
            field, value
        )));
    }
    Ok(value)
}
