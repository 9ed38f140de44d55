//! Plot Area Units
//!
//! Recommendations are computed per unit of area; these helpers scale them to
//! the whole plot.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Acres in one hectare, as used by the planner forms
pub const ACRES_PER_HECTARE: f64 = 2.47;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaUnit {
    #[default]
    Acre,
    Hectare,
}

impl AreaUnit {
    /// Factor applied to per-unit fertilizer amounts (acre-based)
    pub fn acre_factor(self) -> f64 {
        match self {
            AreaUnit::Acre => 1.0,
            AreaUnit::Hectare => ACRES_PER_HECTARE,
        }
    }

    /// Square metres in one unit, for water depth → volume
    pub fn square_metres(self) -> f64 {
        match self {
            AreaUnit::Acre => 4047.0,
            AreaUnit::Hectare => 10_000.0,
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaUnit::Acre => write!(f, "acre"),
            AreaUnit::Hectare => write!(f, "hectare"),
        }
    }
}

impl FromStr for AreaUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "acre" | "acres" | "ac" => Ok(AreaUnit::Acre),
            "hectare" | "hectares" | "ha" => Ok(AreaUnit::Hectare),
            other => Err(format!("unknown area unit: '{}'", other)),
        }
    }
}
