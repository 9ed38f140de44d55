//! Normalization Utilities
//!
//! Min-max scaling of one objective across a candidate set:
//!
//! `norm(x) = (x − min) / (max − min + ε)`
//!
//! The ε keeps the division defined when every member shares the same value;
//! in that case every normalized value is 0.

use serde::{Deserialize, Serialize};

/// Guard added to the range before dividing
pub const NORMALIZATION_EPSILON: f64 = 1e-9;

/// Observed range of one objective
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Fit the range to a set of values. `None` for an empty set.
    pub fn fit<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Scale a value into [0, 1) relative to the fitted range
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min + NORMALIZATION_EPSILON)
    }
}
