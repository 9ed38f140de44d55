//! Ideal-Point Selector
//!
//! Picks one frontier member for the user's goal:
//! 1. Min-max normalize Yield, Cost and Env across the frontier
//! 2. Measure each member's distance to the ideal corner (1, 0, 0):
//!    maximum yield, zero cost, zero impact
//! 3. Scale the per-axis gaps by the goal's weights and take the Euclidean norm
//! 4. Return the smallest distance; the first occurrence wins ties
//!
//! The ideal corner is generally infeasible; it is only a reference.

use super::candidates::Candidate;
use crate::config::Goal;
use crate::utils::normalization::MinMax;
use serde::{Deserialize, Serialize};

/// Normalized (Yield, Cost, Env) reference point
pub const IDEAL_POINT: [f64; 3] = [1.0, 0.0, 0.0];

/// Outcome of selection over a frontier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Position of the chosen candidate in the frontier
    pub index: usize,
    pub candidate: Candidate,
    /// Weighted distance to the ideal point
    pub distance: f64,
    /// Chosen candidate's normalized (Yield, Cost, Env)
    pub normalized: [f64; 3],
}

/// Weighted distance of one normalized point to the ideal corner
pub fn weighted_distance(normalized: &[f64; 3], weights: &[f64; 3]) -> f64 {
    normalized
        .iter()
        .zip(IDEAL_POINT.iter())
        .zip(weights.iter())
        .map(|((x, ideal), w)| ((x - ideal) * w).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Select the frontier member closest to the weighted ideal point
///
/// Returns `None` only for an empty frontier.
pub fn select_ideal_point(frontier: &[Candidate], goal: Goal) -> Option<Selection> {
    let ranges: [MinMax; 3] = [
        MinMax::fit(frontier.iter().map(|c| c.crop_yield))?,
        MinMax::fit(frontier.iter().map(|c| c.cost))?,
        MinMax::fit(frontier.iter().map(|c| c.env_impact))?,
    ];
    let weights = goal.weights();

    let mut best: Option<Selection> = None;
    for (index, candidate) in frontier.iter().enumerate() {
        let raw = candidate.objectives().as_array();
        let normalized = [
            ranges[0].normalize(raw[0]),
            ranges[1].normalize(raw[1]),
            ranges[2].normalize(raw[2]),
        ];
        let distance = weighted_distance(&normalized, &weights);

        // Strict comparison keeps the first occurrence on ties
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(Selection { index, candidate: *candidate, distance, normalized });
        }
    }

    best
}
