//! Constraint Filter
//!
//! Keeps a candidate iff every bound that is set holds:
//! - Cost ≤ max_budget
//! - EnvironmentalImpact ≤ max_impact
//! - Yield ≥ min_yield
//!
//! Unset means absent or exactly 0 (see `Thresholds::from_raw`). An empty
//! result is the caller's `NoFeasibleCandidate`; nothing here falls back.

use super::candidates::Candidate;
use crate::config::Thresholds;

/// Check one candidate against the bounds
pub fn satisfies(candidate: &Candidate, thresholds: &Thresholds) -> bool {
    thresholds.max_budget.map_or(true, |max| candidate.cost <= max)
        && thresholds.max_impact.map_or(true, |max| candidate.env_impact <= max)
        && thresholds.min_yield.map_or(true, |min| candidate.crop_yield >= min)
}

/// Filter a candidate set, preserving order
pub fn apply_constraints(candidates: &[Candidate], thresholds: &Thresholds) -> Vec<Candidate> {
    if thresholds.is_unconstrained() {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|c| satisfies(c, thresholds))
        .copied()
        .collect()
}
