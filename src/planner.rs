//! Planner - Main coordinator for one optimization request
//!
//! Runs the search pipeline end to end:
//! validate → generate → filter → Pareto frontier → ideal-point selection.
//!
//! Includes both sequential and parallel (Rayon) implementations. They return
//! identical results; the parallel one only spreads grid scoring and the
//! frontier sort across cores. Generation finishes before the frontier stage
//! starts, since dominance is judged against the same completed set.
//!
//! The planner holds no per-request state: each call builds everything fresh
//! and hands it back to the caller.

use crate::config::{Configuration, Goal, SearchParams};
use crate::error::EngineError;
use crate::objectives::NutrientLevels;
use crate::search::{
    apply_constraints, generate_candidates, generate_candidates_parallel, pareto_frontier,
    pareto_frontier_parallel, select_ideal_point, Candidate, Selection,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Default hard cap on grid points (about 360 MB of candidates)
pub const DEFAULT_MAX_GRID_POINTS: u64 = 10_000_000;

/// Resource limits applied before the grid is allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    pub max_grid_points: u64,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { max_grid_points: DEFAULT_MAX_GRID_POINTS }
    }
}

/// Result of one optimization request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Optimization {
    pub goal: Goal,
    /// Number of grid points evaluated
    pub grid_size: usize,
    /// Candidates that passed the constraint filter, in grid order
    pub feasible: Vec<Candidate>,
    /// Non-dominated subset of `feasible`, in grid order
    pub frontier: Vec<Candidate>,
    /// The recommended point
    pub selected: Candidate,
    /// Position of `selected` in `frontier`
    pub selected_index: usize,
    /// Weighted distance of `selected` to the ideal point
    pub distance: f64,
}

impl Optimization {
    /// Re-run only the selector on this frontier for a different goal
    pub fn reselect(&self, goal: Goal) -> Option<Selection> {
        select_ideal_point(&self.frontier, goal)
    }

    pub fn feasible_count(&self) -> usize {
        self.feasible.len()
    }

    /// True if the candidate (matched by nutrient levels) is on the frontier
    pub fn is_on_frontier(&self, candidate: &Candidate) -> bool {
        self.frontier.iter().any(|f| f.levels == candidate.levels)
    }

    /// Frontier levels as a set, for membership checks over the whole feasible set
    pub fn frontier_levels(&self) -> HashSet<NutrientLevels> {
        self.frontier.iter().map(|c| c.levels).collect()
    }
}

/// Fertilizer planner
#[derive(Debug, Clone, Copy, Default)]
pub struct Planner {
    limits: SearchLimits,
}

impl Planner {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits }
    }

    /// Planner with a custom grid cap
    pub fn with_grid_limit(max_grid_points: u64) -> Self {
        Self::new(SearchLimits { max_grid_points })
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Run the full search sequentially
    pub fn optimize(&self, config: &Configuration) -> Result<Optimization, EngineError> {
        let params = config.validate()?;
        let start = Instant::now();

        let candidates = generate_candidates(&params.grid, &params.costs, self.limits.max_grid_points)?;
        tracing::debug!("Generated {} candidates in {:?}", candidates.len(), start.elapsed());

        let result = finish_search(&params, candidates, pareto_frontier)?;
        tracing::info!(
            "Optimization ({}) finished in {:?}: {} grid points, {} feasible, {} on frontier",
            params.goal.label(),
            start.elapsed(),
            result.grid_size,
            result.feasible.len(),
            result.frontier.len()
        );
        Ok(result)
    }

    /// Run the full search with grid scoring and the frontier sort IN PARALLEL
    ///
    /// Same output as `optimize` for the same configuration.
    pub fn optimize_parallel(&self, config: &Configuration) -> Result<Optimization, EngineError> {
        let params = config.validate()?;
        let start = Instant::now();

        let candidates =
            generate_candidates_parallel(&params.grid, &params.costs, self.limits.max_grid_points)?;
        tracing::debug!(
            "Generated {} candidates in parallel in {:?}",
            candidates.len(),
            start.elapsed()
        );

        let result = finish_search(&params, candidates, pareto_frontier_parallel)?;
        tracing::info!(
            "Parallel optimization ({}) finished in {:?}: {} grid points, {} feasible, {} on frontier",
            params.goal.label(),
            start.elapsed(),
            result.grid_size,
            result.feasible.len(),
            result.frontier.len()
        );
        Ok(result)
    }
}

/// Filter, extract the frontier and select, given a completed candidate set
fn finish_search(
    params: &SearchParams,
    candidates: Vec<Candidate>,
    frontier_fn: fn(&[Candidate]) -> Vec<Candidate>,
) -> Result<Optimization, EngineError> {
    let grid_size = candidates.len();

    let feasible = if params.thresholds.is_unconstrained() {
        candidates
    } else {
        apply_constraints(&candidates, &params.thresholds)
    };

    if feasible.is_empty() {
        tracing::warn!("No candidate satisfies the constraints ({} evaluated)", grid_size);
        return Err(EngineError::NoFeasibleCandidate { grid_size });
    }

    let frontier = frontier_fn(&feasible);

    let Selection { index, candidate, distance, .. } = select_ideal_point(&frontier, params.goal)
        .ok_or(EngineError::NoFeasibleCandidate { grid_size })?;

    tracing::debug!(
        "Selected N={} P={} K={} (distance {:.4})",
        candidate.levels.n,
        candidate.levels.p,
        candidate.levels.k,
        distance
    );

    Ok(Optimization {
        goal: params.goal,
        grid_size,
        feasible,
        frontier,
        selected: candidate,
        selected_index: index,
        distance,
    })
}

/// Run the sequential search with the default limits
pub fn optimize(config: &Configuration) -> Result<Optimization, EngineError> {
    Planner::default().optimize(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_config(goal: Goal) -> Configuration {
        Configuration {
            max_n: 20,
            max_p: 20,
            max_k: 20,
            step: 20,
            cost_n: 12.0,
            cost_p: 10.0,
            cost_k: 8.0,
            max_budget: None,
            max_impact: None,
            min_yield: None,
            goal,
        }
    }

    #[test]
    fn test_invalid_config_short_circuits() {
        let config = Configuration { step: 0, ..cube_config(Goal::Balanced) };
        assert!(matches!(optimize(&config), Err(EngineError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_grid_cap_is_configurable() {
        let planner = Planner::with_grid_limit(7);
        let err = planner.optimize(&cube_config(Goal::Balanced)).unwrap_err();
        assert_eq!(err, EngineError::SearchSpaceTooLarge { points: 8, limit: 7 });

        assert!(Planner::with_grid_limit(8).optimize(&cube_config(Goal::Balanced)).is_ok());
    }

    #[test]
    fn test_no_feasible_candidate() {
        let config = Configuration { min_yield: Some(500.0), ..cube_config(Goal::Balanced) };
        assert_eq!(
            optimize(&config).unwrap_err(),
            EngineError::NoFeasibleCandidate { grid_size: 8 }
        );
    }

    #[test]
    fn test_selected_is_frontier_member() {
        let result = optimize(&cube_config(Goal::Balanced)).unwrap();
        assert_eq!(result.grid_size, 8);
        assert_eq!(result.frontier[result.selected_index], result.selected);
        assert!(result.is_on_frontier(&result.selected));
        assert_eq!(result.selected.levels, NutrientLevels::new(20, 0, 0));
    }

    #[test]
    fn test_reselect_matches_fresh_run() {
        let result = optimize(&cube_config(Goal::Balanced)).unwrap();
        let fresh = optimize(&cube_config(Goal::SaveMoney)).unwrap();
        let reselected = result.reselect(Goal::SaveMoney).unwrap();
        assert_eq!(reselected.candidate, fresh.selected);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = Configuration {
            max_budget: Some(2500.0),
            max_impact: Some(60.0),
            ..Configuration::default()
        };
        let seq = Planner::default().optimize(&config).unwrap();
        let par = Planner::default().optimize_parallel(&config).unwrap();
        assert_eq!(seq.feasible, par.feasible);
        assert_eq!(seq.frontier, par.frontier);
        assert_eq!(seq.selected, par.selected);
    }
}
