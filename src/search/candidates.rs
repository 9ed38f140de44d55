//! Candidate Generator
//!
//! Enumerates every grid point {0, step, 2·step, … ≤ max} on each axis and
//! scores it with the objective model.
//!
//! Order is fixed: N outer, P middle, K inner. Both the sequential and the
//! parallel generator produce exactly this order, so tie-breaking downstream
//! does not depend on which one ran.
//!
//! The grid size is checked against the hard cap before anything is allocated.

use crate::config::{GridSpec, UnitCosts};
use crate::error::EngineError;
use crate::objectives::{evaluate, NutrientLevels, Objectives};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One scored grid point. Never mutated after generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub levels: NutrientLevels,
    pub crop_yield: f64,
    pub cost: f64,
    pub env_impact: f64,
}

impl Candidate {
    pub fn new(levels: NutrientLevels, costs: &UnitCosts) -> Self {
        let Objectives { crop_yield, cost, env_impact } = evaluate(levels, costs);
        Self { levels, crop_yield, cost, env_impact }
    }

    pub fn objectives(&self) -> Objectives {
        Objectives {
            crop_yield: self.crop_yield,
            cost: self.cost,
            env_impact: self.env_impact,
        }
    }

    /// (−Yield, Cost, Env): every component lower-is-better
    pub fn effective(&self) -> [f64; 3] {
        self.objectives().effective()
    }
}

/// Validate the grid size against the cap and return it as a length
pub fn check_grid_size(grid: &GridSpec, limit: u64) -> Result<usize, EngineError> {
    let points = match grid.point_count() {
        Some(points) if points <= limit => points,
        Some(points) => return Err(EngineError::SearchSpaceTooLarge { points, limit }),
        // Saturate: the true count does not fit in u64
        None => return Err(EngineError::SearchSpaceTooLarge { points: u64::MAX, limit }),
    };
    usize::try_from(points).map_err(|_| EngineError::SearchSpaceTooLarge { points, limit })
}

fn axis_levels(max: u32, step: u32) -> impl Iterator<Item = u32> + Clone {
    (0..=max).step_by(step as usize)
}

/// Enumerate and score the full grid (sequential)
pub fn generate_candidates(
    grid: &GridSpec,
    costs: &UnitCosts,
    limit: u64,
) -> Result<Vec<Candidate>, EngineError> {
    let total = check_grid_size(grid, limit)?;
    let mut candidates = Vec::with_capacity(total);

    for n in axis_levels(grid.max_n, grid.step) {
        for p in axis_levels(grid.max_p, grid.step) {
            for k in axis_levels(grid.max_k, grid.step) {
                candidates.push(Candidate::new(NutrientLevels::new(n, p, k), costs));
            }
        }
    }

    debug_assert_eq!(candidates.len(), total);
    Ok(candidates)
}

/// Enumerate and score the full grid IN PARALLEL
///
/// Each output slot is a pure function of its flat index, so workers never
/// share state. `collect` on an indexed iterator keeps N-P-K order.
pub fn generate_candidates_parallel(
    grid: &GridSpec,
    costs: &UnitCosts,
    limit: u64,
) -> Result<Vec<Candidate>, EngineError> {
    let total = check_grid_size(grid, limit)?;

    // Axis lengths fit in usize: their product does
    let len_p = GridSpec::axis_len(grid.max_p, grid.step) as usize;
    let len_k = GridSpec::axis_len(grid.max_k, grid.step) as usize;
    let step = grid.step;

    let candidates: Vec<Candidate> = (0..total)
        .into_par_iter()
        .map(|idx| {
            let n_idx = idx / (len_p * len_k);
            let p_idx = (idx / len_k) % len_p;
            let k_idx = idx % len_k;
            // idx·step ≤ max on every axis, so the casts are lossless
            let levels = NutrientLevels::new(
                n_idx as u32 * step,
                p_idx as u32 * step,
                k_idx as u32 * step,
            );
            Candidate::new(levels, costs)
        })
        .collect();

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COSTS: UnitCosts = UnitCosts { n: 12.0, p: 10.0, k: 8.0 };

    #[test]
    fn test_two_level_cube() {
        let grid = GridSpec { max_n: 20, max_p: 20, max_k: 20, step: 20 };
        let candidates = generate_candidates(&grid, &COSTS, 1_000).unwrap();
        assert_eq!(candidates.len(), 8);

        // N outer, P middle, K inner
        let order: Vec<(u32, u32, u32)> = candidates
            .iter()
            .map(|c| (c.levels.n, c.levels.p, c.levels.k))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, 0, 0), (0, 0, 20), (0, 20, 0), (0, 20, 20),
                (20, 0, 0), (20, 0, 20), (20, 20, 0), (20, 20, 20),
            ]
        );
    }

    #[test]
    fn test_levels_stay_within_max() {
        let grid = GridSpec { max_n: 25, max_p: 7, max_k: 0, step: 10 };
        let candidates = generate_candidates(&grid, &COSTS, 1_000).unwrap();
        // N: 0,10,20  P: 0  K: 0
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.levels.n <= 25 && c.levels.p == 0 && c.levels.k == 0));
    }

    #[test]
    fn test_single_point_grid() {
        let grid = GridSpec { max_n: 0, max_p: 0, max_k: 0, step: 1 };
        let candidates = generate_candidates(&grid, &COSTS, 1).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].levels, NutrientLevels::ZERO);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = GridSpec { max_n: 200, max_p: 150, max_k: 150, step: 10 };
        let seq = generate_candidates(&grid, &COSTS, 100_000).unwrap();
        let par = generate_candidates_parallel(&grid, &COSTS, 100_000).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_cap_rejects_before_allocation() {
        let grid = GridSpec { max_n: 500, max_p: 500, max_k: 500, step: 1 };
        let err = generate_candidates(&grid, &COSTS, 10_000_000).unwrap_err();
        assert_eq!(
            err,
            EngineError::SearchSpaceTooLarge { points: 501 * 501 * 501, limit: 10_000_000 }
        );
        assert!(generate_candidates_parallel(&grid, &COSTS, 10_000_000).is_err());
    }

    #[test]
    fn test_overflowing_grid_is_too_large() {
        let grid = GridSpec { max_n: u32::MAX, max_p: u32::MAX, max_k: u32::MAX, step: 1 };
        assert!(matches!(
            check_grid_size(&grid, u64::MAX - 1),
            Err(EngineError::SearchSpaceTooLarge { points: u64::MAX, .. })
        ));
    }
}
