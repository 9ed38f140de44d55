//! Pareto Frontier Extractor
//!
//! All objectives are compared in minimization form (−Yield, Cost, Env).
//! A dominates B iff A ≤ B on every component and A < B on at least one.
//! Identical vectors do not dominate each other, so duplicates both survive.
//!
//! Sort-and-sweep skyline, O(n log n):
//! 1. Order candidates by the first component. A dominator never sorts after
//!    the point it dominates.
//! 2. Sweep groups of equal first component. A point is dominated by an earlier
//!    group iff some earlier point is ≤ on both remaining components; a
//!    `Staircase` over (Cost, Env) answers that in O(log n).
//! 3. Inside a group the first component ties, so dominance is plain 2-D
//!    dominance on (Cost, Env) with at least one strict inequality.
//!
//! Both variants return the frontier in input order.

use super::candidates::Candidate;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::ops::Bound;

/// True if `a` dominates `b` (both in minimization form)
pub fn dominates(a: &[f64; 3], b: &[f64; 3]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b.iter()) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

// Objective values are finite (validated prices, bounded levels)
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Dense ranks of the second component, so the staircase can key on integers
fn second_ranks(effective: &[[f64; 3]]) -> Vec<usize> {
    let mut values: Vec<f64> = effective.iter().map(|e| e[1]).collect();
    values.sort_by(|a, b| cmp_f64(*a, *b));
    values.dedup();
    effective
        .iter()
        .map(|e| values.partition_point(|v| *v < e[1]))
        .collect()
}

/// Lower envelope of the (rank of Cost, Env) pairs seen so far
///
/// Keys ascend and values strictly descend, so the entry at or below a key
/// holds the minimum Env over every point with Cost ≤ that key.
#[derive(Default)]
struct Staircase {
    steps: BTreeMap<usize, f64>,
}

impl Staircase {
    /// Some inserted point has rank ≤ `rank` and Env ≤ `env`
    fn covers(&self, rank: usize, env: f64) -> bool {
        self.steps
            .range(..=rank)
            .next_back()
            .is_some_and(|(_, best)| *best <= env)
    }

    fn insert(&mut self, rank: usize, env: f64) {
        if self.covers(rank, env) {
            return;
        }
        let shadowed: Vec<usize> = self
            .steps
            .range((Bound::Excluded(rank), Bound::Unbounded))
            .take_while(|(_, v)| **v >= env)
            .map(|(k, _)| *k)
            .collect();
        for key in shadowed {
            self.steps.remove(&key);
        }
        self.steps.insert(rank, env);
    }
}

/// Mark dominated positions, given indices ordered by the first component
fn sweep(effective: &[[f64; 3]], order: &[usize]) -> Vec<bool> {
    let ranks = second_ranks(effective);
    let mut dominated = vec![false; effective.len()];
    let mut staircase = Staircase::default();

    let mut start = 0;
    while start < order.len() {
        let head = effective[order[start]][0];
        let end = start
            + order[start..]
                .iter()
                .take_while(|&&i| effective[i][0] == head)
                .count();

        let mut group: Vec<usize> = order[start..end].to_vec();

        // Earlier groups are strictly better on the first component
        for &i in &group {
            if staircase.covers(ranks[i], effective[i][2]) {
                dominated[i] = true;
            }
        }

        // Within the group: 2-D dominance on (Cost, Env)
        group.sort_by(|&a, &b| {
            ranks[a]
                .cmp(&ranks[b])
                .then_with(|| cmp_f64(effective[a][2], effective[b][2]))
        });
        let mut best_before = f64::INFINITY; // min Env over strictly smaller Cost
        let mut g = 0;
        while g < group.len() {
            let rank = ranks[group[g]];
            let run = group[g..].iter().take_while(|&&i| ranks[i] == rank).count();
            let run_min = effective[group[g]][2];
            for &i in &group[g..g + run] {
                let env = effective[i][2];
                if best_before <= env || run_min < env {
                    dominated[i] = true;
                }
            }
            best_before = best_before.min(run_min);
            g += run;
        }

        for &i in &group {
            staircase.insert(ranks[i], effective[i][2]);
        }
        start = end;
    }

    dominated
}

fn keep_undominated(candidates: &[Candidate], dominated: Vec<bool>) -> Vec<Candidate> {
    candidates
        .iter()
        .zip(dominated)
        .filter(|(_, is_dominated)| !is_dominated)
        .map(|(c, _)| *c)
        .collect()
}

/// Extract the non-dominated candidates (sequential)
pub fn pareto_frontier(candidates: &[Candidate]) -> Vec<Candidate> {
    let effective: Vec<[f64; 3]> = candidates.iter().map(Candidate::effective).collect();
    let mut order: Vec<usize> = (0..effective.len()).collect();
    order.sort_by(|&a, &b| cmp_f64(effective[a][0], effective[b][0]));

    let dominated = sweep(&effective, &order);
    keep_undominated(candidates, dominated)
}

/// Extract the non-dominated candidates, scoring and sorting IN PARALLEL
///
/// The sweep itself is sequential. Same output as `pareto_frontier`.
pub fn pareto_frontier_parallel(candidates: &[Candidate]) -> Vec<Candidate> {
    let effective: Vec<[f64; 3]> = candidates.par_iter().map(Candidate::effective).collect();
    let mut order: Vec<usize> = (0..effective.len()).collect();
    order.par_sort_by(|&a, &b| cmp_f64(effective[a][0], effective[b][0]));

    let dominated = sweep(&effective, &order);
    keep_undominated(candidates, dominated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GridSpec, UnitCosts};
    use crate::objectives::NutrientLevels;
    use crate::search::candidates::generate_candidates;

    fn candidate(n: u32, crop_yield: f64, cost: f64, env_impact: f64) -> Candidate {
        Candidate {
            levels: NutrientLevels::new(n, 0, 0),
            crop_yield,
            cost,
            env_impact,
        }
    }

    #[test]
    fn test_dominance_rule() {
        assert!(dominates(&[-10.0, 5.0, 1.0], &[-9.0, 5.0, 1.0]));
        assert!(!dominates(&[-10.0, 5.0, 1.0], &[-10.0, 5.0, 1.0]));
        assert!(!dominates(&[-10.0, 6.0, 1.0], &[-9.0, 5.0, 1.0]));
    }

    #[test]
    fn test_removes_dominated() {
        let set = vec![
            candidate(0, 50.0, 100.0, 1.0),
            candidate(1, 40.0, 120.0, 1.5), // dominated by the first
            candidate(2, 60.0, 200.0, 2.0),
        ];
        let frontier = pareto_frontier(&set);
        assert_eq!(frontier, vec![set[0], set[2]]);
    }

    #[test]
    fn test_ties_survive() {
        let set = vec![
            candidate(0, 50.0, 100.0, 1.0),
            candidate(1, 50.0, 100.0, 1.0),
        ];
        assert_eq!(pareto_frontier(&set).len(), 2);
        assert_eq!(pareto_frontier_parallel(&set).len(), 2);
    }

    #[test]
    fn test_dominated_dominator_still_removes_target() {
        // c dominates b, b dominates a. a comes first, b is processed before c
        let a = candidate(0, 10.0, 30.0, 3.0);
        let b = candidate(1, 20.0, 20.0, 2.0);
        let c = candidate(2, 30.0, 10.0, 1.0);
        assert_eq!(pareto_frontier(&[a, b, c]), vec![c]);
        assert_eq!(pareto_frontier(&[c, b, a]), vec![c]);
    }

    #[test]
    fn test_cube_keeps_every_point() {
        // Yield and cost are in opposite order across the {0,20}³ cube
        let grid = GridSpec { max_n: 20, max_p: 20, max_k: 20, step: 20 };
        let costs = UnitCosts { n: 12.0, p: 10.0, k: 8.0 };
        let all = generate_candidates(&grid, &costs, 1_000).unwrap();
        assert_eq!(pareto_frontier(&all).len(), 8);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let grid = GridSpec { max_n: 120, max_p: 90, max_k: 90, step: 10 };
        let costs = UnitCosts { n: 12.0, p: 10.0, k: 8.0 };
        let all = generate_candidates(&grid, &costs, 100_000).unwrap();
        let seq = pareto_frontier(&all);
        let par = pareto_frontier_parallel(&all);
        assert_eq!(seq, par);
        assert!(!seq.is_empty());
    }

    /// All-pairs check, kept as the reference for the sweep
    fn frontier_by_pairs(candidates: &[Candidate]) -> Vec<Candidate> {
        candidates
            .iter()
            .filter(|c| !candidates.iter().any(|o| dominates(&o.effective(), &c.effective())))
            .copied()
            .collect()
    }

    #[test]
    fn test_sweep_matches_pairwise_with_ties() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        // Small integer values force ties on every component
        let mut rng = StdRng::seed_from_u64(42);
        for round in 0..200 {
            let size = rng.gen_range(0..60);
            let set: Vec<Candidate> = (0..size)
                .map(|i| {
                    candidate(
                        i,
                        rng.gen_range(0..5) as f64,
                        rng.gen_range(0..5) as f64,
                        rng.gen_range(0..5) as f64,
                    )
                })
                .collect();
            let expected = frontier_by_pairs(&set);
            assert_eq!(pareto_frontier(&set), expected, "round {}", round);
            assert_eq!(pareto_frontier_parallel(&set), expected, "round {}", round);
        }
    }

    #[test]
    fn test_sweep_matches_pairwise_on_grid() {
        let grid = GridSpec { max_n: 15, max_p: 15, max_k: 15, step: 1 };
        let costs = UnitCosts { n: 12.0, p: 10.0, k: 8.0 };
        let all = generate_candidates(&grid, &costs, 10_000).unwrap();
        assert_eq!(pareto_frontier(&all), frontier_by_pairs(&all));
    }

    #[test]
    fn test_staircase_keeps_lower_envelope() {
        let mut stairs = Staircase::default();
        stairs.insert(2, 5.0);
        stairs.insert(4, 3.0);
        stairs.insert(1, 4.0); // shadows the step at 2
        assert_eq!(stairs.steps.len(), 2);
        assert!(stairs.covers(3, 4.0));
        assert!(!stairs.covers(3, 3.5));
        assert!(stairs.covers(9, 3.0));
        assert!(!stairs.covers(0, 100.0));
    }

    #[test]
    fn test_zero_prices_leave_valid_frontier() {
        // Cost never separates candidates; yield and impact still trade off
        let grid = GridSpec { max_n: 40, max_p: 40, max_k: 40, step: 10 };
        let costs = UnitCosts { n: 0.0, p: 0.0, k: 0.0 };
        let all = generate_candidates(&grid, &costs, 1_000).unwrap();
        let frontier = pareto_frontier(&all);
        for a in &frontier {
            for b in &frontier {
                assert!(!dominates(&a.effective(), &b.effective()));
            }
        }
    }
}
