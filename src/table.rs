//! Candidate Table
//!
//! Builds the table the display surface renders (scatter charts of Cost vs
//! Yield and Env vs Yield, plus the raw candidate grid) as a Polars DataFrame.
//!
//! Columns: N, P, K, Yield, Cost, Env, on_frontier, selected

use crate::planner::Optimization;
use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// DataFrame of the feasible set of an optimization, flagged
pub fn optimization_to_frame(result: &Optimization) -> PolarsResult<DataFrame> {
    let frontier = result.frontier_levels();
    let candidates = &result.feasible;

    let n: Vec<u32> = candidates.iter().map(|c| c.levels.n).collect();
    let p: Vec<u32> = candidates.iter().map(|c| c.levels.p).collect();
    let k: Vec<u32> = candidates.iter().map(|c| c.levels.k).collect();
    let crop_yield: Vec<f64> = candidates.iter().map(|c| c.crop_yield).collect();
    let cost: Vec<f64> = candidates.iter().map(|c| c.cost).collect();
    let env: Vec<f64> = candidates.iter().map(|c| c.env_impact).collect();
    let frontier_flags: Vec<bool> = candidates.iter().map(|c| frontier.contains(&c.levels)).collect();
    let selected_flags: Vec<bool> = candidates
        .iter()
        .map(|c| c.levels == result.selected.levels)
        .collect();

    df!(
        "N" => n,
        "P" => p,
        "K" => k,
        "Yield" => crop_yield,
        "Cost" => cost,
        "Env" => env,
        "on_frontier" => frontier_flags,
        "selected" => selected_flags
    )
}

/// Write the flagged feasible set of an optimization to CSV
pub fn write_csv(result: &Optimization, path: &Path) -> Result<()> {
    let mut frame = optimization_to_frame(result)
        .with_context(|| "Failed to build candidate table")?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create table file: {:?}", path))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("Failed to write candidate table: {:?}", path))?;

    tracing::info!("Wrote {} candidates to {:?}", frame.height(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Configuration, Goal};
    use crate::planner::optimize;

    fn count_true(flags: &BooleanChunked) -> usize {
        flags.into_iter().filter(|v| *v == Some(true)).count()
    }

    fn cube() -> Optimization {
        let config = Configuration {
            max_n: 20,
            max_p: 20,
            max_k: 20,
            step: 20,
            goal: Goal::Balanced,
            ..Configuration::default()
        };
        optimize(&config).unwrap()
    }

    #[test]
    fn test_frame_shape() {
        let result = cube();
        let frame = optimization_to_frame(&result).unwrap();
        assert_eq!(frame.height(), 8);
        let names: Vec<String> = frame.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, ["N", "P", "K", "Yield", "Cost", "Env", "on_frontier", "selected"]);
    }

    #[test]
    fn test_flags() {
        let result = cube();
        let frame = optimization_to_frame(&result).unwrap();

        let on_frontier = frame.column("on_frontier").unwrap().bool().unwrap();
        assert_eq!(count_true(on_frontier), 8);

        let selected = frame.column("selected").unwrap().bool().unwrap();
        assert_eq!(count_true(selected), 1);
    }

    #[test]
    fn test_flags_follow_frontier_membership() {
        // Budget filter trims the grid before the frontier stage
        let config = Configuration {
            max_n: 60,
            max_p: 60,
            max_k: 60,
            step: 20,
            max_budget: Some(900.0),
            ..Configuration::default()
        };
        let result = optimize(&config).unwrap();
        let frame = optimization_to_frame(&result).unwrap();
        assert_eq!(frame.height(), result.feasible.len());

        let on_frontier = frame.column("on_frontier").unwrap().bool().unwrap();
        assert_eq!(count_true(on_frontier), result.frontier.len());
        for (flag, candidate) in on_frontier.into_iter().zip(&result.feasible) {
            assert_eq!(flag, Some(result.is_on_frontier(candidate)));
        }
    }
}
