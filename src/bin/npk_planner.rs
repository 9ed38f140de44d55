// NPK planner command-line entry point
//
// Usage: cargo run --features cli --bin npk_planner -- [config.json]
//
// Environment:
//   NPK_CONFIG      configuration JSON (when no path argument is given)
//   NPK_GRID_LIMIT  hard cap on grid points (default 10,000,000)
//   NPK_AREA        plot area (default 1.0)
//   NPK_UNIT        acre | hectare (default acre)
//   NPK_TABLE_CSV   write the candidate table here
//   RUST_LOG        tracing filter

use anyhow::{Context, Result};
use npk_planner::{
    recommend_products, table, AreaUnit, Blend, Candidate, Configuration, Goal, Planner,
    DEFAULT_MAX_GRID_POINTS,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Summary record printed to stdout
#[derive(Serialize)]
struct Report {
    goal: Goal,
    grid_size: usize,
    feasible: usize,
    frontier_size: usize,
    selected: Candidate,
    distance: f64,
    area: f64,
    unit: AreaUnit,
    blends: Vec<Blend>,
}

fn main() -> Result<()> {
    // Initialize tracing (structured logging, to stderr so stdout stays JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "npk_planner=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("NPK_CONFIG").ok())
        .map(PathBuf::from);

    let config = match &config_path {
        Some(path) => {
            tracing::info!("Loading configuration: {:?}", path);
            Configuration::load(path)?
        }
        None => {
            tracing::info!("No configuration given - using form defaults");
            Configuration::default()
        }
    };

    let grid_limit: u64 = match std::env::var("NPK_GRID_LIMIT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("NPK_GRID_LIMIT is not a number: '{}'", raw))?,
        Err(_) => DEFAULT_MAX_GRID_POINTS,
    };

    let area: f64 = match std::env::var("NPK_AREA") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("NPK_AREA is not a number: '{}'", raw))?,
        Err(_) => 1.0,
    };

    let unit: AreaUnit = match std::env::var("NPK_UNIT") {
        Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
        Err(_) => AreaUnit::Acre,
    };

    tracing::info!("Configuration:");
    tracing::info!("  N ≤ {}, P ≤ {}, K ≤ {}, step {}", config.max_n, config.max_p, config.max_k, config.step);
    tracing::info!("  Prices: {}/{}/{}", config.cost_n, config.cost_p, config.cost_k);
    tracing::info!("  Goal: {}", config.goal.label());
    let planner = Planner::with_grid_limit(grid_limit);
    tracing::info!("  Grid limit: {}", planner.limits().max_grid_points);

    let result = planner
        .optimize_parallel(&config)
        .with_context(|| "Optimization failed")?;

    let selected = result.selected;
    tracing::info!(
        "Recommended N={}, P={}, K={} | Cost: {:.2}/{}",
        selected.levels.n,
        selected.levels.p,
        selected.levels.k,
        selected.cost,
        unit
    );

    if let Ok(csv_path) = std::env::var("NPK_TABLE_CSV") {
        table::write_csv(&result, &PathBuf::from(csv_path))?;
    }

    let blends = recommend_products(selected.levels, area, unit)?;

    let report = Report {
        goal: result.goal,
        grid_size: result.grid_size,
        feasible: result.feasible_count(),
        frontier_size: result.frontier.len(),
        selected,
        distance: result.distance,
        area,
        unit,
        blends,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
