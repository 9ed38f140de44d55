//! Environmental Impact
//!
//! `impact = 0.002N² + 0.003P² + 0.0025K²`
//!
//! Convex: over-application is penalized superlinearly, standing in for the
//! growth of runoff and leaching risk.

use super::NutrientLevels;

const N_PENALTY: f64 = 0.002;
const P_PENALTY: f64 = 0.003;
const K_PENALTY: f64 = 0.0025;

pub fn calculate_impact(levels: NutrientLevels) -> f64 {
    let (n, p, k) = levels.as_f64();
    N_PENALTY * n * n + P_PENALTY * p * p + K_PENALTY * k * k
}
