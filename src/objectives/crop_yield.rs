//! Yield Response
//!
//! `yield(N,P,K) = ln(1 + 0.06N + 0.05P + 0.04K) × 100`
//!
//! Strictly increasing in each nutrient with diminishing returns: the log
//! saturates, so each extra unit buys less yield than the one before.

use super::NutrientLevels;

/// Response coefficients per nutrient unit
const N_RESPONSE: f64 = 0.06;
const P_RESPONSE: f64 = 0.05;
const K_RESPONSE: f64 = 0.04;

/// Scale of the yield index
const YIELD_SCALE: f64 = 100.0;

/// Yield index for an application
pub fn calculate_yield(levels: NutrientLevels) -> f64 {
    let (n, p, k) = levels.as_f64();
    // log1p keeps precision for small applications
    libm::log1p(N_RESPONSE * n + P_RESPONSE * p + K_RESPONSE * k) * YIELD_SCALE
}
