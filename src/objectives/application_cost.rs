//! Application Cost
//!
//! `cost = cN·N + cP·P + cK·K`, linear with no economies of scale.

use super::NutrientLevels;
use crate::config::UnitCosts;

pub fn calculate_cost(levels: NutrientLevels, costs: &UnitCosts) -> f64 {
    let (n, p, k) = levels.as_f64();
    costs.n * n + costs.p * p + costs.k * k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_cost() {
        let costs = UnitCosts { n: 12.0, p: 10.0, k: 8.0 };
        assert_relative_eq!(calculate_cost(NutrientLevels::new(20, 20, 20), &costs), 600.0);
        assert_relative_eq!(calculate_cost(NutrientLevels::new(0, 20, 0), &costs), 200.0);
    }

    #[test]
    fn test_free_nutrients() {
        let costs = UnitCosts { n: 0.0, p: 0.0, k: 0.0 };
        assert_relative_eq!(calculate_cost(NutrientLevels::new(500, 500, 500), &costs), 0.0);
    }
}
