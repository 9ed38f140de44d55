//! Fertilizer Product Mapper
//!
//! Converts a recommended nutrient application into quantities of commercial
//! products for three fixed blend strategies. Pure linear arithmetic on
//! fixed nutrient contents:
//!
//! | Product | Content          |
//! |---------|------------------|
//! | DAP     | 46% P, 18% N     |
//! | Urea    | 46% N            |
//! | MOP     | 60% K            |
//! | SSP     | 16% P            |
//!
//! Downstream of the engine: it only consumes the selected point.

use crate::error::EngineError;
use crate::objectives::NutrientLevels;
use crate::utils::units::AreaUnit;
use serde::{Deserialize, Serialize};

const DAP_P: f64 = 0.46;
const DAP_N: f64 = 0.18;
const UREA_N: f64 = 0.46;
const MOP_K: f64 = 0.60;
const SSP_P: f64 = 0.16;

/// Urea share kept in the eco blend
const ECO_UREA_SHARE: f64 = 0.8;
/// Fixed organic manure dose in the eco blend, kg
const ECO_MANURE_KG: f64 = 500.0;

/// Blend strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendStrategy {
    YieldBooster,
    CostSaver,
    EcoBalanced,
}

impl BlendStrategy {
    pub fn label(self) -> &'static str {
        match self {
            BlendStrategy::YieldBooster => "Yield Booster",
            BlendStrategy::CostSaver => "Cost Saver",
            BlendStrategy::EcoBalanced => "Eco-Balanced",
        }
    }
}

/// A named product and its mass in kg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub product: String,
    pub kg: f64,
}

impl ProductQuantity {
    fn new(product: &str, kg: f64) -> Self {
        Self { product: product.to_string(), kg }
    }
}

/// One strategy's product list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blend {
    pub strategy: BlendStrategy,
    pub products: Vec<ProductQuantity>,
}

/// Map N, P, K masses (kg) to the three blends
///
/// Urea only covers the nitrogen left after DAP's own N contribution, never
/// negative.
pub fn map_products(n_kg: f64, p_kg: f64, k_kg: f64) -> Vec<Blend> {
    let dap = p_kg / DAP_P;
    let urea = (n_kg - dap * DAP_N).max(0.0) / UREA_N;
    let mop = k_kg / MOP_K;

    vec![
        Blend {
            strategy: BlendStrategy::YieldBooster,
            products: vec![
                ProductQuantity::new("DAP", dap),
                ProductQuantity::new("Urea", urea),
                ProductQuantity::new("MOP", mop),
            ],
        },
        Blend {
            strategy: BlendStrategy::CostSaver,
            products: vec![
                ProductQuantity::new("SSP", p_kg / SSP_P),
                ProductQuantity::new("Urea", n_kg / UREA_N),
                ProductQuantity::new("MOP", mop),
            ],
        },
        Blend {
            strategy: BlendStrategy::EcoBalanced,
            products: vec![
                ProductQuantity::new("DAP", dap),
                ProductQuantity::new("Urea", urea * ECO_UREA_SHARE),
                ProductQuantity::new("MOP", mop),
                ProductQuantity::new("Manure", ECO_MANURE_KG),
            ],
        },
    ]
}

/// Scale a per-acre recommendation to the plot and map it to products
pub fn recommend_products(
    levels: NutrientLevels,
    area: f64,
    unit: AreaUnit,
) -> Result<Vec<Blend>, EngineError> {
    if !area.is_finite() || area <= 0.0 {
        return Err(EngineError::InvalidConfiguration(format!(
            "area must be a positive number (got {})",
            area
        )));
    }
    let acres = area * unit.acre_factor();
    let (n, p, k) = levels.as_f64();
    Ok(map_products(n * acres, p * acres, k * acres))
}
