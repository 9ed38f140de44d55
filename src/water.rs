//! Water Planner
//!
//! Weekly irrigation schedule from a stage-based crop coefficient. No search
//! is involved: one pass over the season.
//!
//! Season split:
//! - early: floor(weeks × 0.3) weeks at Kc 0.8
//! - mid:   floor(weeks × 0.4) weeks at Kc 1.0
//! - late:  the remaining weeks at Kc 0.7
//!
//! Per week:
//! - net   = max(0, base × Kc − rain)   [mm]
//! - gross = net / efficiency           [mm]
//! - litres per unit area = gross × m² per unit (1 mm over 1 m² is 1 L)
//!
//! Crop and irrigation-method tables are plain values passed in by the caller.

use crate::utils::units::AreaUnit;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

pub const MIN_SEASON_WEEKS: u32 = 4;
pub const MAX_SEASON_WEEKS: u32 = 30;
pub const MAX_IRRIGATIONS_PER_WEEK: u32 = 3;

const EARLY_SHARE: f64 = 0.3;
const MID_SHARE: f64 = 0.4;
const KC_EARLY: f64 = 0.8;
const KC_MID: f64 = 1.0;
const KC_LATE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WaterPlanError {
    #[error("unknown crop: '{0}'")]
    UnknownCrop(String),

    #[error("unknown irrigation method: '{0}'")]
    UnknownIrrigationMethod(String),

    #[error("invalid water plan input: {0}")]
    InvalidInput(String),
}

/// Base weekly water need per crop, mm/week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropTable {
    pub base_mm_per_week: BTreeMap<String, f64>,
}

impl Default for CropTable {
    fn default() -> Self {
        let base_mm_per_week = [("Rice", 45.0), ("Wheat", 30.0), ("Maize", 35.0), ("Cotton", 50.0)]
            .into_iter()
            .map(|(name, mm)| (name.to_string(), mm))
            .collect();
        Self { base_mm_per_week }
    }
}

impl CropTable {
    pub fn base_need(&self, crop: &str) -> Result<f64, WaterPlanError> {
        self.base_mm_per_week
            .get(crop)
            .copied()
            .ok_or_else(|| WaterPlanError::UnknownCrop(crop.to_string()))
    }
}

/// Application efficiency per irrigation method (0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationTable {
    pub efficiency: BTreeMap<String, f64>,
}

impl Default for IrrigationTable {
    fn default() -> Self {
        let efficiency = [("Flood", 0.60), ("Sprinkler", 0.75), ("Drip", 0.90)]
            .into_iter()
            .map(|(name, eff)| (name.to_string(), eff))
            .collect();
        Self { efficiency }
    }
}

impl IrrigationTable {
    pub fn efficiency(&self, method: &str) -> Result<f64, WaterPlanError> {
        let eff = self
            .efficiency
            .get(method)
            .copied()
            .ok_or_else(|| WaterPlanError::UnknownIrrigationMethod(method.to_string()))?;
        if !(eff > 0.0 && eff <= 1.0) {
            return Err(WaterPlanError::InvalidInput(format!(
                "efficiency of '{}' must be in (0, 1] (got {})",
                method, eff
            )));
        }
        Ok(eff)
    }
}

/// One water-planning request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterRequest {
    pub crop: String,
    pub method: String,
    #[serde(default)]
    pub unit: AreaUnit,
    pub area: f64,
    pub irrigations_per_week: u32,
    pub weeks: u32,
    #[serde(default)]
    pub rain_mm_per_week: f64,
}

/// One row of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub kc: f64,
    /// Litres per unit of area for the week (truncated)
    pub litres_per_unit: u64,
    /// Litres per unit of area per irrigation event (truncated)
    pub litres_per_irrigation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSchedule {
    pub weeks: Vec<WeekPlan>,
    /// Season total for the whole plot, m³
    pub total_m3: f64,
    /// Mean of the per-irrigation litres across weeks
    pub avg_litres_per_irrigation: f64,
}

/// Crop coefficient for each week of the season
pub fn stage_coefficients(weeks: u32) -> Vec<f64> {
    let early = (f64::from(weeks) * EARLY_SHARE) as u32;
    let mid = (f64::from(weeks) * MID_SHARE) as u32;
    let late = weeks - early - mid;

    std::iter::repeat(KC_EARLY)
        .take(early as usize)
        .chain(std::iter::repeat(KC_MID).take(mid as usize))
        .chain(std::iter::repeat(KC_LATE).take(late as usize))
        .collect()
}

/// Build the weekly schedule
pub fn plan_water(
    request: &WaterRequest,
    crops: &CropTable,
    methods: &IrrigationTable,
) -> Result<WaterSchedule, WaterPlanError> {
    validate(request)?;
    let base = crops.base_need(&request.crop)?;
    let eff = methods.efficiency(&request.method)?;
    let m2 = request.unit.square_metres();

    let mut weeks = Vec::with_capacity(request.weeks as usize);
    let mut total_m3 = 0.0;

    for (idx, kc) in stage_coefficients(request.weeks).into_iter().enumerate() {
        let net = (base * kc - request.rain_mm_per_week).max(0.0);
        let gross = net / eff;
        let litres = gross * m2;
        total_m3 += litres * request.area / 1000.0;

        weeks.push(WeekPlan {
            week: idx as u32 + 1,
            kc,
            litres_per_unit: litres as u64,
            litres_per_irrigation: (litres / f64::from(request.irrigations_per_week)) as u64,
        });
    }

    let avg_litres_per_irrigation = if weeks.is_empty() {
        0.0
    } else {
        weeks.iter().map(|w| w.litres_per_irrigation as f64).sum::<f64>() / weeks.len() as f64
    };

    tracing::debug!(
        "Water plan for {} ({}): {} weeks, {:.0} m³",
        request.crop,
        request.method,
        weeks.len(),
        total_m3
    );

    Ok(WaterSchedule { weeks, total_m3, avg_litres_per_irrigation })
}

fn validate(request: &WaterRequest) -> Result<(), WaterPlanError> {
    if !(MIN_SEASON_WEEKS..=MAX_SEASON_WEEKS).contains(&request.weeks) {
        return Err(WaterPlanError::InvalidInput(format!(
            "season must be {}-{} weeks (got {})",
            MIN_SEASON_WEEKS, MAX_SEASON_WEEKS, request.weeks
        )));
    }
    if !(1..=MAX_IRRIGATIONS_PER_WEEK).contains(&request.irrigations_per_week) {
        return Err(WaterPlanError::InvalidInput(format!(
            "irrigations per week must be 1-{} (got {})",
            MAX_IRRIGATIONS_PER_WEEK, request.irrigations_per_week
        )));
    }
    if !request.area.is_finite() || request.area <= 0.0 {
        return Err(WaterPlanError::InvalidInput(format!(
            "area must be a positive number (got {})",
            request.area
        )));
    }
    if !request.rain_mm_per_week.is_finite() || request.rain_mm_per_week < 0.0 {
        return Err(WaterPlanError::InvalidInput(format!(
            "rain must be non-negative (got {})",
            request.rain_mm_per_week
        )));
    }
    Ok(())
}
