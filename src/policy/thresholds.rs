//! Named policy constants governing the validation rules.
//!
//! Thresholds are read at decision time and change only through an
//! explicit propose-and-record mechanism - never as a side effect of
//! evaluating a proposal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The live threshold set the guard enforces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Safety ratio every proposed state must meet
    pub minimum_safety_ratio: f64,
    /// Ratio considered healthy for continued growth
    pub recommended_safety_ratio: f64,
    /// Ratio considered optimal for rapid evolution
    pub optimal_safety_ratio: f64,
    /// Maximum intelligence or power growth per step
    pub max_single_step_growth: f64,
    /// Alignment may never sit below this value
    pub alignment_floor: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minimum_safety_ratio: 1.0,
            recommended_safety_ratio: 1.5,
            optimal_safety_ratio: 2.0,
            max_single_step_growth: 0.5,
            alignment_floor: 1.0,
        }
    }
}

impl Thresholds {
    /// Read a threshold by name.
    pub fn get(&self, name: ThresholdName) -> f64 {
        match name {
            ThresholdName::MinimumSafetyRatio => self.minimum_safety_ratio,
            ThresholdName::RecommendedSafetyRatio => self.recommended_safety_ratio,
            ThresholdName::OptimalSafetyRatio => self.optimal_safety_ratio,
            ThresholdName::MaxSingleStepGrowth => self.max_single_step_growth,
            ThresholdName::AlignmentFloor => self.alignment_floor,
        }
    }
}

/// Keyed access to individual thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdName {
    MinimumSafetyRatio,
    RecommendedSafetyRatio,
    OptimalSafetyRatio,
    MaxSingleStepGrowth,
    AlignmentFloor,
}

impl ThresholdName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MinimumSafetyRatio => "minimum_safety_ratio",
            Self::RecommendedSafetyRatio => "recommended_safety_ratio",
            Self::OptimalSafetyRatio => "optimal_safety_ratio",
            Self::MaxSingleStepGrowth => "max_single_step_growth",
            Self::AlignmentFloor => "alignment_floor",
        }
    }
}

impl fmt::Display for ThresholdName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
