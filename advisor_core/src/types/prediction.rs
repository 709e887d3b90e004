//! Result records produced by the predictor and the optimizer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{QualityPreset, ResolutionSpec};

/// How far a prediction extrapolates beyond the calibrated region.
///
/// Ordered low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// Frame-rate estimate for one hardware/game/resolution/preset combination.
///
/// Invariant: `fps_1pct_low <= fps_min <= fps_average <= fps_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub game: String,
    pub gpu: String,
    pub resolution: ResolutionSpec,
    pub quality: QualityPreset,
    pub fps_min: u32,
    pub fps_max: u32,
    pub fps_average: u32,
    pub fps_1pct_low: u32,
    pub confidence: Confidence,
    pub notes: Vec<String>,
}

impl PredictionResult {
    pub fn is_ordered(&self) -> bool {
        self.fps_1pct_low <= self.fps_min
            && self.fps_min <= self.fps_average
            && self.fps_average <= self.fps_max
    }
}

/// Outcome of the resolution x preset search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalSettingsResult {
    pub resolution: ResolutionSpec,
    pub quality: QualityPreset,
    pub prediction: PredictionResult,
    pub target_fps: u32,
    pub target_met: bool,
    /// Number of grid combinations evaluated.
    pub evaluated: usize,
    pub notes: Vec<String>,
}
