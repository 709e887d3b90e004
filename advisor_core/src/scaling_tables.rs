//! Scaling Tables Module
//!
//! Versioned calibration data for the estimation model:
//! - resolution -> load multiplier (pixel ratio raised to a sub-linear exponent)
//! - quality preset -> load multiplier
//! - optimization level -> reference capability index for 60 FPS at 1080p/high
//! - architecture tier -> capability multiplier
//! - the tunable model constants (composite weights, spread, penalties)
//!
//! Every lookup is a scan over an enumerated entry list, so new resolutions,
//! presets or tiers are data changes, not code changes. Changing a value
//! recalibrates the model without changing the algorithm.
//!
//! The whole structure round-trips through JSON exactly, so it can be shipped
//! as an external versioned file and loaded once at startup:
//!
//! ```rust
//! use advisor_core::scaling_tables::ScalingTables;
//!
//! let tables = ScalingTables::builtin();
//! let json = tables.to_json().unwrap();
//! assert_eq!(ScalingTables::from_json(&json).unwrap(), tables);
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::types::{ArchitectureTier, OptimizationLevel, QualityPreset, ResolutionSpec};

/// Schema version understood by this build.
pub const TABLES_SCHEMA_VERSION: &str = "1";

// ============================================================================
// Built-in calibration constants
// ============================================================================

/// Sub-linear pixel-count exponent (fixed per-frame CPU overhead).
pub const RESOLUTION_EXPONENT: f64 = 0.9;

/// Frame rate the reference indices are calibrated to (1080p/high).
pub const BASELINE_FPS: f64 = 60.0;

/// Composite weights: throughput^0.7 x memory^0.2 x tier^0.1.
pub const THROUGHPUT_WEIGHT: f64 = 0.7;
pub const MEMORY_WEIGHT: f64 = 0.2;
pub const TIER_WEIGHT: f64 = 0.1;

/// Lowest capability index ever produced; keeps ratios finite.
pub const CAPABILITY_FLOOR: f64 = 0.05;

/// Flagship throughput reference (16384 compute units at 2520 MHz).
pub const FLAGSHIP_COMPUTE_UNITS: u32 = 16_384;
pub const FLAGSHIP_CLOCK_MHZ: u32 = 2_520;

/// Memory capacity that earns the full memory factor.
pub const MEMORY_REFERENCE_MB: u32 = 8_192;

/// Spread of min/max/1%-low around the average.
pub const SPREAD_MIN: f64 = 0.85;
pub const SPREAD_MAX: f64 = 1.2;
pub const SPREAD_ONE_PERCENT_LOW: f64 = 0.55;

/// Below-minimum memory penalty bounds (memory/minimum ratio clamped into range).
pub const BELOW_MINIMUM_PENALTY_FLOOR: f64 = 0.5;
pub const BELOW_MINIMUM_PENALTY_CAP: f64 = 0.75;

/// Between minimum and recommended the penalty rises linearly from this to 1.0.
pub const BELOW_RECOMMENDED_PENALTY_START: f64 = 0.85;

/// Capability ratios outside this band are extrapolation.
pub const EXTRAPOLATION_RATIO_LOW: f64 = 0.3;
pub const EXTRAPOLATION_RATIO_HIGH: f64 = 3.0;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum TableError {
    #[error("unsupported calibration table version '{found}' (expected '{expected}')")]
    UnsupportedVersion { found: String, expected: &'static str },

    #[error("calibration table '{table}' has no entry for '{key}'")]
    MissingEntry { table: &'static str, key: String },

    #[error("calibration table '{table}' lists '{key}' more than once")]
    DuplicateEntry { table: &'static str, key: String },

    #[error("calibration table '{table}' is not monotone at '{key}': {detail}")]
    NotMonotone {
        table: &'static str,
        key: String,
        detail: String,
    },

    #[error("invalid calibration constant '{name}' = {value}: {reason}")]
    InvalidConstant {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("failed to parse calibration tables: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {action} calibration tables at {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// Table entries
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEntry {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub multiplier: f64,
}

impl ResolutionEntry {
    #[inline]
    pub fn spec(&self) -> ResolutionSpec {
        ResolutionSpec::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityEntry {
    pub preset: QualityPreset,
    pub load: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationEntry {
    pub level: OptimizationLevel,
    pub reference_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierEntry {
    pub tier: ArchitectureTier,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub throughput: f64,
    pub memory: f64,
    pub tier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadConstants {
    pub min: f64,
    pub max: f64,
    pub one_percent_low: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryPenalty {
    pub below_minimum_floor: f64,
    pub below_minimum_cap: f64,
    pub below_recommended_start: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConstants {
    pub baseline_fps: f64,
    pub weights: CompositeWeights,
    pub capability_floor: f64,
    pub flagship_compute_units: u32,
    pub flagship_clock_mhz: u32,
    pub memory_reference_mb: u32,
    pub spread: SpreadConstants,
    pub memory_penalty: MemoryPenalty,
    pub extrapolation_ratio_low: f64,
    pub extrapolation_ratio_high: f64,
    pub comparison_resolution: ResolutionSpec,
    pub comparison_quality: QualityPreset,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            baseline_fps: BASELINE_FPS,
            weights: CompositeWeights {
                throughput: THROUGHPUT_WEIGHT,
                memory: MEMORY_WEIGHT,
                tier: TIER_WEIGHT,
            },
            capability_floor: CAPABILITY_FLOOR,
            flagship_compute_units: FLAGSHIP_COMPUTE_UNITS,
            flagship_clock_mhz: FLAGSHIP_CLOCK_MHZ,
            memory_reference_mb: MEMORY_REFERENCE_MB,
            spread: SpreadConstants {
                min: SPREAD_MIN,
                max: SPREAD_MAX,
                one_percent_low: SPREAD_ONE_PERCENT_LOW,
            },
            memory_penalty: MemoryPenalty {
                below_minimum_floor: BELOW_MINIMUM_PENALTY_FLOOR,
                below_minimum_cap: BELOW_MINIMUM_PENALTY_CAP,
                below_recommended_start: BELOW_RECOMMENDED_PENALTY_START,
            },
            extrapolation_ratio_low: EXTRAPOLATION_RATIO_LOW,
            extrapolation_ratio_high: EXTRAPOLATION_RATIO_HIGH,
            comparison_resolution: ResolutionSpec::FHD,
            comparison_quality: QualityPreset::High,
        }
    }
}

impl ModelConstants {
    /// Throughput of the flagship reference (compute units x MHz).
    #[inline]
    pub fn flagship_throughput(&self) -> f64 {
        self.flagship_compute_units as f64 * self.flagship_clock_mhz as f64
    }
}

/// Where a resolution sits relative to the populated calibration range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calibration {
    /// In the table and strictly inside its pixel range.
    Interior,
    /// Smallest/largest table entry, or an unlisted size inside the range.
    Edge,
    /// Beyond the table's pixel range.
    Outside,
}

// ============================================================================
// ScalingTables
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingTables {
    pub version: String,
    pub reference_resolution: ResolutionSpec,
    pub resolution_exponent: f64,
    pub resolutions: Vec<ResolutionEntry>,
    pub quality_presets: Vec<QualityEntry>,
    pub optimization_levels: Vec<OptimizationEntry>,
    pub tiers: Vec<TierEntry>,
    pub model: ModelConstants,
}

/// (label, width, height) of the built-in resolution table.
const BUILTIN_RESOLUTIONS: [(&str, u32, u32); 8] = [
    ("720p", 1280, 720),
    ("900p", 1600, 900),
    ("1080p", 1920, 1080),
    ("Ultrawide 1080p", 2560, 1080),
    ("1440p", 2560, 1440),
    ("Ultrawide 1440p", 3440, 1440),
    ("4K", 3840, 2160),
    ("Ultrawide 4K", 5120, 2160),
];

const BUILTIN_QUALITY: [QualityEntry; 4] = [
    QualityEntry { preset: QualityPreset::Low, load: 0.5 },
    QualityEntry { preset: QualityPreset::Medium, load: 0.7 },
    QualityEntry { preset: QualityPreset::High, load: 1.0 },
    QualityEntry { preset: QualityPreset::Ultra, load: 1.4 },
];

const BUILTIN_OPTIMIZATION: [OptimizationEntry; 4] = [
    OptimizationEntry { level: OptimizationLevel::Poor, reference_index: 0.46 },
    OptimizationEntry { level: OptimizationLevel::Fair, reference_index: 0.36 },
    OptimizationEntry { level: OptimizationLevel::Good, reference_index: 0.28 },
    OptimizationEntry { level: OptimizationLevel::Excellent, reference_index: 0.18 },
];

const BUILTIN_TIERS: [TierEntry; 4] = [
    TierEntry { tier: ArchitectureTier::Entry, multiplier: 0.7 },
    TierEntry { tier: ArchitectureTier::MidRange, multiplier: 1.0 },
    TierEntry { tier: ArchitectureTier::HighEnd, multiplier: 1.3 },
    TierEntry { tier: ArchitectureTier::Enthusiast, multiplier: 1.6 },
];

impl Default for ScalingTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScalingTables {
    /// The calibration shipped with this build.
    pub fn builtin() -> Self {
        let reference = ResolutionSpec::FHD;
        let resolutions = BUILTIN_RESOLUTIONS
            .iter()
            .map(|&(name, width, height)| ResolutionEntry {
                name: name.to_string(),
                width,
                height,
                multiplier: pixel_ratio_multiplier(
                    &ResolutionSpec::new(width, height),
                    &reference,
                    RESOLUTION_EXPONENT,
                ),
            })
            .collect();

        Self {
            version: TABLES_SCHEMA_VERSION.to_string(),
            reference_resolution: reference,
            resolution_exponent: RESOLUTION_EXPONENT,
            resolutions,
            quality_presets: BUILTIN_QUALITY.to_vec(),
            optimization_levels: BUILTIN_OPTIMIZATION.to_vec(),
            tiers: BUILTIN_TIERS.to_vec(),
            model: ModelConstants::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    /// Load multiplier for a resolution (1.0 at the reference resolution).
    ///
    /// Listed resolutions use their table value. Unlisted sizes inside the
    /// table's pixel range interpolate log-log between the neighbouring
    /// entries; outside it they extend from the nearest endpoint with
    /// `resolution_exponent`. The result is non-decreasing in pixel count for
    /// any table that passes [`Self::validate`].
    pub fn resolution_multiplier(&self, resolution: &ResolutionSpec) -> f64 {
        if let Some(entry) = self.resolution_entry(resolution) {
            return entry.multiplier;
        }

        let points: Vec<(f64, f64)> = self
            .sorted_resolution_entries()
            .into_iter()
            .map(|e| (e.spec().pixels().max(1) as f64, e.multiplier))
            .collect();
        let (Some(&(first_px, first_m)), Some(&(last_px, last_m))) = (points.first(), points.last()) else {
            return pixel_ratio_multiplier(resolution, &self.reference_resolution, self.resolution_exponent);
        };

        let pixels = resolution.pixels().max(1) as f64;
        if pixels <= first_px {
            return first_m * (pixels / first_px).powf(self.resolution_exponent);
        }
        if pixels >= last_px {
            return last_m * (pixels / last_px).powf(self.resolution_exponent);
        }

        // first_px < pixels < last_px, so 1 <= upper < points.len()
        let upper = points.partition_point(|&(px, _)| px < pixels);
        let (lo_px, lo_m) = points[upper - 1];
        let (hi_px, hi_m) = points[upper];
        if hi_px == pixels {
            return hi_m;
        }
        let t = (pixels / lo_px).ln() / (hi_px / lo_px).ln();
        (lo_m.ln() + t * (hi_m.ln() - lo_m.ln())).exp()
    }

    /// Entries sorted by pixel count (ties keep table order).
    fn sorted_resolution_entries(&self) -> Vec<&ResolutionEntry> {
        let mut sorted: Vec<&ResolutionEntry> = self.resolutions.iter().collect();
        sorted.sort_by_key(|e| e.spec().pixels());
        sorted
    }

    pub fn resolution_entry(&self, resolution: &ResolutionSpec) -> Option<&ResolutionEntry> {
        self.resolutions
            .iter()
            .find(|e| e.width == resolution.width() && e.height == resolution.height())
    }

    pub fn quality_load(&self, preset: QualityPreset) -> f64 {
        self.quality_presets
            .iter()
            .find(|e| e.preset == preset)
            .map(|e| e.load)
            .unwrap_or(1.0)
    }

    pub fn reference_index(&self, level: OptimizationLevel) -> f64 {
        self.optimization_levels
            .iter()
            .find(|e| e.level == level)
            .map(|e| e.reference_index)
            .unwrap_or(1.0)
    }

    pub fn tier_multiplier(&self, tier: ArchitectureTier) -> f64 {
        self.tiers
            .iter()
            .find(|e| e.tier == tier)
            .map(|e| e.multiplier)
            .unwrap_or(1.0)
    }

    /// Table resolutions sorted by pixel count (ties keep table order).
    pub fn resolutions_by_pixels(&self) -> Vec<ResolutionSpec> {
        let mut specs: Vec<ResolutionSpec> = self.resolutions.iter().map(ResolutionEntry::spec).collect();
        specs.sort_by_key(|s| s.pixels());
        specs
    }

    pub fn calibration_of(&self, resolution: &ResolutionSpec) -> Calibration {
        let pixels = resolution.pixels();
        let min = self.resolutions.iter().map(|e| e.spec().pixels()).min();
        let max = self.resolutions.iter().map(|e| e.spec().pixels()).max();
        let (Some(min), Some(max)) = (min, max) else {
            return Calibration::Outside;
        };

        if pixels < min || pixels > max {
            Calibration::Outside
        } else if self.resolution_entry(resolution).is_none() || pixels == min || pixels == max {
            Calibration::Edge
        } else {
            Calibration::Interior
        }
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check completeness, monotonicity and constant ranges.
    ///
    /// A table that passes keeps the model total and monotone.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.version != TABLES_SCHEMA_VERSION {
            return Err(TableError::UnsupportedVersion {
                found: self.version.clone(),
                expected: TABLES_SCHEMA_VERSION,
            });
        }
        require_positive("resolution_exponent", self.resolution_exponent)?;
        if self.reference_resolution.pixels() == 0 {
            return Err(TableError::InvalidConstant {
                name: "reference_resolution",
                value: 0.0,
                reason: "must have a non-zero pixel count",
            });
        }

        self.validate_resolutions()?;

        let loads = ordered_values("quality_presets", &QualityPreset::ALL, |p| {
            self.quality_presets.iter().filter(|e| e.preset == *p).map(|e| e.load).collect()
        })?;
        require_strictly_increasing("quality_presets", &QualityPreset::ALL, &loads)?;

        let references = ordered_values("optimization_levels", &OptimizationLevel::ALL, |l| {
            self.optimization_levels
                .iter()
                .filter(|e| e.level == *l)
                .map(|e| e.reference_index)
                .collect()
        })?;
        // Better-engineered titles need strictly less capability.
        for (pair, levels) in references.windows(2).zip(OptimizationLevel::ALL.windows(2)) {
            if pair[1] >= pair[0] {
                return Err(TableError::NotMonotone {
                    table: "optimization_levels",
                    key: levels[1].to_string(),
                    detail: format!("{} must be below {} of '{}'", pair[1], pair[0], levels[0]),
                });
            }
        }

        let tiers = ordered_values("tiers", &ArchitectureTier::ALL, |t| {
            self.tiers.iter().filter(|e| e.tier == *t).map(|e| e.multiplier).collect()
        })?;
        for (pair, names) in tiers.windows(2).zip(ArchitectureTier::ALL.windows(2)) {
            if pair[1] < pair[0] {
                return Err(TableError::NotMonotone {
                    table: "tiers",
                    key: names[1].to_string(),
                    detail: format!("{} is below {} of '{}'", pair[1], pair[0], names[0]),
                });
            }
        }

        self.validate_model()
    }

    fn validate_resolutions(&self) -> Result<(), TableError> {
        if self.resolutions.is_empty() {
            return Err(TableError::MissingEntry {
                table: "resolutions",
                key: "<any>".to_string(),
            });
        }

        let sorted = self.sorted_resolution_entries();

        for (i, entry) in sorted.iter().enumerate() {
            if entry.width == 0 || entry.height == 0 {
                return Err(TableError::InvalidConstant {
                    name: "resolutions.width/height",
                    value: 0.0,
                    reason: "dimensions must be non-zero",
                });
            }
            require_positive("resolutions.multiplier", entry.multiplier)?;

            let duplicate = self
                .resolutions
                .iter()
                .filter(|e| e.name == entry.name || (e.width == entry.width && e.height == entry.height))
                .count()
                > 1;
            if duplicate {
                return Err(TableError::DuplicateEntry {
                    table: "resolutions",
                    key: entry.name.clone(),
                });
            }

            if i > 0 && entry.multiplier < sorted[i - 1].multiplier {
                return Err(TableError::NotMonotone {
                    table: "resolutions",
                    key: entry.name.clone(),
                    detail: format!(
                        "multiplier {} is below {} of smaller '{}'",
                        entry.multiplier,
                        sorted[i - 1].multiplier,
                        sorted[i - 1].name
                    ),
                });
            }
        }
        Ok(())
    }

    fn validate_model(&self) -> Result<(), TableError> {
        let m = &self.model;
        require_positive("model.baseline_fps", m.baseline_fps)?;
        require_non_negative("model.weights.throughput", m.weights.throughput)?;
        require_non_negative("model.weights.memory", m.weights.memory)?;
        require_non_negative("model.weights.tier", m.weights.tier)?;
        require_positive("model.capability_floor", m.capability_floor)?;
        require_positive("model.flagship_compute_units", m.flagship_compute_units as f64)?;
        require_positive("model.flagship_clock_mhz", m.flagship_clock_mhz as f64)?;
        require_positive("model.memory_reference_mb", m.memory_reference_mb as f64)?;

        let s = &m.spread;
        require_positive("model.spread.one_percent_low", s.one_percent_low)?;
        if !(s.one_percent_low <= s.min && s.min <= 1.0 && s.max.is_finite() && s.max >= 1.0) {
            return Err(TableError::InvalidConstant {
                name: "model.spread",
                value: s.min,
                reason: "requires 0 < one_percent_low <= min <= 1 <= max",
            });
        }

        let p = &m.memory_penalty;
        require_positive("model.memory_penalty.below_minimum_floor", p.below_minimum_floor)?;
        if !(p.below_minimum_floor <= p.below_minimum_cap
            && p.below_minimum_cap <= p.below_recommended_start
            && p.below_recommended_start <= 1.0)
        {
            return Err(TableError::InvalidConstant {
                name: "model.memory_penalty",
                value: p.below_minimum_cap,
                reason: "requires 0 < below_minimum_floor <= below_minimum_cap <= below_recommended_start <= 1",
            });
        }

        require_positive("model.extrapolation_ratio_low", m.extrapolation_ratio_low)?;
        if !(m.extrapolation_ratio_low < 1.0
            && m.extrapolation_ratio_high.is_finite()
            && m.extrapolation_ratio_high > 1.0)
        {
            return Err(TableError::InvalidConstant {
                name: "model.extrapolation_ratio_high",
                value: m.extrapolation_ratio_high,
                reason: "requires extrapolation_ratio_low < 1 < extrapolation_ratio_high",
            });
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------------

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: ScalingTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let json = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            version = %tables.version,
            resolutions = tables.resolutions.len(),
            "Loaded calibration tables"
        );
        Ok(tables)
    }

    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let io_err = |source| TableError::Io {
            action: "write",
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)
    }
}

/// (pixels / reference pixels) ^ exponent
pub fn pixel_ratio_multiplier(resolution: &ResolutionSpec, reference: &ResolutionSpec, exponent: f64) -> f64 {
    let ratio = resolution.pixels() as f64 / reference.pixels().max(1) as f64;
    ratio.powf(exponent)
}

fn require_positive(name: &'static str, value: f64) -> Result<(), TableError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidConstant {
            name,
            value,
            reason: "must be finite and positive",
        })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), TableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidConstant {
            name,
            value,
            reason: "must be finite and non-negative",
        })
    }
}

/// Exactly one positive value per key, in key order.
fn ordered_values<K, F>(table: &'static str, keys: &[K], values_for: F) -> Result<Vec<f64>, TableError>
where
    K: std::fmt::Display,
    F: Fn(&K) -> Vec<f64>,
{
    keys.iter()
        .map(|key| match values_for(key).as_slice() {
            [] => Err(TableError::MissingEntry {
                table,
                key: key.to_string(),
            }),
            [value] => {
                require_positive(table, *value)?;
                Ok(*value)
            }
            _ => Err(TableError::DuplicateEntry {
                table,
                key: key.to_string(),
            }),
        })
        .collect()
}

fn require_strictly_increasing<K: std::fmt::Display>(
    table: &'static str,
    keys: &[K],
    values: &[f64],
) -> Result<(), TableError> {
    for (pair, names) in values.windows(2).zip(keys.windows(2)) {
        if pair[1] <= pair[0] {
            return Err(TableError::NotMonotone {
                table,
                key: names[1].to_string(),
                detail: format!("{} must exceed {} of '{}'", pair[1], pair[0], names[0]),
            });
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_validate() {
        ScalingTables::builtin().validate().unwrap();
    }

    #[test]
    fn test_reference_resolution_multiplier_is_one() {
        let tables = ScalingTables::builtin();
        assert!((tables.resolution_multiplier(&ResolutionSpec::FHD) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolution_multiplier_sub_linear() {
        let tables = ScalingTables::builtin();
        let uhd = tables.resolution_multiplier(&ResolutionSpec::UHD);
        // 4x the pixels costs less than 4x the frame time.
        assert!(uhd > 3.0 && uhd < 4.0, "uhd multiplier {}", uhd);
        let hd = tables.resolution_multiplier(&ResolutionSpec::HD);
        assert!(hd > 0.44 && hd < 1.0, "hd multiplier {}", hd);
    }

    #[test]
    fn test_unlisted_resolution_matches_formula_on_builtin_tables() {
        let tables = ScalingTables::builtin();
        for odd in [ResolutionSpec::new(2048, 1152), ResolutionSpec::new(640, 480), ResolutionSpec::new(7680, 4320)] {
            assert!(tables.resolution_entry(&odd).is_none());
            let expected = pixel_ratio_multiplier(&odd, &ResolutionSpec::FHD, RESOLUTION_EXPONENT);
            let actual = tables.resolution_multiplier(&odd);
            assert!((actual - expected).abs() < 1e-9 * expected, "{}: {} vs {}", odd, actual, expected);
        }
    }

    #[test]
    fn test_unlisted_resolution_follows_custom_table() {
        let mut tables = ScalingTables::builtin();
        let uhd = tables.resolutions.iter_mut().find(|e| e.name == "4K").unwrap();
        uhd.multiplier = 2.3;
        tables.validate().unwrap();
        let tables = ScalingTables::from_json(&tables.to_json().unwrap()).unwrap();

        let between = ResolutionSpec::new(3000, 2000);
        let below = tables.resolution_multiplier(&ResolutionSpec::new(3440, 1440));
        let m = tables.resolution_multiplier(&between);
        assert!(m >= below && m <= 2.3, "interpolated {} outside [{}, 2.3]", m, below);

        // Beyond the largest entry the curve continues from that entry.
        let huge = tables.resolution_multiplier(&ResolutionSpec::new(7680, 4320));
        assert!(huge > tables.resolution_multiplier(&ResolutionSpec::new(5120, 2160)));
    }

    #[test]
    fn test_quality_loads_increase() {
        let tables = ScalingTables::builtin();
        let loads: Vec<f64> = QualityPreset::ALL.iter().map(|p| tables.quality_load(*p)).collect();
        assert_eq!(loads, vec![0.5, 0.7, 1.0, 1.4]);
    }

    #[test]
    fn test_reference_indices_decrease_with_better_engineering() {
        let tables = ScalingTables::builtin();
        assert!(tables.reference_index(OptimizationLevel::Poor) > tables.reference_index(OptimizationLevel::Fair));
        assert!(tables.reference_index(OptimizationLevel::Good) > tables.reference_index(OptimizationLevel::Excellent));
    }

    #[test]
    fn test_tier_multipliers() {
        let tables = ScalingTables::builtin();
        assert_eq!(tables.tier_multiplier(ArchitectureTier::Entry), 0.7);
        assert_eq!(tables.tier_multiplier(ArchitectureTier::Enthusiast), 1.6);
    }

    #[test]
    fn test_calibration_of() {
        let tables = ScalingTables::builtin();
        assert_eq!(tables.calibration_of(&ResolutionSpec::QHD), Calibration::Interior);
        assert_eq!(tables.calibration_of(&ResolutionSpec::HD), Calibration::Edge);
        assert_eq!(tables.calibration_of(&ResolutionSpec::new(5120, 2160)), Calibration::Edge);
        assert_eq!(tables.calibration_of(&ResolutionSpec::new(2048, 1152)), Calibration::Edge);
        assert_eq!(tables.calibration_of(&ResolutionSpec::new(640, 480)), Calibration::Outside);
        assert_eq!(tables.calibration_of(&ResolutionSpec::new(7680, 4320)), Calibration::Outside);
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let tables = ScalingTables::builtin();
        let json = tables.to_json().unwrap();
        let back = ScalingTables::from_json(&json).unwrap();
        assert_eq!(back, tables);
        assert_eq!(back.to_json().unwrap(), json);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tables.json");
        let tables = ScalingTables::builtin();
        tables.save(&path).unwrap();
        assert_eq!(ScalingTables::load(&path).unwrap(), tables);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ScalingTables::load(Path::new("/nonexistent/tables.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { action: "read", .. }));
    }

    #[test]
    fn test_rejects_missing_preset() {
        let mut tables = ScalingTables::builtin();
        tables.quality_presets.retain(|e| e.preset != QualityPreset::Ultra);
        let err = tables.validate().unwrap_err();
        assert!(matches!(err, TableError::MissingEntry { table: "quality_presets", .. }));
    }

    #[test]
    fn test_rejects_duplicate_tier() {
        let mut tables = ScalingTables::builtin();
        tables.tiers.push(TierEntry { tier: ArchitectureTier::Entry, multiplier: 0.8 });
        assert!(matches!(tables.validate().unwrap_err(), TableError::DuplicateEntry { table: "tiers", .. }));
    }

    #[test]
    fn test_rejects_non_monotone_resolution() {
        let mut tables = ScalingTables::builtin();
        let uhd = tables.resolutions.iter_mut().find(|e| e.name == "4K").unwrap();
        uhd.multiplier = 0.5;
        assert!(matches!(tables.validate().unwrap_err(), TableError::NotMonotone { table: "resolutions", .. }));
    }

    #[test]
    fn test_rejects_inverted_reference_indices() {
        let mut tables = ScalingTables::builtin();
        for entry in tables.optimization_levels.iter_mut() {
            if entry.level == OptimizationLevel::Excellent {
                entry.reference_index = 0.9;
            }
        }
        assert!(matches!(
            tables.validate().unwrap_err(),
            TableError::NotMonotone { table: "optimization_levels", .. }
        ));
    }

    #[test]
    fn test_rejects_spread_breaking_ordering() {
        let mut tables = ScalingTables::builtin();
        tables.model.spread.one_percent_low = 0.9;
        assert!(matches!(tables.validate().unwrap_err(), TableError::InvalidConstant { name: "model.spread", .. }));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let mut tables = ScalingTables::builtin();
        tables.version = "99".into();
        assert!(matches!(tables.validate().unwrap_err(), TableError::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(ScalingTables::from_json("{ not json").unwrap_err(), TableError::Json(_)));
    }
}
