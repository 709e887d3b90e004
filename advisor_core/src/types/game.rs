//! Game metadata as consumed by the predictor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::ParseValueError;

/// How well a title is engineered relative to its era.
///
/// Declaration order is the ordinal order (poor < fair < good < excellent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationLevel {
    Poor,
    /// The source dataset calls this level "average"; unknown levels land here too.
    #[default]
    #[serde(alias = "average", alias = "unknown")]
    Fair,
    Good,
    Excellent,
}

impl OptimizationLevel {
    pub const ALL: [OptimizationLevel; 4] = [
        OptimizationLevel::Poor,
        OptimizationLevel::Fair,
        OptimizationLevel::Good,
        OptimizationLevel::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationLevel::Poor => "poor",
            OptimizationLevel::Fair => "fair",
            OptimizationLevel::Good => "good",
            OptimizationLevel::Excellent => "excellent",
        }
    }
}

impl fmt::Display for OptimizationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptimizationLevel {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(OptimizationLevel::Poor),
            "fair" | "average" => Ok(OptimizationLevel::Fair),
            "good" => Ok(OptimizationLevel::Good),
            "excellent" => Ok(OptimizationLevel::Excellent),
            _ => Err(ParseValueError::Unknown {
                kind: "optimization level",
                value: s.to_string(),
                expected: "poor, fair, good, excellent",
            }),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("'{title}': minimum memory {minimum_mb} MB exceeds recommended {recommended_mb} MB")]
    InvertedMemoryRequirement {
        title: String,
        minimum_mb: u32,
        recommended_mb: u32,
    },
}

// ============================================================================
// GameProfile
// ============================================================================

/// Requirements and engineering metadata for one title.
///
/// Invariant: `minimum_vram_mb <= recommended_vram_mb`, checked by
/// [`GameProfile::new`] and by the catalog when loading records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProfile {
    pub title: String,
    pub minimum_vram_mb: u32,
    pub recommended_vram_mb: u32,
    pub minimum_gpu: String,
    pub recommended_gpu: String,
    pub supports_raytracing: bool,
    /// Vendor upscaler that needs ray-tracing class hardware.
    pub supports_dlss: bool,
    /// Vendor-neutral upscaler.
    pub supports_fsr: bool,
    pub release_year: u16,
    pub engine: String,
    pub optimization_level: OptimizationLevel,
    pub settings: Vec<String>,
}

impl GameProfile {
    pub fn new(
        title: impl Into<String>,
        minimum_vram_mb: u32,
        recommended_vram_mb: u32,
        optimization_level: OptimizationLevel,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            title: title.into(),
            minimum_vram_mb,
            recommended_vram_mb,
            minimum_gpu: "Unknown".to_string(),
            recommended_gpu: "Unknown".to_string(),
            supports_raytracing: false,
            supports_dlss: false,
            supports_fsr: false,
            release_year: 0,
            engine: "Unknown".to_string(),
            optimization_level,
            settings: Vec::new(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.minimum_vram_mb > self.recommended_vram_mb {
            return Err(ProfileError::InvertedMemoryRequirement {
                title: self.title.clone(),
                minimum_mb: self.minimum_vram_mb,
                recommended_mb: self.recommended_vram_mb,
            });
        }
        Ok(())
    }

    pub fn with_features(mut self, raytracing: bool, dlss: bool, fsr: bool) -> Self {
        self.supports_raytracing = raytracing;
        self.supports_dlss = dlss;
        self.supports_fsr = fsr;
        self
    }

    pub fn with_gpus(mut self, minimum: impl Into<String>, recommended: impl Into<String>) -> Self {
        self.minimum_gpu = minimum.into();
        self.recommended_gpu = recommended.into();
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>, release_year: u16) -> Self {
        self.engine = engine.into();
        self.release_year = release_year;
        self
    }

    pub fn with_settings<I, S>(mut self, settings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings = settings.into_iter().map(Into::into).collect();
        self
    }

    pub fn supports_upscaling(&self) -> bool {
        self.supports_dlss || self.supports_fsr
    }
}

// ============================================================================
// ResolvedGame
// ============================================================================

/// How the caller's title query was matched to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Byte-for-byte title match.
    Exact,
    /// Case-insensitive or partial match.
    Fuzzy,
}

/// A game profile together with the quality of the lookup that produced it.
///
/// This is the predictor's game input: the predictor never looks titles up
/// itself, it only reads `match_kind` when grading confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGame {
    pub profile: GameProfile,
    pub match_kind: MatchKind,
}

impl ResolvedGame {
    pub fn exact(profile: GameProfile) -> Self {
        Self {
            profile,
            match_kind: MatchKind::Exact,
        }
    }

    pub fn fuzzy(profile: GameProfile) -> Self {
        Self {
            profile,
            match_kind: MatchKind::Fuzzy,
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.profile.title
    }
}

impl From<GameProfile> for ResolvedGame {
    fn from(profile: GameProfile) -> Self {
        Self::exact(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_rejects_inverted_memory() {
        let err = GameProfile::new("Broken", 8192, 4096, OptimizationLevel::Good).unwrap_err();
        assert!(matches!(err, ProfileError::InvertedMemoryRequirement { .. }));
        assert!(err.to_string().contains("Broken"));
    }

    #[test]
    fn test_profile_equal_requirements_allowed() {
        assert!(GameProfile::new("Flat", 4096, 4096, OptimizationLevel::Fair).is_ok());
    }

    #[test]
    fn test_optimization_level_average_alias() {
        let level: OptimizationLevel = serde_json::from_str("\"average\"").unwrap();
        assert_eq!(level, OptimizationLevel::Fair);
        assert_eq!("Average".parse::<OptimizationLevel>(), Ok(OptimizationLevel::Fair));
    }

    #[test]
    fn test_resolved_game_from_profile_is_exact() {
        let profile = GameProfile::new("Valorant", 1024, 4096, OptimizationLevel::Excellent).unwrap();
        let resolved: ResolvedGame = profile.into();
        assert_eq!(resolved.match_kind, MatchKind::Exact);
        assert_eq!(resolved.title(), "Valorant");
    }
}
