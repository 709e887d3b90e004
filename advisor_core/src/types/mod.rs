//! Value Types Module
//!
//! Immutable value objects shared by every stage of the estimation pipeline.
//!
//! ## Module list
//! - `hardware`: `HardwareDescriptor` and the `ArchitectureTier` ordinal
//! - `game`: `GameProfile`, `OptimizationLevel`, `ResolvedGame`
//! - `display`: `ResolutionSpec` and `QualityPreset` scaling keys
//! - `capability`: `CapabilityIndex` newtype
//! - `prediction`: `PredictionResult`, `Confidence`, `OptimalSettingsResult`

pub mod capability;
pub mod display;
pub mod game;
pub mod hardware;
pub mod prediction;

pub use capability::CapabilityIndex;
pub use display::{QualityPreset, ResolutionSpec};
pub use game::{GameProfile, MatchKind, OptimizationLevel, ProfileError, ResolvedGame};
pub use hardware::{ArchitectureTier, HardwareDescriptor};
pub use prediction::{Confidence, OptimalSettingsResult, PredictionResult};

use thiserror::Error;

/// Failure to parse one of the ordinal/scaling-key types from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseValueError {
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    Unknown {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid resolution '{0}', expected WIDTHxHEIGHT (e.g. 1920x1080) or a shorthand like 1440p/4k")]
    Resolution(String),
}
