//! Core engine for the fps-advisor tools
//!
//! Estimates frame rates for a hardware/game pair and searches settings:
//! - Capability scoring (hardware descriptor -> capability index)
//! - Versioned scaling tables (resolution, preset, optimization level, tier)
//! - Frame-rate prediction with spread, confidence and advisory notes
//! - Exhaustive resolution x preset search against a target frame rate
//! - GPU-to-GPU comparison
//! - Game and GPU catalogs (the only place names are resolved)
//! - Configuration, logging and error types shared by the binaries
//!
//! Every estimation call is a pure function of its inputs and the immutable
//! tables; nothing is cached between calls.

pub mod types;
pub mod scaling_tables;
pub mod capability;
pub mod predictor;
pub mod optimizer;
pub mod comparator;

pub mod game_catalog;
pub mod gpu_catalog;

pub mod config;
pub mod logging;
pub mod errors;
pub mod app_error;
pub mod float_compare;

#[cfg(test)]
mod test_fixtures;

pub use types::{
    ArchitectureTier, CapabilityIndex, Confidence, GameProfile, HardwareDescriptor, MatchKind,
    OptimalSettingsResult, OptimizationLevel, ParseValueError, PredictionResult, ProfileError,
    QualityPreset, ResolutionSpec, ResolvedGame,
};

pub use scaling_tables::{Calibration, ModelConstants, ScalingTables, TableError, TABLES_SCHEMA_VERSION};
pub use capability::{CapabilityBreakdown, CapabilityScorer};
pub use predictor::{Predictor, COMMON_RESOLUTIONS};
pub use optimizer::{GridPoint, Optimizer};
pub use comparator::{Comparator, GameComparison, GpuComparison};

pub use game_catalog::{Compatibility, CompatibilityReport, Feature, GameCatalog, GameRecord};
pub use gpu_catalog::GpuCatalog;

pub use config::AdvisorConfig;
pub use errors::{CatalogError, ConfigError};
pub use app_error::AppError;
