use std::path::PathBuf;
use thiserror::Error;

use crate::types::ProfileError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("game not found: '{title}'")]
    GameNotFound { title: String, suggestions: Vec<String> },

    #[error("GPU model not found: '{0}'")]
    GpuNotFound(String),

    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),

    #[error("failed to parse game database: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to {action} game database at {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Suggested titles for an unresolved game, empty otherwise.
    pub fn suggestions(&self) -> &[String] {
        match self {
            CatalogError::GameNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to {action} config at {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_only_for_missing_games() {
        let err = CatalogError::GameNotFound {
            title: "cyber".into(),
            suggestions: vec!["Cyberpunk 2077".into()],
        };
        assert_eq!(err.suggestions(), ["Cyberpunk 2077".to_string()]);
        assert!(CatalogError::GpuNotFound("RX 7900".into()).suggestions().is_empty());
    }

    #[test]
    fn test_profile_error_is_transparent() {
        let err: CatalogError = ProfileError::InvertedMemoryRequirement {
            title: "X".into(),
            minimum_mb: 8192,
            recommended_mb: 4096,
        }
        .into();
        assert!(err.to_string().contains("X"));
    }
}
