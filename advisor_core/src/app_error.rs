//! AppError - unified error type for the advisor tools.
//!
//! Wraps the component errors and separates precondition failures (a title
//! or GPU model that does not resolve) from data and environment failures.

use thiserror::Error;

use crate::errors::{CatalogError, ConfigError};
use crate::scaling_tables::TableError;
use crate::types::ParseValueError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Tables(#[from] TableError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidValue(#[from] ParseValueError),

    #[error("incomplete hardware description: {0}")]
    IncompleteHardware(String),
}

impl AppError {
    /// Caller-side input that must be fixed before any estimate can be made.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::Catalog(CatalogError::GameNotFound { .. })
                | AppError::Catalog(CatalogError::GpuNotFound(_))
                | AppError::InvalidValue(_)
                | AppError::IncompleteHardware(_)
        )
    }

    /// Process exit code: 2 for usage/precondition errors, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_precondition() {
            2
        } else {
            1
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::Catalog(CatalogError::GameNotFound { title, suggestions }) => {
                let mut msg = format!("❌ Game '{}' not found in database", title);
                if suggestions.is_empty() {
                    msg.push_str("\n💡 Run 'fps-advisor games' to list supported titles");
                } else {
                    msg.push_str(&format!("\n💡 Did you mean: {}", suggestions.join(", ")));
                }
                msg
            }
            AppError::Catalog(CatalogError::GpuNotFound(name)) => {
                format!(
                    "❌ GPU model '{}' not found\n💡 Run 'fps-advisor gpus' for known models, or describe the card with --compute-units/--base-clock/--boost-clock/--memory",
                    name
                )
            }
            AppError::Catalog(e) => format!("❌ Game database error: {}", e),
            AppError::Tables(e) => format!("❌ Calibration tables rejected: {}", e),
            AppError::Config(e) => format!("❌ Configuration error: {}", e),
            AppError::InvalidValue(e) => format!("❌ Invalid value: {}", e),
            AppError::IncompleteHardware(detail) => {
                format!("❌ Incomplete hardware description: {}\n💡 Pass --gpu <MODEL> or the manual hardware flags", detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_not_found_is_precondition_with_suggestions() {
        let err: AppError = CatalogError::GameNotFound {
            title: "Witcher".into(),
            suggestions: vec!["The Witcher 3: Wild Hunt".into()],
        }
        .into();
        assert!(err.is_precondition());
        assert_eq!(err.exit_code(), 2);
        let msg = err.user_message();
        assert!(msg.starts_with("❌ Game 'Witcher' not found"));
        assert!(msg.contains("Did you mean: The Witcher 3: Wild Hunt"));
    }

    #[test]
    fn test_table_error_is_not_precondition() {
        let err: AppError = TableError::MissingEntry {
            table: "quality_presets",
            key: "ultra".into(),
        }
        .into();
        assert!(!err.is_precondition());
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_message().contains("ultra"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = "8k-ish".parse::<crate::types::ResolutionSpec>().unwrap_err();
        let err = AppError::from(parse);
        assert!(err.is_precondition());
        assert!(err.user_message().starts_with("❌ Invalid value"));
    }

    #[test]
    fn test_gpu_not_found_message_points_to_manual_flags() {
        let err = AppError::from(CatalogError::GpuNotFound("Voodoo".into()));
        assert!(err.user_message().contains("--compute-units"));
    }
}
