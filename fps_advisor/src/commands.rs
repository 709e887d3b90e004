//! Command execution.
//!
//! Each command resolves names through the catalogs first, runs one core
//! operation and returns the rendered report. Nothing is printed here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use advisor_core::{CapabilityBreakdown, CapabilityScorer, CompatibilityReport, GameProfile, HardwareDescriptor};

use crate::cli::{Commands, OutputFormat};
use crate::context::Advisor;
use crate::render;

/// Snapshot written by `export`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub hardware: HardwareDescriptor,
    pub capability: CapabilityBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility: Option<CompatibilityReport>,
}

fn emit<T: Serialize>(output: OutputFormat, value: &T, human: impl FnOnce(&T) -> String) -> Result<String> {
    match output {
        OutputFormat::Human => Ok(human(value)),
        OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to serialize result"),
    }
}

pub fn execute(advisor: &Advisor, command: &Commands) -> Result<String> {
    let prefs = &advisor.config.preferences;

    match command {
        Commands::Predict {
            game,
            resolution,
            quality,
            hardware,
            output,
        } => {
            let game = advisor.resolve_game(game)?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let prediction = advisor.predictor().predict(
                &hw,
                &game,
                resolution.unwrap_or(prefs.resolution),
                quality.unwrap_or(prefs.quality),
            );
            emit(*output, &prediction, render::prediction)
        }

        Commands::Presets {
            game,
            resolution,
            hardware,
            output,
        } => {
            let game = advisor.resolve_game(game)?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let resolution = resolution.unwrap_or(prefs.resolution);
            let rows = advisor.predictor().predict_all_presets(&hw, &game, resolution);
            emit(*output, &rows, |rows| {
                render::prediction_table(&format!("🎨 All Presets @ {}", resolution), rows)
            })
        }

        Commands::Resolutions {
            game,
            quality,
            hardware,
            output,
        } => {
            let game = advisor.resolve_game(game)?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let quality = quality.unwrap_or(prefs.quality);
            let rows = advisor.predictor().predict_all_resolutions(&hw, &game, quality);
            emit(*output, &rows, |rows| {
                render::prediction_table(&format!("📐 Common Resolutions @ {}", quality), rows)
            })
        }

        Commands::Optimize {
            game,
            target_fps,
            prefer_performance,
            hardware,
            output,
        } => {
            let game = advisor.resolve_game(game)?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let target = target_fps.unwrap_or(prefs.target_fps);
            let prefer_quality = prefs.prefer_quality && !prefer_performance;
            let result = advisor
                .optimizer()
                .find_optimal_settings(&hw, &game, target, prefer_quality);
            info!(
                game = game.title(),
                target_fps = target,
                target_met = result.target_met,
                "Optimization finished"
            );
            emit(*output, &result, |r| render::optimal_settings(game.title(), &hw.label, r))
        }

        Commands::Compare {
            against,
            game,
            hardware,
            output,
        } => {
            let game = game.as_deref().map(|title| advisor.resolve_game(title)).transpose()?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let comparison = advisor
                .comparator()
                .compare_named(&hw, against, &advisor.gpus, game.as_ref())
                .map_err(advisor_core::AppError::from)?;
            emit(*output, &comparison, render::comparison)
        }

        Commands::Check {
            game,
            hardware,
            output,
        } => {
            let game = advisor.resolve_game(game)?;
            let hw = hardware.resolve(&advisor.gpus)?;
            let report = advisor.games.check_compatibility(&hw, &game);
            emit(*output, &report, render::compatibility)
        }

        Commands::Capability { hardware, output } => {
            let hw = hardware.resolve(&advisor.gpus)?;
            let breakdown = CapabilityScorer::new(&advisor.tables).breakdown(&hw);
            match output {
                OutputFormat::Human => Ok(render::hardware(&hw, &breakdown)),
                OutputFormat::Json => {
                    let value = serde_json::json!({ "hardware": hw, "capability": breakdown });
                    serde_json::to_string_pretty(&value).context("Failed to serialize result")
                }
            }
        }

        Commands::Games {
            search,
            feature,
            output,
        } => {
            let mut titles = match search {
                Some(query) => advisor.games.search(query),
                None => advisor.games.titles(),
            };
            if let Some(feature) = feature {
                let with_feature = advisor.games.games_by_feature(*feature);
                titles.retain(|t| with_feature.contains(t));
            }
            let profiles: Vec<&GameProfile> = titles.iter().filter_map(|t| advisor.games.get(t)).collect();
            emit(*output, &profiles, |p| render::games(p))
        }

        Commands::Gpus { output } => {
            let models: Vec<HardwareDescriptor> = advisor
                .gpus
                .models()
                .into_iter()
                .map(|m| advisor.gpus.lookup(m))
                .collect::<Result<_, _>>()
                .map_err(advisor_core::AppError::from)?;
            emit(*output, &models, |m| render::gpus(m))
        }

        Commands::Tables { export, output } => {
            if let Some(path) = export {
                advisor.tables.save(path).map_err(advisor_core::AppError::from)?;
                return Ok(format!("✅ Calibration tables written to {}", path.display()));
            }
            emit(*output, &advisor.tables, render::tables)
        }

        Commands::Export { path, game, hardware } => {
            let hw = hardware.resolve(&advisor.gpus)?;
            let compatibility = match game {
                Some(title) => {
                    let game = advisor.resolve_game(title)?;
                    Some(advisor.games.check_compatibility(&hw, &game))
                }
                None => None,
            };
            let profile = HardwareProfile {
                capability: CapabilityScorer::new(&advisor.tables).breakdown(&hw),
                hardware: hw,
                compatibility,
            };

            let json = serde_json::to_string_pretty(&profile).context("Failed to serialize profile")?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("Failed to write profile to {}", path.display()))?;
            info!(path = %path.display(), gpu = %profile.hardware.label, "Exported profile");
            Ok(format!("✅ Profile exported to {}", path.display()))
        }

        Commands::Config { save } => {
            if let Some(path) = save {
                advisor.config.save(path).map_err(advisor_core::AppError::from)?;
                return Ok(format!("✅ Configuration written to {}", path.display()));
            }
            serde_json::to_string_pretty(&advisor.config).context("Failed to serialize configuration")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use advisor_core::{AdvisorConfig, AppError, GpuComparison, OptimalSettingsResult, PredictionResult, ScalingTables};
    use clap::Parser;

    fn run(args: &[&str]) -> Result<String> {
        console::set_colors_enabled(false);
        let mut argv = vec!["fps-advisor"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        let advisor = Advisor::from_config(AdvisorConfig::default())?;
        execute(&advisor, &cli.command)
    }

    #[test]
    fn test_predict_json_uses_config_defaults() {
        let json = run(&["predict", "--game", "Baldur's Gate 3", "--gpu", "RTX 3060", "-o", "json"]).unwrap();
        let p: PredictionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(p.game, "Baldur's Gate 3");
        assert_eq!(p.resolution.name(), "1920x1080");
        assert_eq!(p.quality.as_str(), "high");
        assert!(p.is_ordered());
    }

    #[test]
    fn test_presets_and_resolutions_json() {
        let rows: Vec<PredictionResult> =
            serde_json::from_str(&run(&["presets", "--game", "Fortnite", "--gpu", "RTX 4070", "-o", "json"]).unwrap())
                .unwrap();
        assert_eq!(rows.len(), 4);

        let rows: Vec<PredictionResult> = serde_json::from_str(
            &run(&["resolutions", "--game", "Fortnite", "--gpu", "RTX 4070", "-o", "json"]).unwrap(),
        )
        .unwrap();
        let names: Vec<String> = rows.iter().map(|p| p.resolution.name()).collect();
        assert_eq!(names, ["1920x1080", "2560x1440", "3840x2160"]);
    }

    #[test]
    fn test_optimize_prefer_performance() {
        let json = run(&[
            "optimize",
            "--game",
            "Counter-Strike 2",
            "--gpu",
            "RTX 4070",
            "--target-fps",
            "60",
            "--prefer-performance",
            "-o",
            "json",
        ])
        .unwrap();
        let result: OptimalSettingsResult = serde_json::from_str(&json).unwrap();
        assert!(result.target_met);
        assert_eq!(result.resolution.name(), "1280x720");
        assert_eq!(result.quality.as_str(), "low");
    }

    #[test]
    fn test_compare_with_game() {
        let json = run(&[
            "compare",
            "--gpu",
            "RTX 3060",
            "--against",
            "RTX 4090",
            "--game",
            "Elden Ring",
            "-o",
            "json",
        ])
        .unwrap();
        let c: GpuComparison = serde_json::from_str(&json).unwrap();
        assert!(c.performance_difference_percent > 0.0);
        assert!(c.game.is_some());
    }

    #[test]
    fn test_unknown_game_surfaces_app_error() {
        let err = run(&["predict", "--game", "Half-Life 3", "--gpu", "RTX 3060"]).unwrap_err();
        let app = err.downcast_ref::<AppError>().unwrap();
        assert_eq!(app.exit_code(), 2);
    }

    #[test]
    fn test_missing_hardware_is_precondition() {
        let err = run(&["check", "--game", "Minecraft"]).unwrap_err();
        assert!(err.downcast_ref::<AppError>().unwrap().is_precondition());
    }

    #[test]
    fn test_games_filters() {
        let text = run(&["games", "--feature", "dlss"]).unwrap();
        assert!(text.contains("Cyberpunk 2077"));
        assert!(!text.contains("Valorant"));

        let json = run(&["games", "--search", "the witcher", "-o", "json"]).unwrap();
        let list: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_gpus_and_capability() {
        assert!(run(&["gpus"]).unwrap().contains("NVIDIA GeForce RTX 4090"));
        let json = run(&["capability", "--compute-units", "2048", "--boost-clock", "1800", "-o", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["capability"]["index"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_tables_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.json");
        let msg = run(&["tables", "--export", path.to_str().unwrap()]).unwrap();
        assert!(msg.contains("written"));
        assert_eq!(ScalingTables::load(&path).unwrap(), ScalingTables::builtin());
    }

    #[test]
    fn test_export_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles").join("rig.json");
        let msg = run(&["export", "--path", path.to_str().unwrap(), "--gpu", "RTX 3060", "--game", "Elden Ring"]).unwrap();
        assert!(msg.contains("exported"));

        let profile: HardwareProfile = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(profile.hardware.label, "NVIDIA GeForce RTX 3060");
        assert!(profile.capability.index.value() > 0.0);
        let report = profile.compatibility.unwrap();
        assert_eq!(report.game, "Elden Ring");
        assert_eq!(report.memory_mb, profile.hardware.memory_mb);
    }

    #[test]
    fn test_export_without_game_omits_compatibility() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rig.json");
        run(&["export", "--path", path.to_str().unwrap(), "--compute-units", "2048", "--boost-clock", "1800"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(value.get("compatibility").is_none());
        assert_eq!(value["hardware"]["compute_units"], 2048);
    }

    #[test]
    fn test_config_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        run(&["config", "--save", path.to_str().unwrap()]).unwrap();
        assert_eq!(AdvisorConfig::load_from(&path).unwrap(), AdvisorConfig::default());
    }
}
