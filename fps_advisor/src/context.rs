//! Loaded data shared by all commands: configuration, calibration tables and
//! both catalogs. Built once per run, then borrowed by the core components.

use advisor_core::{
    AdvisorConfig, AppError, Comparator, GameCatalog, GpuCatalog, Optimizer, Predictor, ResolvedGame, ScalingTables,
};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Advisor {
    pub config: AdvisorConfig,
    pub tables: ScalingTables,
    pub games: GameCatalog,
    pub gpus: GpuCatalog,
}

impl Advisor {
    pub fn from_config(config: AdvisorConfig) -> Result<Self, AppError> {
        let tables = match &config.data.tables_path {
            Some(path) => ScalingTables::load(path)?,
            None => ScalingTables::builtin(),
        };

        let mut games = GameCatalog::builtin();
        if let Some(path) = &config.data.games_path {
            games.load_json(path)?;
        }

        debug!(
            tables_version = %tables.version,
            games = games.len(),
            "Advisor data loaded"
        );

        Ok(Self {
            config,
            tables,
            games,
            gpus: GpuCatalog::new(),
        })
    }

    /// Title lookup happens here, before any core component runs.
    pub fn resolve_game(&self, title: &str) -> Result<ResolvedGame, AppError> {
        Ok(self.games.resolve(title)?)
    }

    pub fn predictor(&self) -> Predictor<'_> {
        Predictor::new(&self.tables)
    }

    pub fn optimizer(&self) -> Optimizer<'_> {
        Optimizer::new(&self.tables)
    }

    pub fn comparator(&self) -> Comparator<'_> {
        Comparator::new(&self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::{CatalogError, MatchKind, QualityPreset, ResolutionSpec};

    #[test]
    fn test_default_config_uses_builtins() {
        let advisor = Advisor::from_config(AdvisorConfig::default()).unwrap();
        assert_eq!(advisor.tables, ScalingTables::builtin());
        assert_eq!(advisor.games.len(), 15);
    }

    #[test]
    fn test_custom_tables_and_games() {
        let dir = tempfile::tempdir().unwrap();
        let tables_path = dir.path().join("tables.json");
        let games_path = dir.path().join("games.json");

        let mut tables = ScalingTables::builtin();
        tables.model.baseline_fps = 30.0;
        tables.save(&tables_path).unwrap();
        std::fs::write(
            &games_path,
            r#"{"Indie Game": {"minimum_vram": 512, "recommended_vram": 2048, "optimization_level": "excellent"}}"#,
        )
        .unwrap();

        let mut config = AdvisorConfig::default();
        config.data.tables_path = Some(tables_path);
        config.data.games_path = Some(games_path);
        let advisor = Advisor::from_config(config).unwrap();

        assert_eq!(advisor.tables.model.baseline_fps, 30.0);
        let game = advisor.resolve_game("Indie Game").unwrap();
        assert_eq!(game.match_kind, MatchKind::Exact);
        let hw = advisor.gpus.lookup("RTX 3060").unwrap();
        let p = advisor.predictor().predict(&hw, &game, ResolutionSpec::FHD, QualityPreset::High);
        assert!(p.fps_average > 0);
    }

    #[test]
    fn test_missing_tables_file_fails() {
        let mut config = AdvisorConfig::default();
        config.data.tables_path = Some("/nonexistent/tables.json".into());
        assert!(matches!(Advisor::from_config(config), Err(AppError::Tables(_))));
    }

    #[test]
    fn test_unknown_game_is_precondition() {
        let advisor = Advisor::from_config(AdvisorConfig::default()).unwrap();
        let err = advisor.resolve_game("Half-Life 3").unwrap_err();
        assert!(err.is_precondition());
        assert!(matches!(err, AppError::Catalog(CatalogError::GameNotFound { .. })));
    }
}
