//! Settings Optimizer
//!
//! Exhaustive search over the resolution x quality-preset grid. The grid is
//! small and fixed (every table resolution x four presets), so every point is
//! predicted exactly once and the selection is made over the full result set:
//!
//! - prefer quality: scan from the heaviest point down, take the first that
//!   reaches the target (the highest-load qualifying point)
//! - prefer performance: scan from the lightest point up, take the first that
//!   reaches the target
//! - nothing qualifies: return the point with the highest average, reporting
//!   `target_met = false`

use std::cmp::Ordering;
use tracing::debug;

use crate::predictor::Predictor;
use crate::scaling_tables::ScalingTables;
use crate::types::{
    HardwareDescriptor, OptimalSettingsResult, PredictionResult, QualityPreset, ResolutionSpec, ResolvedGame,
};

/// One resolution/preset combination with its total load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub resolution: ResolutionSpec,
    pub quality: QualityPreset,
    /// resolution multiplier x quality load
    pub load: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Optimizer<'a> {
    predictor: Predictor<'a>,
}

impl<'a> Optimizer<'a> {
    pub fn new(tables: &'a ScalingTables) -> Self {
        Self {
            predictor: Predictor::new(tables),
        }
    }

    /// The search grid in increasing load order.
    ///
    /// Ties on load fall back to pixel count, then preset order, so the
    /// ordering is total and deterministic.
    pub fn grid(&self) -> Vec<GridPoint> {
        let tables = self.predictor.tables();
        let mut resolutions = tables.resolutions_by_pixels();
        if resolutions.is_empty() {
            resolutions.push(tables.reference_resolution);
        }

        let mut grid: Vec<GridPoint> = resolutions
            .iter()
            .flat_map(|&resolution| {
                QualityPreset::ALL.iter().map(move |&quality| GridPoint {
                    resolution,
                    quality,
                    load: tables.resolution_multiplier(&resolution) * tables.quality_load(quality),
                })
            })
            .collect();

        grid.sort_by(|a, b| {
            a.load
                .total_cmp(&b.load)
                .then_with(|| a.resolution.pixels().cmp(&b.resolution.pixels()))
                .then_with(|| a.quality.cmp(&b.quality))
        });
        grid
    }

    pub fn find_optimal_settings(
        &self,
        hw: &HardwareDescriptor,
        game: &ResolvedGame,
        target_fps: u32,
        prefer_quality: bool,
    ) -> OptimalSettingsResult {
        let evaluated: Vec<(GridPoint, PredictionResult)> = self
            .grid()
            .into_iter()
            .map(|point| {
                let prediction = self.predictor.predict(hw, game, point.resolution, point.quality);
                (point, prediction)
            })
            .collect();

        let meets = |(_, p): &(GridPoint, PredictionResult)| p.fps_average >= target_fps;
        let qualifying = if prefer_quality {
            evaluated.iter().rposition(meets)
        } else {
            evaluated.iter().position(meets)
        };

        let mut notes = vec![format!("Evaluated {} resolution/preset combinations", evaluated.len())];
        let (index, target_met) = match qualifying {
            Some(i) => {
                notes.push(if prefer_quality {
                    "Highest-quality combination that reaches the target".to_string()
                } else {
                    "Lowest-load combination that reaches the target".to_string()
                });
                (i, true)
            }
            None => (best_achievable(&evaluated), false),
        };

        let count = evaluated.len();
        let Some((point, prediction)) = evaluated.into_iter().nth(index) else {
            // Unreachable: the grid always has at least one point.
            let resolution = self.predictor.tables().reference_resolution;
            let prediction = self.predictor.predict(hw, game, resolution, QualityPreset::Low);
            return OptimalSettingsResult {
                resolution,
                quality: QualityPreset::Low,
                target_met: prediction.fps_average >= target_fps,
                prediction,
                target_fps,
                evaluated: count,
                notes,
            };
        };

        if !target_met {
            notes.push(format!(
                "Cannot achieve {} FPS with current hardware even at the lowest settings; best achievable is {} FPS at {} / {}",
                target_fps, prediction.fps_average, point.resolution, point.quality
            ));
        }

        debug!(
            gpu = %hw.label,
            game = %game.title(),
            target_fps,
            prefer_quality,
            evaluated = count,
            target_met,
            resolution = %point.resolution,
            quality = %point.quality,
            fps = prediction.fps_average,
            "Settings search finished"
        );

        OptimalSettingsResult {
            resolution: point.resolution,
            quality: point.quality,
            prediction,
            target_fps,
            target_met,
            evaluated: count,
            notes,
        }
    }
}

/// Index of the highest average; the lightest point wins ties.
fn best_achievable(evaluated: &[(GridPoint, PredictionResult)]) -> usize {
    evaluated
        .iter()
        .enumerate()
        .fold(None::<(usize, u32)>, |best, (i, (_, p))| match best {
            Some((_, fps)) if p.fps_average.cmp(&fps) != Ordering::Greater => best,
            _ => Some((i, p.fps_average)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::*;

    #[test]
    fn test_grid_covers_every_combination_once() {
        let tables = ScalingTables::builtin();
        let grid = Optimizer::new(&tables).grid();
        assert_eq!(grid.len(), tables.resolutions.len() * QualityPreset::ALL.len());
        for (i, a) in grid.iter().enumerate() {
            for b in &grid[i + 1..] {
                assert!(a.resolution != b.resolution || a.quality != b.quality);
            }
        }
    }

    #[test]
    fn test_grid_sorted_by_load() {
        let tables = ScalingTables::builtin();
        let grid = Optimizer::new(&tables).grid();
        assert!(grid.windows(2).all(|w| w[0].load <= w[1].load));
        assert_eq!(grid[0].resolution, ResolutionSpec::HD);
        assert_eq!(grid[0].quality, QualityPreset::Low);
        let last = grid.last().unwrap();
        assert_eq!(last.resolution, ResolutionSpec::new(5120, 2160));
        assert_eq!(last.quality, QualityPreset::Ultra);
    }

    #[test]
    fn test_unreachable_target_returns_lightest_point() {
        let tables = ScalingTables::builtin();
        let result = Optimizer::new(&tables).find_optimal_settings(&rtx_3060(), &good_game(), 500, true);
        assert!(!result.target_met);
        assert_eq!(result.resolution, ResolutionSpec::HD);
        assert_eq!(result.quality, QualityPreset::Low);
        assert!(result.notes.iter().any(|n| n.contains("Cannot achieve 500 FPS")));
    }

    #[test]
    fn test_prefer_quality_picks_heaviest_qualifying_point() {
        let tables = ScalingTables::builtin();
        let optimizer = Optimizer::new(&tables);
        let result = optimizer.find_optimal_settings(&rtx_4070(), &good_game(), 60, true);
        assert!(result.target_met);
        assert!(result.prediction.fps_average >= 60);

        let predictor = Predictor::new(&tables);
        let chosen_load = tables.resolution_multiplier(&result.resolution) * tables.quality_load(result.quality);
        for point in optimizer.grid().iter().filter(|p| p.load > chosen_load) {
            let p = predictor.predict(&rtx_4070(), &good_game(), point.resolution, point.quality);
            assert!(p.fps_average < 60, "{} / {} also qualifies", point.resolution, point.quality);
        }
    }

    #[test]
    fn test_prefer_performance_picks_lightest_qualifying_point() {
        let tables = ScalingTables::builtin();
        let result = Optimizer::new(&tables).find_optimal_settings(&rtx_4070(), &good_game(), 60, false);
        assert!(result.target_met);
        assert_eq!(result.resolution, ResolutionSpec::HD);
        assert_eq!(result.quality, QualityPreset::Low);
    }

    #[test]
    fn test_quality_mode_never_lighter_than_performance_mode() {
        let tables = ScalingTables::builtin();
        let optimizer = Optimizer::new(&tables);
        let quality = optimizer.find_optimal_settings(&rtx_3060(), &good_game(), 45, true);
        let perf = optimizer.find_optimal_settings(&rtx_3060(), &good_game(), 45, false);
        let load = |r: &OptimalSettingsResult| tables.resolution_multiplier(&r.resolution) * tables.quality_load(r.quality);
        assert!(load(&quality) >= load(&perf));
    }

    #[test]
    fn test_search_is_exhaustive_and_deterministic() {
        let tables = ScalingTables::builtin();
        let optimizer = Optimizer::new(&tables);
        let a = optimizer.find_optimal_settings(&rtx_4070(), &starfield(), 90, true);
        let b = optimizer.find_optimal_settings(&rtx_4070(), &starfield(), 90, true);
        assert_eq!(a, b);
        assert_eq!(a.evaluated, 32);
    }

    #[test]
    fn test_best_achievable_prefers_first_of_ties() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let grid = Optimizer::new(&tables).grid();
        let hw = HardwareDescriptor::default();
        let evaluated: Vec<(GridPoint, PredictionResult)> = grid
            .iter()
            .map(|pt| (*pt, predictor.predict(&hw, &good_game(), pt.resolution, pt.quality)))
            .collect();
        let best = best_achievable(&evaluated);
        let max = evaluated.iter().map(|(_, p)| p.fps_average).max().unwrap();
        assert_eq!(evaluated[best].1.fps_average, max);
        assert!(evaluated[..best].iter().all(|(_, p)| p.fps_average < max));
    }
}
