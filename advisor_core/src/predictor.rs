//! Predictor
//!
//! Turns a capability index into a frame-rate estimate for one
//! resolution/preset combination:
//!
//! ```text
//! ratio    = capability / reference_index(optimization_level)
//! raw      = baseline_fps x ratio
//! adjusted = raw / resolution_multiplier / quality_load x memory_penalty
//! average  = round(adjusted)
//! min      = round(average x spread.min)
//! max      = round(average x spread.max)
//! 1% low   = round(average x spread.one_percent_low)
//! ```
//!
//! The predictor never resolves titles. It receives an already resolved
//! game and only reads its match kind when grading confidence.

use tracing::debug;

use crate::capability::CapabilityScorer;
use crate::scaling_tables::{Calibration, ScalingTables};
use crate::types::{
    Confidence, GameProfile, HardwareDescriptor, MatchKind, PredictionResult, QualityPreset, ResolutionSpec,
    ResolvedGame,
};

/// Resolutions covered by [`Predictor::predict_all_resolutions`].
pub const COMMON_RESOLUTIONS: [ResolutionSpec; 3] = [ResolutionSpec::FHD, ResolutionSpec::QHD, ResolutionSpec::UHD];

/// Frame rate below which ultra users get a "drop to high" hint.
const SMOOTH_FPS: u32 = 60;

/// Capability ratio above which ray tracing is suggested.
const RAY_TRACING_HEADROOM_RATIO: f64 = 1.5;

#[derive(Debug, Clone, Copy)]
pub struct Predictor<'a> {
    tables: &'a ScalingTables,
    scorer: CapabilityScorer<'a>,
}

impl<'a> Predictor<'a> {
    pub fn new(tables: &'a ScalingTables) -> Self {
        Self {
            tables,
            scorer: CapabilityScorer::new(tables),
        }
    }

    #[inline]
    pub fn tables(&self) -> &'a ScalingTables {
        self.tables
    }

    #[inline]
    pub fn scorer(&self) -> &CapabilityScorer<'a> {
        &self.scorer
    }

    /// Capability headroom of `hw` against the title's reference index.
    pub fn capability_ratio(&self, hw: &HardwareDescriptor, game: &GameProfile) -> f64 {
        let reference = self.tables.reference_index(game.optimization_level);
        self.scorer.score(hw).ratio_to(reference)
    }

    pub fn predict(
        &self,
        hw: &HardwareDescriptor,
        game: &ResolvedGame,
        resolution: ResolutionSpec,
        quality: QualityPreset,
    ) -> PredictionResult {
        let model = &self.tables.model;
        let profile = &game.profile;

        let capability = self.scorer.score(hw);
        let ratio = capability.ratio_to(self.tables.reference_index(profile.optimization_level));
        let raw_fps = model.baseline_fps * ratio;
        let scaled_fps =
            raw_fps / self.tables.resolution_multiplier(&resolution) / self.tables.quality_load(quality);

        let mut notes = Vec::new();
        if game.match_kind == MatchKind::Fuzzy {
            notes.push(format!("Title matched approximately as '{}'", profile.title));
        }

        let (penalty, memory_note) = self.memory_penalty(hw, profile);
        notes.extend(memory_note);
        let adjusted_fps = scaled_fps * penalty;

        let fps_average = round_fps(adjusted_fps);
        let fps_min = round_fps(fps_average as f64 * model.spread.min);
        let fps_max = round_fps(fps_average as f64 * model.spread.max);
        let fps_1pct_low = round_fps(fps_average as f64 * model.spread.one_percent_low);

        let confidence = self.grade_confidence(ratio, game.match_kind, &resolution);
        if confidence == Confidence::Low {
            notes.push(format!(
                "Hardware is far outside the calibrated range (capability ratio {:.2}); treat this as a rough extrapolation",
                ratio
            ));
        }
        self.feature_notes(hw, profile, resolution, quality, ratio, fps_average, &mut notes);

        debug!(
            gpu = %hw.label,
            game = %profile.title,
            resolution = %resolution,
            quality = %quality,
            capability = capability.value(),
            ratio,
            penalty,
            fps = fps_average,
            confidence = %confidence,
            "Predicted frame rate"
        );

        PredictionResult {
            game: profile.title.clone(),
            gpu: hw.label.clone(),
            resolution,
            quality,
            fps_min,
            fps_max,
            fps_average,
            fps_1pct_low,
            confidence,
            notes,
        }
    }

    /// One prediction per preset, in increasing load order.
    pub fn predict_all_presets(
        &self,
        hw: &HardwareDescriptor,
        game: &ResolvedGame,
        resolution: ResolutionSpec,
    ) -> Vec<PredictionResult> {
        QualityPreset::ALL
            .iter()
            .map(|&quality| self.predict(hw, game, resolution, quality))
            .collect()
    }

    /// Predictions at 1080p, 1440p and 4K.
    pub fn predict_all_resolutions(
        &self,
        hw: &HardwareDescriptor,
        game: &ResolvedGame,
        quality: QualityPreset,
    ) -> Vec<PredictionResult> {
        COMMON_RESOLUTIONS
            .iter()
            .map(|&resolution| self.predict(hw, game, resolution, quality))
            .collect()
    }

    /// Multiplier (<= 1) for memory below the title's requirements.
    ///
    /// Below minimum: memory/minimum clamped to the configured floor/cap.
    /// Between minimum and recommended: linear from the start value to 1.0.
    /// Both bands are bounded so the result never decreases as memory grows.
    fn memory_penalty(&self, hw: &HardwareDescriptor, game: &GameProfile) -> (f64, Option<String>) {
        let p = &self.tables.model.memory_penalty;
        let memory = hw.memory_mb;

        if memory < game.minimum_vram_mb {
            let ratio = memory as f64 / game.minimum_vram_mb as f64;
            let factor = ratio.clamp(p.below_minimum_floor, p.below_minimum_cap);
            let note = format!(
                "Memory ({}MB) is below the minimum requirement ({}MB); expect heavy stuttering and texture streaming issues ({:.0}% penalty applied)",
                memory,
                game.minimum_vram_mb,
                (1.0 - factor) * 100.0
            );
            (factor, Some(note))
        } else if memory < game.recommended_vram_mb {
            // minimum <= memory < recommended, so the span is non-zero.
            let span = (game.recommended_vram_mb - game.minimum_vram_mb) as f64;
            let progress = (memory - game.minimum_vram_mb) as f64 / span;
            let factor = p.below_recommended_start + (1.0 - p.below_recommended_start) * progress;
            let note = format!(
                "Memory ({}MB) is below recommended ({}MB). May experience stuttering",
                memory, game.recommended_vram_mb
            );
            (factor, Some(note))
        } else {
            (1.0, None)
        }
    }

    fn grade_confidence(&self, ratio: f64, match_kind: MatchKind, resolution: &ResolutionSpec) -> Confidence {
        let model = &self.tables.model;
        if !(model.extrapolation_ratio_low..=model.extrapolation_ratio_high).contains(&ratio) {
            return Confidence::Low;
        }
        if match_kind == MatchKind::Fuzzy || self.tables.calibration_of(resolution) != Calibration::Interior {
            return Confidence::Medium;
        }
        Confidence::High
    }

    #[allow(clippy::too_many_arguments)]
    fn feature_notes(
        &self,
        hw: &HardwareDescriptor,
        game: &GameProfile,
        resolution: ResolutionSpec,
        quality: QualityPreset,
        ratio: f64,
        fps_average: u32,
        notes: &mut Vec<String>,
    ) {
        if ratio < 1.0 || resolution.is_uhd_class() {
            if game.supports_dlss && hw.ray_tracing_capable {
                notes.push("DLSS available - enable it for roughly 30-60% additional headroom".to_string());
            } else if game.supports_fsr {
                notes.push("FSR available - enable it for roughly 20-40% additional headroom".to_string());
            }
        }

        if resolution.is_uhd_class() {
            notes.push(if game.supports_upscaling() {
                "4K-class output is very demanding. Consider DLSS/FSR for better performance".to_string()
            } else {
                "4K-class output is very demanding. Consider 1440p for better performance".to_string()
            });
        }

        if quality == QualityPreset::Ultra && fps_average < SMOOTH_FPS {
            notes.push("Consider reducing to High for smoother gameplay".to_string());
        }

        if game.supports_raytracing && hw.ray_tracing_capable && ratio >= RAY_TRACING_HEADROOM_RATIO {
            notes.push("Ray tracing is supported and there is headroom to enable it".to_string());
        }
    }
}

/// Round to the nearest whole frame; negatives and NaN become 0.
#[inline]
fn round_fps(fps: f64) -> u32 {
    fps.max(0.0).round() as u32
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::*;
    use crate::types::OptimizationLevel;

    #[test]
    fn test_flagship_excellent_1080p_low_exceeds_100() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&rtx_4090(), &excellent_game(), ResolutionSpec::FHD, QualityPreset::Low);
        assert!(p.fps_average >= 100, "average {}", p.fps_average);
        assert!(p.is_ordered());
    }

    #[test]
    fn test_low_tier_below_minimum_memory_4k_ultra() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&gtx_1050_ti(), &starfield(), ResolutionSpec::UHD, QualityPreset::Ultra);
        assert!(p.fps_average < 30, "average {}", p.fps_average);
        assert!(
            p.notes.iter().any(|n| n.contains("below the minimum requirement")),
            "notes: {:?}",
            p.notes
        );
    }

    #[test]
    fn test_spread_constants_applied() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&rtx_3060(), &good_game(), ResolutionSpec::FHD, QualityPreset::High);
        let avg = p.fps_average as f64;
        assert_eq!(p.fps_min, (avg * 0.85).round() as u32);
        assert_eq!(p.fps_max, (avg * 1.2).round() as u32);
        assert_eq!(p.fps_1pct_low, (avg * 0.55).round() as u32);
    }

    #[test]
    fn test_mid_range_card_near_baseline_on_good_title() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&rtx_3060(), &good_game(), ResolutionSpec::FHD, QualityPreset::High);
        assert!((50..=65).contains(&p.fps_average), "average {}", p.fps_average);
        assert_eq!(p.confidence, Confidence::High);
    }

    #[test]
    fn test_resolution_and_quality_lower_fps() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let game = good_game();
        let fhd = predictor.predict(&rtx_4070(), &game, ResolutionSpec::FHD, QualityPreset::High);
        let uhd = predictor.predict(&rtx_4070(), &game, ResolutionSpec::UHD, QualityPreset::High);
        let ultra = predictor.predict(&rtx_4070(), &game, ResolutionSpec::FHD, QualityPreset::Ultra);
        assert!(uhd.fps_average < fhd.fps_average);
        assert!(ultra.fps_average < fhd.fps_average);
    }

    #[test]
    fn test_unlisted_resolution_never_outruns_larger_listed_one() {
        let mut tables = ScalingTables::builtin();
        if let Some(uhd) = tables.resolutions.iter_mut().find(|e| e.spec() == ResolutionSpec::UHD) {
            uhd.multiplier = 2.3;
        }
        tables.validate().unwrap();

        let predictor = Predictor::new(&tables);
        let game = good_game();
        let odd = predictor.predict(&rtx_4070(), &game, ResolutionSpec::new(3000, 2000), QualityPreset::High);
        let uhd = predictor.predict(&rtx_4070(), &game, ResolutionSpec::UHD, QualityPreset::High);
        assert!(odd.fps_average >= uhd.fps_average, "3000x2000 {} vs 4K {}", odd.fps_average, uhd.fps_average);
    }

    #[test]
    fn test_better_optimized_title_runs_faster() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let poor = predictor.predict(&rtx_3060(), &starfield(), ResolutionSpec::FHD, QualityPreset::High);
        let excellent = predictor.predict(&rtx_3060(), &excellent_game(), ResolutionSpec::FHD, QualityPreset::High);
        assert!(excellent.fps_average > poor.fps_average);
    }

    #[test]
    fn test_below_recommended_penalty_is_milder_than_below_minimum() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let game = ResolvedGame::exact(
            GameProfile::new("Memory Hog", 6144, 12_288, OptimizationLevel::Good).unwrap(),
        );
        let below_min = predictor.predict(&rtx_4070().with_memory_mb(4096), &game, ResolutionSpec::FHD, QualityPreset::High);
        let between = predictor.predict(&rtx_4070().with_memory_mb(8192), &game, ResolutionSpec::FHD, QualityPreset::High);
        let ample = predictor.predict(&rtx_4070().with_memory_mb(12_288), &game, ResolutionSpec::FHD, QualityPreset::High);
        assert!(below_min.fps_average < between.fps_average);
        assert!(between.fps_average < ample.fps_average);
        assert!(between.notes.iter().any(|n| n.contains("below recommended")));
        assert!(!ample.notes.iter().any(|n| n.contains("Memory")));
    }

    #[test]
    fn test_fuzzy_match_caps_confidence_at_medium() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let fuzzy = ResolvedGame::fuzzy(good_game().profile);
        let p = predictor.predict(&rtx_3060(), &fuzzy, ResolutionSpec::FHD, QualityPreset::High);
        assert_eq!(p.confidence, Confidence::Medium);
        assert!(p.notes[0].contains("matched approximately"));
    }

    #[test]
    fn test_edge_resolution_is_medium_confidence() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&rtx_3060(), &good_game(), ResolutionSpec::HD, QualityPreset::High);
        assert_eq!(p.confidence, Confidence::Medium);
    }

    #[test]
    fn test_extreme_ratio_is_low_confidence() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let over = predictor.predict(&rtx_4090(), &excellent_game(), ResolutionSpec::FHD, QualityPreset::High);
        assert_eq!(over.confidence, Confidence::Low);
        let under = predictor.predict(&HardwareDescriptor::default(), &good_game(), ResolutionSpec::FHD, QualityPreset::High);
        assert_eq!(under.confidence, Confidence::Low);
        assert!(under.notes.iter().any(|n| n.contains("extrapolation")));
    }

    #[test]
    fn test_upscaling_note_when_under_baseline() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let game = ResolvedGame::exact(good_game().profile.with_features(true, true, true));

        let rt = predictor.predict(&rtx_3060(), &game, ResolutionSpec::QHD, QualityPreset::High);
        assert!(rt.notes.iter().any(|n| n.starts_with("DLSS")), "notes: {:?}", rt.notes);

        let no_rt = predictor.predict(&rtx_3060().with_ray_tracing(false), &game, ResolutionSpec::QHD, QualityPreset::High);
        assert!(no_rt.notes.iter().any(|n| n.starts_with("FSR")), "notes: {:?}", no_rt.notes);
    }

    #[test]
    fn test_uhd_note_depends_on_upscaling_support() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let with = predictor.predict(&rtx_4070(), &good_game(), ResolutionSpec::UHD, QualityPreset::High);
        assert!(with.notes.iter().any(|n| n.contains("Consider DLSS/FSR")), "notes: {:?}", with.notes);
        let without = predictor.predict(&rtx_4070(), &excellent_game(), ResolutionSpec::UHD, QualityPreset::High);
        assert!(without.notes.iter().any(|n| n.contains("Consider 1440p")), "notes: {:?}", without.notes);
    }

    #[test]
    fn test_capability_ratio_against_reference_index() {
        let tables = ScalingTables::builtin();
        let predictor = Predictor::new(&tables);
        let ratio = predictor.capability_ratio(&rtx_3060(), &good_game().profile);
        assert!((0.9..1.05).contains(&ratio), "ratio {}", ratio);
        assert!(predictor.capability_ratio(&rtx_4090(), &starfield().profile) > ratio);
    }

    #[test]
    fn test_ultra_hint_below_sixty() {
        let tables = ScalingTables::builtin();
        let p = Predictor::new(&tables).predict(&rtx_3060(), &good_game(), ResolutionSpec::QHD, QualityPreset::Ultra);
        assert!(p.fps_average < 60);
        assert!(p.notes.iter().any(|n| n.contains("reducing to High")));
    }

    #[test]
    fn test_predict_all_presets_in_load_order() {
        let tables = ScalingTables::builtin();
        let all = Predictor::new(&tables).predict_all_presets(&rtx_3060(), &good_game(), ResolutionSpec::FHD);
        let presets: Vec<QualityPreset> = all.iter().map(|p| p.quality).collect();
        assert_eq!(presets, QualityPreset::ALL.to_vec());
        assert!(all.windows(2).all(|w| w[0].fps_average >= w[1].fps_average));
    }

    #[test]
    fn test_predict_all_resolutions() {
        let tables = ScalingTables::builtin();
        let all = Predictor::new(&tables).predict_all_resolutions(&rtx_3060(), &good_game(), QualityPreset::High);
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].resolution, ResolutionSpec::UHD);
    }

    #[test]
    fn test_round_fps_clamps() {
        assert_eq!(round_fps(-4.0), 0);
        assert_eq!(round_fps(f64::NAN), 0);
        assert_eq!(round_fps(59.5), 60);
    }
}
