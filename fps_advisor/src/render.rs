//! Human-readable report rendering.
//!
//! Every renderer returns a `String`; `main` decides where it goes. JSON
//! output bypasses this module and serializes the core records directly.

use std::fmt::Write;

use advisor_core::{
    CapabilityBreakdown, CompatibilityReport, GameProfile, GpuComparison, HardwareDescriptor, MatchKind,
    OptimalSettingsResult, PredictionResult, ScalingTables,
};

use crate::colors::{dim, fmt_compatibility, fmt_confidence, fmt_fps, fmt_percent, fmt_target, info, warning};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
    let _ = writeln!(out, "{}", RULE);
}

fn notes(out: &mut String, notes: &[String]) {
    if notes.is_empty() {
        return;
    }
    let _ = writeln!(out);
    for note in notes {
        let _ = writeln!(out, "💡 {}", warning().apply_to(note));
    }
}

fn fuzzy_hint(out: &mut String, match_kind: MatchKind, title: &str) {
    if match_kind == MatchKind::Fuzzy {
        let _ = writeln!(out, "{}", dim().apply_to(format!("🔍 Matched \"{}\" by partial name", title)));
    }
}

// ============================================================================
// Predictions
// ============================================================================

pub fn prediction(p: &PredictionResult) -> String {
    let mut out = String::new();
    header(&mut out, "🎮 FPS Prediction");
    let _ = writeln!(out, "🕹️  Game: {}", p.game);
    let _ = writeln!(out, "🖥️  GPU: {}", p.gpu);
    let _ = writeln!(out, "📐 Resolution: {}", p.resolution);
    let _ = writeln!(out, "🎨 Quality: {}", p.quality);
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Average: {}", fmt_fps(p.fps_average));
    let _ = writeln!(out, "📉 Range: {} - {} FPS", p.fps_min, p.fps_max);
    let _ = writeln!(out, "⚠️  1% Low: {} FPS", p.fps_1pct_low);
    let _ = writeln!(out, "🎯 Confidence: {}", fmt_confidence(p.confidence));
    notes(&mut out, &p.notes);
    let _ = writeln!(out, "{}", RULE);
    out
}

/// One row per prediction; used for the all-presets and all-resolutions views.
pub fn prediction_table(title: &str, rows: &[PredictionResult]) -> String {
    let mut out = String::new();
    header(&mut out, title);
    if let Some(first) = rows.first() {
        let _ = writeln!(out, "🕹️  {} on {}", first.game, first.gpu);
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "{}",
        info().apply_to(format!(
            "{:<12} {:<8} {:>8} {:>11} {:>7}  {}",
            "Resolution", "Quality", "Average", "Range", "1% Low", "Confidence"
        ))
    );
    for p in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<8} {:>8} {:>11} {:>7}  {}",
            p.resolution.name(),
            p.quality.to_string(),
            p.fps_average,
            format!("{}-{}", p.fps_min, p.fps_max),
            p.fps_1pct_low,
            fmt_confidence(p.confidence),
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn optimal_settings(game: &str, gpu: &str, result: &OptimalSettingsResult) -> String {
    let mut out = String::new();
    header(&mut out, "⚙️  Optimal Settings");
    let _ = writeln!(out, "🕹️  Game: {}", game);
    let _ = writeln!(out, "🖥️  GPU: {}", gpu);
    let _ = writeln!(out, "🎯 Target: {} FPS {}", result.target_fps, fmt_target(result.target_met));
    let _ = writeln!(out);
    let _ = writeln!(out, "📐 Resolution: {}", result.resolution);
    let _ = writeln!(out, "🎨 Quality: {}", result.quality);
    let _ = writeln!(out, "📊 Expected: {}", fmt_fps(result.prediction.fps_average));
    let _ = writeln!(
        out,
        "📉 Range: {} - {} FPS (1% low {})",
        result.prediction.fps_min, result.prediction.fps_max, result.prediction.fps_1pct_low
    );
    let _ = writeln!(out, "🔢 Combinations evaluated: {}", result.evaluated);
    let mut all_notes = result.notes.clone();
    all_notes.extend(result.prediction.notes.iter().cloned());
    notes(&mut out, &all_notes);
    let _ = writeln!(out, "{}", RULE);
    out
}

// ============================================================================
// Comparison
// ============================================================================

pub fn comparison(c: &GpuComparison) -> String {
    let mut out = String::new();
    header(&mut out, "⚖️  GPU Comparison");
    let _ = writeln!(out, "1️⃣  {}  (index {})", c.gpu1, c.index1);
    let _ = writeln!(out, "2️⃣  {}  (index {})", c.gpu2, c.index2);
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Difference (2 vs 1): {}", fmt_percent(c.performance_difference_percent));
    match &c.faster {
        Some(label) => {
            let _ = writeln!(out, "🏆 Faster: {}", label);
        }
        None => {
            let _ = writeln!(out, "🤝 Equal capability");
        }
    }

    if let Some(g) = &c.game {
        let _ = writeln!(out);
        let _ = writeln!(out, "🕹️  {} @ {} {}", g.game, g.resolution.name(), g.quality);
        let _ = writeln!(out, "   1️⃣  {}", fmt_fps(g.gpu1.fps_average));
        let _ = writeln!(out, "   2️⃣  {}", fmt_fps(g.gpu2.fps_average));
        let _ = writeln!(out, "   📊 FPS difference: {}", fmt_percent(g.fps_difference_percent));
        if !g.deltas_agree {
            let _ = writeln!(
                out,
                "   💡 {}",
                warning().apply_to("Memory limits for this title reverse the overall ranking")
            );
        }
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

// ============================================================================
// Catalog views
// ============================================================================

pub fn compatibility(report: &CompatibilityReport) -> String {
    let mut out = String::new();
    header(&mut out, "🔎 Compatibility Check");
    fuzzy_hint(&mut out, report.match_kind, &report.game);
    let _ = writeln!(out, "🕹️  Game: {}", report.game);
    let _ = writeln!(out, "🖥️  GPU: {}", report.gpu);
    let _ = writeln!(out, "📋 Status: {}", fmt_compatibility(report.compatibility));
    let _ = writeln!(out, "💬 {}", report.message);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "💾 VRAM: {} MB (minimum {} MB, recommended {} MB)",
        report.memory_mb, report.minimum_vram_mb, report.recommended_vram_mb
    );
    if !report.minimum_gpu.is_empty() {
        let _ = writeln!(out, "⬇️  Minimum GPU: {}", report.minimum_gpu);
    }
    if !report.recommended_gpu.is_empty() {
        let _ = writeln!(out, "⬆️  Recommended GPU: {}", report.recommended_gpu);
    }
    if !report.engine.is_empty() {
        let _ = writeln!(out, "🔧 Engine: {}", report.engine);
    }
    let _ = writeln!(out, "⭐ Optimization: {}", report.optimization_level);
    if !report.features.is_empty() {
        let _ = writeln!(out, "✨ Available features: {}", report.features.join(", "));
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn hardware(hw: &HardwareDescriptor, breakdown: &CapabilityBreakdown) -> String {
    let mut out = String::new();
    header(&mut out, "🖥️  GPU Capability");
    let _ = writeln!(out, "{}", hw.summary());
    let _ = writeln!(out);
    let _ = writeln!(out, "⚡ Throughput factor: {:.3}", breakdown.throughput_factor);
    let _ = writeln!(out, "💾 Memory factor: {:.3}", breakdown.memory_factor);
    let _ = writeln!(out, "🏷️  Tier multiplier: {:.2}", breakdown.tier_multiplier);
    let _ = writeln!(out, "⭐ Capability index: {}", info().apply_to(breakdown.index));
    let _ = writeln!(
        out,
        "🌟 Ray tracing: {}",
        if hw.ray_tracing_capable { "✅ Yes" } else { "❌ No" }
    );
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn games(profiles: &[&GameProfile]) -> String {
    let mut out = String::new();
    header(&mut out, &format!("📚 Games ({})", profiles.len()));
    for p in profiles {
        let mut features = Vec::new();
        if p.supports_raytracing {
            features.push("RT");
        }
        if p.supports_dlss {
            features.push("DLSS");
        }
        if p.supports_fsr {
            features.push("FSR");
        }
        let _ = writeln!(
            out,
            "• {:<36} {:<10} {:>6} MB  {}",
            p.title,
            p.optimization_level.to_string(),
            p.recommended_vram_mb,
            dim().apply_to(features.join(" ")),
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn gpus(models: &[HardwareDescriptor]) -> String {
    let mut out = String::new();
    header(&mut out, &format!("🖥️  GPUs ({})", models.len()));
    for hw in models {
        let _ = writeln!(
            out,
            "• {:<36} {:>6} CU  {:>5} MHz  {:>3} GB  {}",
            hw.label,
            hw.compute_units,
            hw.effective_clock_mhz(),
            hw.memory_mb / 1024,
            dim().apply_to(hw.tier),
        );
    }
    let _ = writeln!(out, "{}", RULE);
    out
}

pub fn tables(tables: &ScalingTables) -> String {
    let mut out = String::new();
    header(&mut out, &format!("📏 Scaling Tables v{}", tables.version));
    let _ = writeln!(out, "Reference resolution: {}", tables.reference_resolution);
    let _ = writeln!(out);
    for entry in &tables.resolutions {
        let _ = writeln!(out, "📐 {:<8} {:>5}x{:<5} x{:.3}", entry.name, entry.width, entry.height, entry.multiplier);
    }
    let _ = writeln!(out);
    for entry in &tables.quality_presets {
        let _ = writeln!(out, "🎨 {:<8} load {:.2}", entry.preset.to_string(), entry.load);
    }
    let _ = writeln!(out);
    for entry in &tables.optimization_levels {
        let _ = writeln!(out, "⭐ {:<10} reference index {:.2}", entry.level.to_string(), entry.reference_index);
    }
    let _ = writeln!(out, "{}", RULE);
    out
}
