//! Terminal color helpers for human-readable output.

use advisor_core::{Compatibility, Confidence};
use console::{style, Style};

// ═══════════════════════════════════════════════════════════════
// Styles
// ═══════════════════════════════════════════════════════════════

pub fn success() -> Style {
    Style::new().green().bold()
}

pub fn error() -> Style {
    Style::new().red().bold()
}

pub fn warning() -> Style {
    Style::new().yellow()
}

pub fn info() -> Style {
    Style::new().cyan()
}

pub fn dim() -> Style {
    Style::new().dim()
}

// ═══════════════════════════════════════════════════════════════
// Formatters
// ═══════════════════════════════════════════════════════════════

/// Frame rate colored by playability (60+ green, 30+ yellow, below red).
pub fn fmt_fps(fps: u32) -> String {
    let text = format!("{} FPS", fps);
    if fps >= 60 {
        format!("{}", success().apply_to(text))
    } else if fps >= 30 {
        format!("{}", warning().apply_to(text))
    } else {
        format!("{}", error().apply_to(text))
    }
}

pub fn fmt_confidence(confidence: Confidence) -> String {
    let text = confidence.to_string();
    match confidence {
        Confidence::High => format!("{}", style(text).green()),
        Confidence::Medium => format!("{}", style(text).yellow()),
        Confidence::Low => format!("{}", style(text).red()),
    }
}

pub fn fmt_compatibility(compatibility: Compatibility) -> String {
    let (icon, text) = match compatibility {
        Compatibility::Excellent => ("🟢", style(compatibility.to_string().to_uppercase()).green().bold()),
        Compatibility::Good => ("🟡", style(compatibility.to_string().to_uppercase()).yellow().bold()),
        Compatibility::Poor => ("🔴", style(compatibility.to_string().to_uppercase()).red().bold()),
    };
    format!("{} {}", icon, text)
}

/// Signed percentage, green when positive.
pub fn fmt_percent(pct: f64) -> String {
    let text = format!("{:+.1}%", pct);
    if pct > 0.0 {
        format!("{}", style(text).green().bold())
    } else if pct < 0.0 {
        format!("{}", style(text).red().bold())
    } else {
        format!("{}", style(text).dim())
    }
}

pub fn fmt_target(met: bool) -> &'static str {
    if met {
        "✅"
    } else {
        "❌"
    }
}
