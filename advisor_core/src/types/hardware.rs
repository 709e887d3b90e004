//! Hardware Descriptor
//!
//! Vendor-neutral snapshot of a graphics processor. Telemetry (temperature,
//! utilization, power) is deliberately absent: only the static figures the
//! capability model consumes are carried here.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseValueError;

// ============================================================================
// ArchitectureTier
// ============================================================================

/// Ordinal architecture class of a GPU.
///
/// Declaration order is the ordinal order; `Ord` is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchitectureTier {
    /// Absent tier data degrades to the lowest class.
    #[default]
    #[serde(alias = "low", alias = "Entry")]
    Entry,
    #[serde(alias = "mid", alias = "Mid-Range", alias = "mid_range")]
    MidRange,
    #[serde(alias = "high", alias = "High-End", alias = "high_end")]
    HighEnd,
    #[serde(alias = "flagship", alias = "Enthusiast")]
    Enthusiast,
}

impl ArchitectureTier {
    pub const ALL: [ArchitectureTier; 4] = [
        ArchitectureTier::Entry,
        ArchitectureTier::MidRange,
        ArchitectureTier::HighEnd,
        ArchitectureTier::Enthusiast,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArchitectureTier::Entry => "Entry",
            ArchitectureTier::MidRange => "Mid-Range",
            ArchitectureTier::HighEnd => "High-End",
            ArchitectureTier::Enthusiast => "Enthusiast",
        }
    }
}

impl fmt::Display for ArchitectureTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ArchitectureTier {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "entry" | "low" => Ok(ArchitectureTier::Entry),
            "mid-range" | "midrange" | "mid" => Ok(ArchitectureTier::MidRange),
            "high-end" | "highend" | "high" => Ok(ArchitectureTier::HighEnd),
            "enthusiast" | "flagship" => Ok(ArchitectureTier::Enthusiast),
            _ => Err(ParseValueError::Unknown {
                kind: "architecture tier",
                value: s.to_string(),
                expected: "entry, mid-range, high-end, enthusiast",
            }),
        }
    }
}

// ============================================================================
// HardwareDescriptor
// ============================================================================

/// Static hardware figures consumed by the capability scorer.
///
/// Absent numeric fields deserialize as zero, and negative or fractional
/// JSON numbers are clamped into range instead of being rejected, so a
/// partially populated snapshot still produces a (lower) score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HardwareDescriptor {
    /// Display name, e.g. "NVIDIA GeForce RTX 3070".
    pub label: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub compute_units: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub base_clock_mhz: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub boost_clock_mhz: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub memory_mb: u32,
    pub tier: ArchitectureTier,
    pub architecture: Option<String>,
    /// Hardware ray tracing (and the vendor upscaler that ships with it).
    pub ray_tracing_capable: bool,
}

impl HardwareDescriptor {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_compute_units(mut self, units: u32) -> Self {
        self.compute_units = units;
        self
    }

    pub fn with_clocks(mut self, base_mhz: u32, boost_mhz: u32) -> Self {
        self.base_clock_mhz = base_mhz;
        self.boost_clock_mhz = boost_mhz;
        self
    }

    pub fn with_memory_mb(mut self, memory_mb: u32) -> Self {
        self.memory_mb = memory_mb;
        self
    }

    pub fn with_tier(mut self, tier: ArchitectureTier) -> Self {
        self.tier = tier;
        self
    }

    pub fn with_architecture(mut self, architecture: impl Into<String>) -> Self {
        self.architecture = Some(architecture.into());
        self
    }

    pub fn with_ray_tracing(mut self, capable: bool) -> Self {
        self.ray_tracing_capable = capable;
        self
    }

    /// Clock used for throughput: the higher of base and boost.
    ///
    /// Taking the max keeps the score non-decreasing in either clock and
    /// covers descriptors that only report one of them.
    #[inline]
    pub fn effective_clock_mhz(&self) -> u32 {
        self.base_clock_mhz.max(self.boost_clock_mhz)
    }

    /// Raw throughput estimate: compute units x effective clock.
    #[inline]
    pub fn raw_throughput(&self) -> f64 {
        self.compute_units as f64 * self.effective_clock_mhz() as f64
    }

    pub fn summary(&self) -> String {
        format!(
            "{}\n├── Memory: {:.0} GB\n├── Architecture: {} ({})\n├── Compute Units: {}\n└── Base/Boost Clock: {}/{} MHz",
            self.label,
            self.memory_mb as f64 / 1024.0,
            self.architecture.as_deref().unwrap_or("Unknown"),
            self.tier,
            self.compute_units,
            self.base_clock_mhz,
            self.boost_clock_mhz,
        )
    }
}

/// Accepts any JSON number (or null) and clamps it into `u32`.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.min(u32::MAX as f64) as u32,
        _ => 0,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(ArchitectureTier::Entry < ArchitectureTier::MidRange);
        assert!(ArchitectureTier::MidRange < ArchitectureTier::HighEnd);
        assert!(ArchitectureTier::HighEnd < ArchitectureTier::Enthusiast);
    }

    #[test]
    fn test_tier_parse_labels() {
        assert_eq!("Mid-Range".parse::<ArchitectureTier>(), Ok(ArchitectureTier::MidRange));
        assert_eq!("flagship".parse::<ArchitectureTier>(), Ok(ArchitectureTier::Enthusiast));
        assert_eq!("high end".parse::<ArchitectureTier>(), Ok(ArchitectureTier::HighEnd));
        assert!("mythic".parse::<ArchitectureTier>().is_err());
    }

    #[test]
    fn test_effective_clock_takes_max() {
        let hw = HardwareDescriptor::new("x").with_clocks(1500, 0);
        assert_eq!(hw.effective_clock_mhz(), 1500);
        let hw = hw.with_clocks(1500, 1800);
        assert_eq!(hw.effective_clock_mhz(), 1800);
    }

    #[test]
    fn test_absent_fields_deserialize_as_zero() {
        let hw: HardwareDescriptor = serde_json::from_str(r#"{"label":"mystery"}"#).unwrap();
        assert_eq!(hw.compute_units, 0);
        assert_eq!(hw.memory_mb, 0);
        assert_eq!(hw.tier, ArchitectureTier::Entry);
    }

    #[test]
    fn test_negative_and_fractional_fields_are_clamped() {
        let hw: HardwareDescriptor = serde_json::from_str(
            r#"{"label":"odd","compute_units":-12,"boost_clock_mhz":1777.9,"memory_mb":null,"tier":"Mid-Range"}"#,
        )
        .unwrap();
        assert_eq!(hw.compute_units, 0);
        assert_eq!(hw.boost_clock_mhz, 1777);
        assert_eq!(hw.memory_mb, 0);
        assert_eq!(hw.tier, ArchitectureTier::MidRange);
    }
}
