//! Display scaling keys: resolution and quality preset.
//!
//! Neither type carries a multiplier itself; the multipliers live in the
//! calibration tables so they can be recalibrated without touching code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseValueError;

// ============================================================================
// ResolutionSpec
// ============================================================================

/// A named output resolution, e.g. `1920x1080`.
///
/// Serialized as its `WIDTHxHEIGHT` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResolutionSpec {
    width: u32,
    height: u32,
}

impl ResolutionSpec {
    pub const HD: ResolutionSpec = ResolutionSpec::new(1280, 720);
    pub const FHD: ResolutionSpec = ResolutionSpec::new(1920, 1080);
    pub const QHD: ResolutionSpec = ResolutionSpec::new(2560, 1440);
    pub const UHD: ResolutionSpec = ResolutionSpec::new(3840, 2160);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    #[inline]
    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn name(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// 4K-class output (at least 3840x2160 worth of pixels).
    pub fn is_uhd_class(&self) -> bool {
        self.pixels() >= Self::UHD.pixels()
    }
}

impl Default for ResolutionSpec {
    fn default() -> Self {
        Self::FHD
    }
}

impl fmt::Display for ResolutionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ResolutionSpec {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "720p" | "hd" => return Ok(Self::HD),
            "900p" => return Ok(Self::new(1600, 900)),
            "1080p" | "fhd" => return Ok(Self::FHD),
            "1440p" | "qhd" => return Ok(Self::QHD),
            "2160p" | "4k" | "uhd" => return Ok(Self::UHD),
            _ => {}
        }

        let (w, h) = lower
            .split_once(['x', '×'])
            .ok_or_else(|| ParseValueError::Resolution(s.to_string()))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ParseValueError::Resolution(s.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ParseValueError::Resolution(s.to_string()))?;
        if width == 0 || height == 0 {
            return Err(ParseValueError::Resolution(s.to_string()));
        }
        Ok(Self::new(width, height))
    }
}

impl TryFrom<String> for ResolutionSpec {
    type Error = ParseValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResolutionSpec> for String {
    fn from(value: ResolutionSpec) -> Self {
        value.name()
    }
}

// ============================================================================
// QualityPreset
// ============================================================================

/// In-game quality preset, ordered by GPU load (low < medium < high < ultra).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    High,
    Ultra,
}

impl QualityPreset {
    /// All presets in increasing load order.
    pub const ALL: [QualityPreset; 4] = [
        QualityPreset::Low,
        QualityPreset::Medium,
        QualityPreset::High,
        QualityPreset::Ultra,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
            QualityPreset::Ultra => "ultra",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityPreset {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            "ultra" => Ok(QualityPreset::Ultra),
            _ => Err(ParseValueError::Unknown {
                kind: "quality preset",
                value: s.to_string(),
                expected: "low, medium, high, ultra",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolution_forms() {
        assert_eq!("1920x1080".parse::<ResolutionSpec>(), Ok(ResolutionSpec::FHD));
        assert_eq!("3440×1440".parse::<ResolutionSpec>(), Ok(ResolutionSpec::new(3440, 1440)));
        assert_eq!("4K".parse::<ResolutionSpec>(), Ok(ResolutionSpec::UHD));
        assert_eq!(" 1440p ".parse::<ResolutionSpec>(), Ok(ResolutionSpec::QHD));
    }

    #[test]
    fn test_parse_resolution_rejects_garbage() {
        assert!("1920".parse::<ResolutionSpec>().is_err());
        assert!("0x1080".parse::<ResolutionSpec>().is_err());
        assert!("widexhigh".parse::<ResolutionSpec>().is_err());
    }

    #[test]
    fn test_resolution_serializes_as_name() {
        let json = serde_json::to_string(&ResolutionSpec::QHD).unwrap();
        assert_eq!(json, "\"2560x1440\"");
        let back: ResolutionSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ResolutionSpec::QHD);
    }

    #[test]
    fn test_uhd_class() {
        assert!(ResolutionSpec::UHD.is_uhd_class());
        assert!(ResolutionSpec::new(5120, 2160).is_uhd_class());
        assert!(!ResolutionSpec::new(3440, 1440).is_uhd_class());
    }

    #[test]
    fn test_quality_order_and_parse() {
        assert!(QualityPreset::Low < QualityPreset::Ultra);
        assert_eq!("ULTRA".parse::<QualityPreset>(), Ok(QualityPreset::Ultra));
        assert!("extreme".parse::<QualityPreset>().is_err());
    }
}
