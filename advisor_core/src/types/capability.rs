//! CapabilityIndex Type-Safe Wrapper
//!
//! A strictly positive, finite scalar summarizing a descriptor's gaming
//! throughput. Only the capability scorer constructs one (deserialization
//! rejects anything else), so downstream code can divide by it without
//! re-checking.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Display precision (decimal places).
pub const CAPABILITY_DISPLAY_PRECISION: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct CapabilityIndex(f64);

impl CapabilityIndex {
    /// Clamp `raw` to `floor`; NaN and negative infinity collapse to the floor.
    pub(crate) fn floored(raw: f64, floor: f64) -> Self {
        let floor = if floor.is_finite() && floor > 0.0 { floor } else { f64::MIN_POSITIVE };
        let value = if raw.is_nan() {
            floor
        } else {
            raw.clamp(floor, f64::MAX)
        };
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Dimensionless headroom against a reference index.
    #[inline]
    pub fn ratio_to(&self, reference: f64) -> f64 {
        self.0 / reference
    }
}

impl<'de> Deserialize<'de> for CapabilityIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(serde::de::Error::custom(format!(
                "capability index must be positive and finite, got {}",
                value
            )))
        }
    }
}

impl fmt::Display for CapabilityIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", CAPABILITY_DISPLAY_PRECISION, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_applies() {
        assert_eq!(CapabilityIndex::floored(0.0, 0.05).value(), 0.05);
        assert_eq!(CapabilityIndex::floored(-3.0, 0.05).value(), 0.05);
        assert_eq!(CapabilityIndex::floored(f64::NAN, 0.05).value(), 0.05);
        assert_eq!(CapabilityIndex::floored(0.7, 0.05).value(), 0.7);
    }

    #[test]
    fn test_infinite_raw_stays_finite() {
        assert!(CapabilityIndex::floored(f64::INFINITY, 0.05).value().is_finite());
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(CapabilityIndex::floored(1.23456, 0.05).to_string(), "1.235");
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        let index: CapabilityIndex = serde_json::from_str("0.27").unwrap();
        assert_eq!(index.value(), 0.27);
        assert!(serde_json::from_str::<CapabilityIndex>("0.0").is_err());
        assert!(serde_json::from_str::<CapabilityIndex>("-1.5").is_err());
    }
}
