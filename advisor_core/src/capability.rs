//! Capability Scorer
//!
//! Collapses a hardware descriptor into a single `CapabilityIndex`:
//!
//! ```text
//! throughput = compute_units x max(base_clock, boost_clock) / flagship_throughput
//! memory     = min(1, memory_mb / memory_reference_mb)
//! tier       = tier multiplier from the calibration tables
//! index      = max(floor, throughput^w_t x memory^w_m x tier^w_tier)
//! ```
//!
//! Total for every descriptor: zero fields drive the index toward the
//! floor instead of failing. Every factor is non-decreasing in its input and
//! every weight is non-negative, so the index is non-decreasing in compute
//! units, either clock, memory and tier.

use serde::{Deserialize, Serialize};

use crate::scaling_tables::ScalingTables;
use crate::types::{CapabilityIndex, HardwareDescriptor};

/// Individual factors behind an index, for reporting and debugging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityBreakdown {
    pub throughput_factor: f64,
    pub memory_factor: f64,
    pub tier_multiplier: f64,
    /// Weighted composite before the floor is applied.
    pub composite: f64,
    pub index: CapabilityIndex,
}

#[derive(Debug, Clone, Copy)]
pub struct CapabilityScorer<'a> {
    tables: &'a ScalingTables,
}

impl<'a> CapabilityScorer<'a> {
    pub fn new(tables: &'a ScalingTables) -> Self {
        Self { tables }
    }

    pub fn score(&self, hw: &HardwareDescriptor) -> CapabilityIndex {
        self.breakdown(hw).index
    }

    pub fn breakdown(&self, hw: &HardwareDescriptor) -> CapabilityBreakdown {
        let model = &self.tables.model;

        let throughput_factor = hw.raw_throughput() / model.flagship_throughput();
        let memory_factor = (hw.memory_mb as f64 / model.memory_reference_mb as f64).min(1.0);
        let tier_multiplier = self.tables.tier_multiplier(hw.tier);

        let composite = throughput_factor.powf(model.weights.throughput)
            * memory_factor.powf(model.weights.memory)
            * tier_multiplier.powf(model.weights.tier);

        CapabilityBreakdown {
            throughput_factor,
            memory_factor,
            tier_multiplier,
            composite,
            index: CapabilityIndex::floored(composite, model.capability_floor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArchitectureTier;

    fn flagship() -> HardwareDescriptor {
        HardwareDescriptor::new("RTX 4090")
            .with_compute_units(16_384)
            .with_clocks(2235, 2520)
            .with_memory_mb(24_576)
            .with_tier(ArchitectureTier::Enthusiast)
    }

    #[test]
    fn test_flagship_reference_factors() {
        let tables = ScalingTables::builtin();
        let b = CapabilityScorer::new(&tables).breakdown(&flagship());
        assert!((b.throughput_factor - 1.0).abs() < 1e-12);
        assert_eq!(b.memory_factor, 1.0);
        // 1.6^0.1
        assert!((b.index.value() - 1.6f64.powf(0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_memory_factor_is_capped() {
        let tables = ScalingTables::builtin();
        let scorer = CapabilityScorer::new(&tables);
        let a = scorer.score(&flagship().with_memory_mb(8_192));
        let b = scorer.score(&flagship().with_memory_mb(48_000));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_descriptor_hits_floor() {
        let tables = ScalingTables::builtin();
        let index = CapabilityScorer::new(&tables).score(&HardwareDescriptor::default());
        assert_eq!(index.value(), tables.model.capability_floor);
    }

    #[test]
    fn test_missing_boost_clock_uses_base() {
        let tables = ScalingTables::builtin();
        let scorer = CapabilityScorer::new(&tables);
        let base_only = flagship().with_clocks(2520, 0);
        assert_eq!(scorer.score(&base_only), scorer.score(&flagship()));
    }

    #[test]
    fn test_tier_raises_score() {
        let tables = ScalingTables::builtin();
        let scorer = CapabilityScorer::new(&tables);
        let mut last = 0.0;
        for tier in ArchitectureTier::ALL {
            let score = scorer.score(&flagship().with_tier(tier)).value();
            assert!(score > last, "{} should beat the tier below it", tier);
            last = score;
        }
    }

    #[test]
    fn test_mid_range_card_is_well_below_flagship() {
        let tables = ScalingTables::builtin();
        let scorer = CapabilityScorer::new(&tables);
        let rtx_3060 = HardwareDescriptor::new("RTX 3060")
            .with_compute_units(3584)
            .with_clocks(1320, 1777)
            .with_memory_mb(12_288)
            .with_tier(ArchitectureTier::MidRange);
        let index = scorer.score(&rtx_3060).value();
        assert!(index > 0.25 && index < 0.30, "index {}", index);
    }
}
