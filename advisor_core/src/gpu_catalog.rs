//! GPU Catalog Module
//!
//! Model name -> `HardwareDescriptor` for common NVIDIA cards (RTX 40/30/20,
//! GTX 16/10 series). Matching is case-insensitive and picks the longest
//! catalog name contained in the query, so "GeForce RTX 4070 Ti Super"
//! resolves to "RTX 4070 TI SUPER" rather than "RTX 4070".

use tracing::debug;

use crate::errors::CatalogError;
use crate::types::{ArchitectureTier, HardwareDescriptor};

struct GpuSpec {
    model: &'static str,
    compute_units: u32,
    base_clock_mhz: u32,
    boost_clock_mhz: u32,
    memory_mb: u32,
    architecture: &'static str,
    tier: ArchitectureTier,
}

impl GpuSpec {
    fn descriptor(&self) -> HardwareDescriptor {
        HardwareDescriptor::new(format!("NVIDIA GeForce {}", self.model))
            .with_compute_units(self.compute_units)
            .with_clocks(self.base_clock_mhz, self.boost_clock_mhz)
            .with_memory_mb(self.memory_mb)
            .with_tier(self.tier)
            .with_architecture(self.architecture)
            .with_ray_tracing(self.model.starts_with("RTX"))
    }
}

macro_rules! gpu {
    ($model:literal, $cu:literal, $base:literal, $boost:literal, $mem_gb:literal, $arch:literal, $tier:ident) => {
        GpuSpec {
            model: $model,
            compute_units: $cu,
            base_clock_mhz: $base,
            boost_clock_mhz: $boost,
            memory_mb: $mem_gb * 1024,
            architecture: $arch,
            tier: ArchitectureTier::$tier,
        }
    };
}

const GPU_SPECS: &[GpuSpec] = &[
    // RTX 40
    gpu!("RTX 4090", 16384, 2235, 2520, 24, "Ada Lovelace", Enthusiast),
    gpu!("RTX 4080 SUPER", 10240, 2290, 2550, 16, "Ada Lovelace", Enthusiast),
    gpu!("RTX 4080", 9728, 2205, 2505, 16, "Ada Lovelace", Enthusiast),
    gpu!("RTX 4070 TI SUPER", 8448, 2340, 2610, 16, "Ada Lovelace", HighEnd),
    gpu!("RTX 4070 TI", 7680, 2310, 2610, 12, "Ada Lovelace", HighEnd),
    gpu!("RTX 4070 SUPER", 7168, 1980, 2475, 12, "Ada Lovelace", HighEnd),
    gpu!("RTX 4070", 5888, 1920, 2475, 12, "Ada Lovelace", HighEnd),
    gpu!("RTX 4060 TI", 4352, 2310, 2535, 8, "Ada Lovelace", MidRange),
    gpu!("RTX 4060", 3072, 1830, 2460, 8, "Ada Lovelace", MidRange),
    // RTX 30
    gpu!("RTX 3090 TI", 10752, 1560, 1860, 24, "Ampere", Enthusiast),
    gpu!("RTX 3090", 10496, 1395, 1695, 24, "Ampere", Enthusiast),
    gpu!("RTX 3080 TI", 10240, 1365, 1665, 12, "Ampere", Enthusiast),
    gpu!("RTX 3080", 8704, 1440, 1710, 10, "Ampere", HighEnd),
    gpu!("RTX 3070 TI", 6144, 1575, 1770, 8, "Ampere", HighEnd),
    gpu!("RTX 3070", 5888, 1500, 1725, 8, "Ampere", HighEnd),
    gpu!("RTX 3060 TI", 4864, 1410, 1670, 8, "Ampere", MidRange),
    gpu!("RTX 3060", 3584, 1320, 1777, 12, "Ampere", MidRange),
    gpu!("RTX 3050", 2560, 1552, 1777, 8, "Ampere", Entry),
    // RTX 20
    gpu!("RTX 2080 TI", 4352, 1350, 1545, 11, "Turing", HighEnd),
    gpu!("RTX 2080 SUPER", 3072, 1650, 1815, 8, "Turing", HighEnd),
    gpu!("RTX 2080", 2944, 1515, 1710, 8, "Turing", HighEnd),
    gpu!("RTX 2070 SUPER", 2560, 1605, 1770, 8, "Turing", MidRange),
    gpu!("RTX 2070", 2304, 1410, 1620, 8, "Turing", MidRange),
    gpu!("RTX 2060 SUPER", 2176, 1470, 1650, 8, "Turing", MidRange),
    gpu!("RTX 2060", 1920, 1365, 1680, 6, "Turing", Entry),
    // GTX 16
    gpu!("GTX 1660 TI", 1536, 1500, 1770, 6, "Turing", Entry),
    gpu!("GTX 1660 SUPER", 1408, 1530, 1785, 6, "Turing", Entry),
    gpu!("GTX 1660", 1408, 1530, 1785, 6, "Turing", Entry),
    gpu!("GTX 1650 SUPER", 1280, 1530, 1725, 4, "Turing", Entry),
    gpu!("GTX 1650", 896, 1485, 1665, 4, "Turing", Entry),
    // GTX 10
    gpu!("GTX 1080 TI", 3584, 1480, 1582, 11, "Pascal", HighEnd),
    gpu!("GTX 1080", 2560, 1607, 1733, 8, "Pascal", MidRange),
    gpu!("GTX 1070 TI", 2432, 1607, 1683, 8, "Pascal", MidRange),
    gpu!("GTX 1070", 1920, 1506, 1683, 8, "Pascal", MidRange),
    gpu!("GTX 1060", 1280, 1506, 1708, 6, "Pascal", Entry),
    gpu!("GTX 1050 TI", 768, 1290, 1392, 4, "Pascal", Entry),
    gpu!("GTX 1050", 640, 1354, 1455, 2, "Pascal", Entry),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GpuCatalog;

impl GpuCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Model names in catalog order (newest series first).
    pub fn models(&self) -> Vec<&'static str> {
        GPU_SPECS.iter().map(|s| s.model).collect()
    }

    pub fn lookup(&self, name: &str) -> Result<HardwareDescriptor, CatalogError> {
        let query = normalize(name);
        let spec = GPU_SPECS
            .iter()
            .filter(|s| !query.is_empty() && query.contains(s.model))
            .max_by_key(|s| s.model.len())
            .ok_or_else(|| CatalogError::GpuNotFound(name.trim().to_string()))?;
        debug!(query = name, model = spec.model, "Resolved GPU model");
        Ok(spec.descriptor())
    }
}

/// Upper-case, single-spaced, with "Ti"/"Super" split off the model number.
fn normalize(name: &str) -> String {
    let upper = name.to_uppercase();
    let spaced = upper.replace("TI", " TI").replace("SUPER", " SUPER");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
