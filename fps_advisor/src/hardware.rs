//! Hardware selection flags shared by every command that needs a GPU.
//!
//! A descriptor comes either from the GPU catalog (`--gpu`) or from the manual
//! flags. With `--gpu`, manual flags override individual catalog fields, which
//! covers board variants such as an 8 GB RTX 3060.

use advisor_core::{AppError, ArchitectureTier, GpuCatalog, HardwareDescriptor};
use clap::Args;

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct HardwareArgs {
    /// GPU model from the built-in catalog (e.g. "RTX 3060", "GTX 1080 Ti")
    #[arg(long, value_name = "MODEL")]
    pub gpu: Option<String>,

    /// Shader/compute unit count (CUDA cores)
    #[arg(long, value_name = "N")]
    pub compute_units: Option<u32>,

    /// Base clock in MHz
    #[arg(long, value_name = "MHZ")]
    pub base_clock: Option<u32>,

    /// Boost clock in MHz
    #[arg(long, value_name = "MHZ")]
    pub boost_clock: Option<u32>,

    /// Video memory in MB
    #[arg(long, value_name = "MB")]
    pub memory: Option<u32>,

    /// Architecture tier: entry, mid-range, high-end, enthusiast
    #[arg(long, value_name = "TIER")]
    pub tier: Option<ArchitectureTier>,

    /// Hardware ray tracing support
    #[arg(long)]
    pub ray_tracing: bool,

    /// Display name for a manually described GPU
    #[arg(long, value_name = "NAME")]
    pub label: Option<String>,
}

impl HardwareArgs {
    pub fn resolve(&self, catalog: &GpuCatalog) -> Result<HardwareDescriptor, AppError> {
        let base = match &self.gpu {
            Some(model) => catalog.lookup(model)?,
            None => {
                if self.compute_units.is_none() {
                    return Err(AppError::IncompleteHardware(
                        "no --gpu model and no --compute-units".to_string(),
                    ));
                }
                if self.base_clock.is_none() && self.boost_clock.is_none() {
                    return Err(AppError::IncompleteHardware(
                        "--base-clock or --boost-clock is required for a manual GPU".to_string(),
                    ));
                }
                HardwareDescriptor::new("Custom GPU")
            }
        };
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut hw: HardwareDescriptor) -> HardwareDescriptor {
        if let Some(units) = self.compute_units {
            hw.compute_units = units;
        }
        if let Some(base) = self.base_clock {
            hw.base_clock_mhz = base;
        }
        if let Some(boost) = self.boost_clock {
            hw.boost_clock_mhz = boost;
        }
        if let Some(memory) = self.memory {
            hw.memory_mb = memory;
        }
        if let Some(tier) = self.tier {
            hw.tier = tier;
        }
        if self.ray_tracing {
            hw.ray_tracing_capable = true;
        }
        if let Some(label) = &self.label {
            hw.label = label.clone();
        }
        hw
    }
}
