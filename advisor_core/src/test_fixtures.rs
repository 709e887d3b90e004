//! Shared hardware and game fixtures for unit and property tests.

use crate::types::{ArchitectureTier, GameProfile, HardwareDescriptor, OptimizationLevel, ResolvedGame};

pub fn rtx_4090() -> HardwareDescriptor {
    HardwareDescriptor::new("NVIDIA GeForce RTX 4090")
        .with_compute_units(16_384)
        .with_clocks(2235, 2520)
        .with_memory_mb(24_576)
        .with_tier(ArchitectureTier::Enthusiast)
        .with_architecture("Ada Lovelace")
        .with_ray_tracing(true)
}

pub fn rtx_4070() -> HardwareDescriptor {
    HardwareDescriptor::new("NVIDIA GeForce RTX 4070")
        .with_compute_units(5888)
        .with_clocks(1920, 2475)
        .with_memory_mb(12_288)
        .with_tier(ArchitectureTier::HighEnd)
        .with_architecture("Ada Lovelace")
        .with_ray_tracing(true)
}

pub fn rtx_3060() -> HardwareDescriptor {
    HardwareDescriptor::new("NVIDIA GeForce RTX 3060")
        .with_compute_units(3584)
        .with_clocks(1320, 1777)
        .with_memory_mb(12_288)
        .with_tier(ArchitectureTier::MidRange)
        .with_architecture("Ampere")
        .with_ray_tracing(true)
}

pub fn gtx_1050_ti() -> HardwareDescriptor {
    HardwareDescriptor::new("NVIDIA GeForce GTX 1050 Ti")
        .with_compute_units(768)
        .with_clocks(1290, 1392)
        .with_memory_mb(4096)
        .with_tier(ArchitectureTier::Entry)
        .with_architecture("Pascal")
}

pub fn good_game() -> ResolvedGame {
    GameProfile::new("Baldur's Gate 3", 4096, 8192, OptimizationLevel::Good)
        .expect("valid fixture")
        .with_features(false, true, true)
        .with_engine("Divinity Engine 4.0", 2023)
        .into()
}

pub fn excellent_game() -> ResolvedGame {
    GameProfile::new("Counter-Strike 2", 1024, 4096, OptimizationLevel::Excellent)
        .expect("valid fixture")
        .with_engine("Source 2", 2023)
        .into()
}

pub fn starfield() -> ResolvedGame {
    GameProfile::new("Starfield", 6144, 8192, OptimizationLevel::Poor)
        .expect("valid fixture")
        .with_features(false, true, true)
        .with_engine("Creation Engine 2", 2023)
        .into()
}
