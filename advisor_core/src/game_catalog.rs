//! Game Catalog Module
//!
//! Title -> `GameProfile` lookup over a built-in dataset, optionally merged
//! with a user-supplied JSON database. This is the only place title queries
//! are matched loosely; everything downstream receives a `ResolvedGame` that
//! records whether the match was exact.
//!
//! Resolution order for a query:
//! 1. exact title
//! 2. case-insensitive title equality
//! 3. case-insensitive substring (query contained in title), first in title order
//!
//! Steps 2 and 3 produce `MatchKind::Fuzzy`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::errors::CatalogError;
use crate::types::{GameProfile, HardwareDescriptor, MatchKind, OptimizationLevel, ParseValueError, ResolvedGame};

/// Upper bound on "did you mean" titles attached to a miss.
pub const MAX_SUGGESTIONS: usize = 5;

// ============================================================================
// Database file format
// ============================================================================

/// One entry of a game database file, keyed by title in the enclosing map.
///
/// ```json
/// { "Cyberpunk 2077": { "minimum_vram": 3072, "recommended_vram": 8192, "optimization_level": "good" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRecord {
    #[serde(alias = "minimum_vram_mb")]
    pub minimum_vram: u32,
    #[serde(alias = "recommended_vram_mb")]
    pub recommended_vram: u32,
    pub minimum_gpu: String,
    pub recommended_gpu: String,
    pub supports_raytracing: bool,
    pub supports_dlss: bool,
    pub supports_fsr: bool,
    pub release_year: u16,
    pub engine: String,
    pub optimization_level: OptimizationLevel,
    pub settings: Vec<String>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            minimum_vram: 0,
            recommended_vram: 0,
            minimum_gpu: "Unknown".to_string(),
            recommended_gpu: "Unknown".to_string(),
            supports_raytracing: false,
            supports_dlss: false,
            supports_fsr: false,
            release_year: 0,
            engine: "Unknown".to_string(),
            optimization_level: OptimizationLevel::default(),
            settings: Vec::new(),
        }
    }
}

impl GameRecord {
    pub fn into_profile(self, title: impl Into<String>) -> Result<GameProfile, CatalogError> {
        let profile = GameProfile::new(title, self.minimum_vram, self.recommended_vram, self.optimization_level)?
            .with_gpus(self.minimum_gpu, self.recommended_gpu)
            .with_features(self.supports_raytracing, self.supports_dlss, self.supports_fsr)
            .with_engine(self.engine, self.release_year)
            .with_settings(self.settings);
        Ok(profile)
    }
}

impl From<&GameProfile> for GameRecord {
    fn from(p: &GameProfile) -> Self {
        Self {
            minimum_vram: p.minimum_vram_mb,
            recommended_vram: p.recommended_vram_mb,
            minimum_gpu: p.minimum_gpu.clone(),
            recommended_gpu: p.recommended_gpu.clone(),
            supports_raytracing: p.supports_raytracing,
            supports_dlss: p.supports_dlss,
            supports_fsr: p.supports_fsr,
            release_year: p.release_year,
            engine: p.engine.clone(),
            optimization_level: p.optimization_level,
            settings: p.settings.clone(),
        }
    }
}

// ============================================================================
// Feature filter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    RayTracing,
    Dlss,
    Fsr,
}

impl Feature {
    fn supported_by(self, profile: &GameProfile) -> bool {
        match self {
            Feature::RayTracing => profile.supports_raytracing,
            Feature::Dlss => profile.supports_dlss,
            Feature::Fsr => profile.supports_fsr,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feature::RayTracing => "Ray Tracing",
            Feature::Dlss => "DLSS",
            Feature::Fsr => "FSR",
        })
    }
}

impl FromStr for Feature {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rt" | "raytracing" | "ray_tracing" | "ray-tracing" => Ok(Feature::RayTracing),
            "dlss" => Ok(Feature::Dlss),
            "fsr" => Ok(Feature::Fsr),
            _ => Err(ParseValueError::Unknown {
                kind: "feature",
                value: s.to_string(),
                expected: "rt, raytracing, dlss, fsr",
            }),
        }
    }
}

// ============================================================================
// Compatibility report
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compatibility {
    Poor,
    Good,
    Excellent,
}

impl fmt::Display for Compatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Compatibility::Poor => "poor",
            Compatibility::Good => "good",
            Compatibility::Excellent => "excellent",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub game: String,
    pub match_kind: MatchKind,
    pub gpu: String,
    pub compatibility: Compatibility,
    pub message: String,
    pub memory_mb: u32,
    pub minimum_vram_mb: u32,
    pub recommended_vram_mb: u32,
    pub minimum_gpu: String,
    pub recommended_gpu: String,
    pub engine: String,
    pub optimization_level: OptimizationLevel,
    pub features: Vec<String>,
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameCatalog {
    games: BTreeMap<String, GameProfile>,
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GameCatalog {
    pub fn empty() -> Self {
        Self { games: BTreeMap::new() }
    }

    pub fn builtin() -> Self {
        let games = BUILTIN_GAMES
            .iter()
            .map(|g| (g.title.to_string(), g.to_profile()))
            .collect();
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// All titles in sorted order.
    pub fn titles(&self) -> Vec<&str> {
        self.games.keys().map(String::as_str).collect()
    }

    pub fn get(&self, title: &str) -> Option<&GameProfile> {
        self.games.get(title)
    }

    pub fn resolve(&self, query: &str) -> Result<ResolvedGame, CatalogError> {
        let query = query.trim();
        if let Some(profile) = self.games.get(query) {
            return Ok(ResolvedGame::exact(profile.clone()));
        }

        let needle = query.to_lowercase();
        if !needle.is_empty() {
            let fuzzy = self
                .games
                .iter()
                .find(|(title, _)| title.to_lowercase() == needle)
                .or_else(|| self.games.iter().find(|(title, _)| title.to_lowercase().contains(&needle)));
            if let Some((title, profile)) = fuzzy {
                debug!(query, title = %title, "Resolved game by fuzzy match");
                return Ok(ResolvedGame::fuzzy(profile.clone()));
            }
        }

        Err(CatalogError::GameNotFound {
            title: query.to_string(),
            suggestions: self.suggestions(query),
        })
    }

    /// Titles containing `query`, case-insensitively, in sorted order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.games
            .keys()
            .filter(|title| title.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    fn suggestions(&self, query: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for word in query.split_whitespace().filter(|w| w.chars().count() > 1) {
            for title in self.search(word) {
                if !found.iter().any(|t| t == title) {
                    found.push(title.to_string());
                }
            }
        }
        found.sort();
        found.truncate(MAX_SUGGESTIONS);
        found
    }

    /// Per-game settings list; empty when the title does not resolve.
    pub fn settings_for(&self, query: &str) -> Vec<String> {
        self.resolve(query)
            .map(|resolved| resolved.profile.settings)
            .unwrap_or_default()
    }

    pub fn games_by_feature(&self, feature: Feature) -> Vec<&str> {
        self.games
            .iter()
            .filter(|(_, profile)| feature.supported_by(profile))
            .map(|(title, _)| title.as_str())
            .collect()
    }

    /// Add or replace a profile. Returns the replaced profile, if any.
    pub fn insert(&mut self, profile: GameProfile) -> Result<Option<GameProfile>, CatalogError> {
        profile.validate()?;
        Ok(self.games.insert(profile.title.clone(), profile))
    }

    /// Merge a JSON database (title -> record) over the current entries.
    ///
    /// All records are validated before any is inserted.
    pub fn merge_json(&mut self, json: &str) -> Result<usize, CatalogError> {
        let records: BTreeMap<String, GameRecord> = serde_json::from_str(json)?;
        let profiles = records
            .into_iter()
            .map(|(title, record)| record.into_profile(title))
            .collect::<Result<Vec<_>, _>>()?;
        let count = profiles.len();
        for profile in profiles {
            self.games.insert(profile.title.clone(), profile);
        }
        Ok(count)
    }

    pub fn load_json(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            action: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.merge_json(&json)?;
        info!(path = %path.display(), merged = count, total = self.len(), "Loaded custom game database");
        Ok(count)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        let records: BTreeMap<&str, GameRecord> = self
            .games
            .iter()
            .map(|(title, profile)| (title.as_str(), GameRecord::from(profile)))
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    pub fn export_json(&self, path: &Path) -> Result<(), CatalogError> {
        let io_err = |source| CatalogError::Io {
            action: "write",
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_json()?).map_err(io_err)
    }

    /// Memory-based compatibility rating plus feature notes.
    pub fn check_compatibility(&self, hw: &HardwareDescriptor, game: &ResolvedGame) -> CompatibilityReport {
        let profile = &game.profile;
        let (compatibility, message) = if hw.memory_mb >= profile.recommended_vram_mb {
            (Compatibility::Excellent, "Your GPU exceeds the recommended requirements")
        } else if hw.memory_mb >= profile.minimum_vram_mb {
            (
                Compatibility::Good,
                "Your GPU meets minimum requirements but is below recommended",
            )
        } else {
            (Compatibility::Poor, "Your GPU does not meet minimum VRAM requirements")
        };

        let mut features = Vec::new();
        for (supported, name) in [(profile.supports_raytracing, "Ray Tracing"), (profile.supports_dlss, "DLSS")] {
            if supported {
                features.push(if hw.ray_tracing_capable {
                    format!("{} supported", name)
                } else {
                    format!("{} not supported on your GPU", name)
                });
            }
        }
        if profile.supports_fsr {
            features.push("FSR supported (all GPUs)".to_string());
        }

        CompatibilityReport {
            game: profile.title.clone(),
            match_kind: game.match_kind,
            gpu: hw.label.clone(),
            compatibility,
            message: message.to_string(),
            memory_mb: hw.memory_mb,
            minimum_vram_mb: profile.minimum_vram_mb,
            recommended_vram_mb: profile.recommended_vram_mb,
            minimum_gpu: profile.minimum_gpu.clone(),
            recommended_gpu: profile.recommended_gpu.clone(),
            engine: profile.engine.clone(),
            optimization_level: profile.optimization_level,
            features,
        }
    }
}

// ============================================================================
// Built-in dataset
// ============================================================================

struct BuiltinGame {
    title: &'static str,
    minimum_vram_mb: u32,
    recommended_vram_mb: u32,
    minimum_gpu: &'static str,
    recommended_gpu: &'static str,
    /// (ray tracing, DLSS, FSR)
    features: (bool, bool, bool),
    release_year: u16,
    engine: &'static str,
    level: OptimizationLevel,
    settings: &'static [&'static str],
}

impl BuiltinGame {
    fn to_profile(&self) -> GameProfile {
        let (rt, dlss, fsr) = self.features;
        GameProfile {
            title: self.title.to_string(),
            minimum_vram_mb: self.minimum_vram_mb,
            recommended_vram_mb: self.recommended_vram_mb,
            minimum_gpu: self.minimum_gpu.to_string(),
            recommended_gpu: self.recommended_gpu.to_string(),
            supports_raytracing: rt,
            supports_dlss: dlss,
            supports_fsr: fsr,
            release_year: self.release_year,
            engine: self.engine.to_string(),
            optimization_level: self.level,
            settings: self.settings.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const BUILTIN_GAMES: &[BuiltinGame] = &[
    BuiltinGame {
        title: "Cyberpunk 2077",
        minimum_vram_mb: 3072,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 970",
        recommended_gpu: "RTX 2060",
        features: (true, true, true),
        release_year: 2020,
        engine: "REDengine 4",
        level: OptimizationLevel::Good,
        settings: &[
            "Quality Preset", "Ray Tracing", "DLSS", "FSR", "Crowd Density", "Shadow Quality",
            "Reflection Quality", "Ambient Occlusion", "Screen Space Reflections", "Volumetric Fog",
            "Cascaded Shadows",
        ],
    },
    BuiltinGame {
        title: "Elden Ring",
        minimum_vram_mb: 3072,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 1060",
        recommended_gpu: "RTX 3060",
        features: (true, false, false),
        release_year: 2022,
        engine: "FromSoftware Engine",
        level: OptimizationLevel::Fair,
        settings: &[
            "Quality Preset", "Texture Quality", "Antialiasing Quality", "SSAO", "Depth of Field",
            "Motion Blur", "Shadow Quality", "Lighting Quality", "Effects Quality", "Volumetric Quality",
            "Reflection Quality", "Water Surface Quality", "Shader Quality", "Global Illumination Quality",
            "Grass Quality",
        ],
    },
    BuiltinGame {
        title: "Red Dead Redemption 2",
        minimum_vram_mb: 2048,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 770",
        recommended_gpu: "RTX 2070",
        features: (false, true, true),
        release_year: 2019,
        engine: "RAGE",
        level: OptimizationLevel::Good,
        settings: &[
            "Quality Preset", "Texture Quality", "Anisotropic Filtering", "Lighting Quality",
            "Global Illumination Quality", "Shadow Quality", "Far Shadow Quality",
            "Screen Space Ambient Occlusion", "Reflection Quality", "Mirror Quality", "Water Quality",
            "Volumetrics Quality", "Particle Quality", "Tessellation Quality", "TAA", "FXAA", "MSAA",
        ],
    },
    BuiltinGame {
        title: "Hogwarts Legacy",
        minimum_vram_mb: 4096,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 960",
        recommended_gpu: "RTX 3070",
        features: (true, true, true),
        release_year: 2023,
        engine: "Unreal Engine 4",
        level: OptimizationLevel::Fair,
        settings: &[
            "Quality Preset", "Ray Tracing Reflections", "Ray Tracing Shadows",
            "Ray Tracing Ambient Occlusion", "DLSS", "FSR", "Effects Quality", "Material Quality",
            "Fog Quality", "Sky Quality", "Foliage Quality", "Post Process Quality", "Shadow Quality",
            "Texture Quality", "View Distance Quality", "Population Quality",
        ],
    },
    BuiltinGame {
        title: "God of War Ragnarok",
        minimum_vram_mb: 4096,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 1070",
        recommended_gpu: "RTX 3070",
        features: (false, true, true),
        release_year: 2024,
        engine: "Santa Monica Studio Engine",
        level: OptimizationLevel::Excellent,
        settings: &[
            "Graphics Preset", "Texture Quality", "Model Quality", "Anisotropic Filter", "Shadows",
            "Reflections", "Atmospherics", "Ambient Occlusion", "DLSS", "FSR",
        ],
    },
    BuiltinGame {
        title: "Baldur's Gate 3",
        minimum_vram_mb: 4096,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 970",
        recommended_gpu: "RTX 3060",
        features: (false, true, true),
        release_year: 2023,
        engine: "Divinity Engine 4.0",
        level: OptimizationLevel::Good,
        settings: &[
            "Overall Preset", "Model Quality", "Detail Distance", "Instance Distance", "Texture Quality",
            "Texture Filtering", "Animation LOD Distance", "Slow HDD Mode", "Shadow Quality",
            "Cloud Quality", "Fog Quality", "God Rays", "Bloom", "Depth of Field", "DLSS", "FSR",
            "Antialiasing",
        ],
    },
    BuiltinGame {
        title: "Starfield",
        minimum_vram_mb: 6144,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 1070 Ti",
        recommended_gpu: "RTX 2080",
        features: (false, true, true),
        release_year: 2023,
        engine: "Creation Engine 2",
        level: OptimizationLevel::Poor,
        settings: &[
            "Render Resolution Scale", "Shadow Quality", "Indirect Lighting", "Reflections",
            "Particle Quality", "Volumetric Lighting", "Crowd Density", "Motion Blur", "GTAO",
            "Grass Quality", "Contact Shadows", "VSync", "Upscaling", "Film Grain", "Enable VRS",
        ],
    },
    BuiltinGame {
        title: "Alan Wake 2",
        minimum_vram_mb: 6144,
        recommended_vram_mb: 16384,
        minimum_gpu: "RTX 2060",
        recommended_gpu: "RTX 4070",
        features: (true, true, true),
        release_year: 2023,
        engine: "Northlight Engine",
        level: OptimizationLevel::Fair,
        settings: &[
            "Quality Preset", "Texture Resolution", "Shadow Resolution", "Global Reflections",
            "Volumetric Lighting", "Fog Quality", "Global Illumination", "Post Process",
            "Ray Traced Reflections", "DLSS", "FSR", "XeSS",
        ],
    },
    BuiltinGame {
        title: "Call of Duty: Warzone",
        minimum_vram_mb: 4096,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 970",
        recommended_gpu: "RTX 3060",
        features: (true, true, true),
        release_year: 2020,
        engine: "IW Engine",
        level: OptimizationLevel::Good,
        settings: &[
            "Render Resolution", "Dynamic Resolution", "Upscaling", "VRAM Scale Target",
            "Texture Resolution", "Texture Filter", "Nearby LOD", "Distant LOD", "Clutter Draw Distance",
            "Particle Quality", "Bullet Impacts", "Shader Quality", "Tessellation",
            "On-Demand Texture Streaming", "Shadow Quality", "Screen Space Shadows", "Ambient Occlusion",
            "Screen Space Reflections", "Static Reflection Quality", "Weather Grid Volumes",
            "Water Quality",
        ],
    },
    BuiltinGame {
        title: "Fortnite",
        minimum_vram_mb: 2048,
        recommended_vram_mb: 4096,
        minimum_gpu: "GTX 660",
        recommended_gpu: "RTX 2060",
        features: (true, true, true),
        release_year: 2017,
        engine: "Unreal Engine 5",
        level: OptimizationLevel::Excellent,
        settings: &[
            "Quality Preset", "3D Resolution", "View Distance", "Shadows", "Anti-Aliasing", "Textures",
            "Effects", "Post Processing", "Ray Tracing", "DLSS", "FSR",
        ],
    },
    BuiltinGame {
        title: "Counter-Strike 2",
        minimum_vram_mb: 1024,
        recommended_vram_mb: 4096,
        minimum_gpu: "GTX 650",
        recommended_gpu: "RTX 2060",
        features: (false, false, false),
        release_year: 2023,
        engine: "Source 2",
        level: OptimizationLevel::Excellent,
        settings: &[
            "Global Shadow Quality", "Model/Texture Detail", "Texture Filtering", "Shader Detail",
            "Particle Detail", "Ambient Occlusion", "High Dynamic Range", "FidelityFX Super Resolution",
            "NVIDIA Reflex",
        ],
    },
    BuiltinGame {
        title: "Valorant",
        minimum_vram_mb: 1024,
        recommended_vram_mb: 4096,
        minimum_gpu: "GT 730",
        recommended_gpu: "GTX 1050 Ti",
        features: (false, false, false),
        release_year: 2020,
        engine: "Unreal Engine 4",
        level: OptimizationLevel::Excellent,
        settings: &[
            "Material Quality", "Texture Quality", "Detail Quality", "UI Quality", "Vignette", "VSync",
            "Anti-Aliasing", "Anisotropic Filtering", "Improve Clarity", "Bloom", "Distortion",
            "Cast Shadows",
        ],
    },
    BuiltinGame {
        title: "The Witcher 3: Wild Hunt",
        minimum_vram_mb: 2048,
        recommended_vram_mb: 8192,
        minimum_gpu: "GTX 660",
        recommended_gpu: "RTX 3070",
        features: (true, true, true),
        release_year: 2015,
        engine: "REDengine 3",
        level: OptimizationLevel::Excellent,
        settings: &[
            "Graphics Preset", "Post Processing", "Motion Blur", "Blur", "Anti-Aliasing", "Bloom",
            "Sharpening", "Ambient Occlusion", "Depth of Field", "Chromatic Aberration", "Vignetting",
            "Light Shafts", "Detail Level", "Shadow Quality", "Terrain Quality", "Water Quality",
            "Foliage Visibility Range", "Grass Density", "Texture Quality",
            "Number of Background Characters", "Ray Tracing", "DLSS",
        ],
    },
    BuiltinGame {
        title: "GTA V",
        minimum_vram_mb: 1024,
        recommended_vram_mb: 4096,
        minimum_gpu: "GTX 660",
        recommended_gpu: "GTX 1060",
        features: (false, false, false),
        release_year: 2015,
        engine: "RAGE",
        level: OptimizationLevel::Excellent,
        settings: &[
            "FXAA", "MSAA", "TXAA", "Population Density", "Population Variety", "Distance Scaling",
            "Texture Quality", "Shader Quality", "Shadow Quality", "Reflection Quality", "Reflection MSAA",
            "Water Quality", "Particles Quality", "Grass Quality", "Post FX", "Anisotropic Filtering",
            "Ambient Occlusion", "Tessellation", "Long Shadows", "High Resolution Shadows",
            "High Detail Streaming While Flying", "Extended Distance Scaling", "Extended Shadows Distance",
        ],
    },
    BuiltinGame {
        title: "Minecraft",
        minimum_vram_mb: 512,
        recommended_vram_mb: 4096,
        minimum_gpu: "Intel HD 4000",
        recommended_gpu: "RTX 2060",
        features: (true, true, false),
        release_year: 2011,
        engine: "Java/Bedrock Engine",
        level: OptimizationLevel::Fair,
        settings: &[
            "Graphics", "Render Distance", "Simulation Distance", "Max Framerate", "View Bobbing",
            "GUI Scale", "Brightness", "Clouds", "Particles", "Smooth Lighting", "Biome Blend",
            "Entity Shadows", "Entity Distance", "FOV Effects", "Darkness Pulsing", "Ray Tracing",
        ],
    },
];

// ============================================================================
// Tests
// ============================================================================
