use std::path::PathBuf;

use advisor_core::{Feature, QualityPreset, ResolutionSpec};
use clap::{Parser, Subcommand, ValueEnum};

use crate::hardware::HardwareArgs;

#[derive(Parser, Debug)]
#[command(name = "fps-advisor")]
#[command(version, about = "Frame-rate predictor and settings optimizer for GPU/game combinations", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./fps-advisor.json, then ~/.fps-advisor/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict frame rate for one resolution and preset
    Predict {
        #[arg(long)]
        game: String,

        /// e.g. 1920x1080, 1440p, 4k (default from config)
        #[arg(long)]
        resolution: Option<ResolutionSpec>,

        /// low, medium, high, ultra (default from config)
        #[arg(long)]
        quality: Option<QualityPreset>,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Predict all four quality presets at one resolution
    Presets {
        #[arg(long)]
        game: String,

        #[arg(long)]
        resolution: Option<ResolutionSpec>,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Predict 1080p, 1440p and 4K at one preset
    Resolutions {
        #[arg(long)]
        game: String,

        #[arg(long)]
        quality: Option<QualityPreset>,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Find the resolution and preset that reach a target frame rate
    Optimize {
        #[arg(long)]
        game: String,

        /// Default from config
        #[arg(long)]
        target_fps: Option<u32>,

        /// Pick the lightest qualifying settings instead of the heaviest
        #[arg(long)]
        prefer_performance: bool,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Compare two GPUs, optionally on one game
    Compare {
        /// Second GPU model from the catalog
        #[arg(long, value_name = "MODEL")]
        against: String,

        #[arg(long)]
        game: Option<String>,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Check memory and feature compatibility with a game
    Check {
        #[arg(long)]
        game: String,

        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Show the capability index of a GPU and its factors
    Capability {
        #[command(flatten)]
        hardware: HardwareArgs,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// List games in the database
    Games {
        #[arg(long)]
        search: Option<String>,

        /// rt, dlss, fsr
        #[arg(long)]
        feature: Option<Feature>,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// List GPU models in the catalog
    Gpus {
        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Print or export the calibration tables
    Tables {
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        #[arg(short, long, default_value = "human")]
        output: OutputFormat,
    },

    /// Write a GPU profile (descriptor, capability, optional game check) to JSON
    Export {
        /// Destination file; parent directories are created
        #[arg(long, value_name = "PATH", default_value = "profile.json")]
        path: PathBuf,

        /// Include a compatibility check against this game
        #[arg(long)]
        game: Option<String>,

        #[command(flatten)]
        hardware: HardwareArgs,
    },

    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(long, value_name = "PATH")]
        save: Option<PathBuf>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Predict { .. } => "predict",
            Commands::Presets { .. } => "presets",
            Commands::Resolutions { .. } => "resolutions",
            Commands::Optimize { .. } => "optimize",
            Commands::Compare { .. } => "compare",
            Commands::Check { .. } => "check",
            Commands::Capability { .. } => "capability",
            Commands::Games { .. } => "games",
            Commands::Gpus { .. } => "gpus",
            Commands::Tables { .. } => "tables",
            Commands::Export { .. } => "export",
            Commands::Config { .. } => "config",
        }
    }
}
