//! fps-advisor - command-line surface over `advisor_core`
//!
//! Parses commands, resolves game titles and GPU models through the
//! catalogs, runs one core operation per command and renders the result as
//! styled text or JSON.

pub mod cli;
pub mod colors;
pub mod commands;
pub mod context;
pub mod hardware;
pub mod render;

pub use cli::{Cli, Commands, OutputFormat};
pub use commands::{execute, HardwareProfile};
pub use context::Advisor;
pub use hardware::HardwareArgs;
