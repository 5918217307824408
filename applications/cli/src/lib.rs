//! Echo Player CLI Library
//!
//! Terminal front-end for the playback session: a simulated media element,
//! command parsing and the interactive player loop.
//!
//! This library exposes the components for testing purposes.

pub mod audio;
pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod player;

// Re-export commonly used types for convenience
pub use audio::SimulatedAudio;
pub use catalog::{load_catalog, parse_catalog};
pub use command::Command;
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use player::{Flow, Player};
