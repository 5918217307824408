//! Catalog loading

use crate::error::{CliError, Result};
use echo_core::Song;
use std::collections::HashSet;
use std::path::Path;

/// Read a catalog (JSON array of songs) from disk
pub fn load_catalog(path: &Path) -> Result<Vec<Song>> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        CliError::Catalog(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse_catalog(&raw)
}

/// Parse and validate a catalog
///
/// Song ids must be unique; play counts in the catalog are dropped since the
/// top-played list owns them.
pub fn parse_catalog(raw: &str) -> Result<Vec<Song>> {
    let mut songs: Vec<Song> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    for song in &mut songs {
        if !seen.insert(song.id) {
            return Err(CliError::Catalog(format!("Duplicate song id {}", song.id)));
        }
        song.play_count = None;
    }

    tracing::debug!(songs = songs.len(), "Loaded catalog");
    Ok(songs)
}
