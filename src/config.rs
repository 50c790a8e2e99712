//! # Configuration Module
//!
//! Runtime settings for the application. Nothing is persisted between runs;
//! values come from defaults, command-line flags or the environment.
//!
//! ## Audio Files
//!
//! Songs are looked up as `{music_dir}/{song}.mp3`. The default music
//! directory is the current working directory, so running the application
//! next to `Song1.mp3` … `Song11.mp3` needs no configuration at all.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Window title shown by the desktop front end.
pub const DEFAULT_WINDOW_TITLE: &str = "AI-Powered Music Recommendation System";

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory holding the `.mp3` files
    pub music_dir: PathBuf,
    pub window_title: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from("."),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Create configuration with an explicit music directory.
    ///
    /// # Errors
    ///
    /// Fails when `music_dir` exists but is not a directory. A missing
    /// directory is accepted; every Play then reports the missing file.
    pub fn with_music_dir(music_dir: PathBuf) -> Result<Self> {
        if music_dir.exists() && !music_dir.is_dir() {
            anyhow::bail!("Music path {} is not a directory", music_dir.display());
        }
        if !music_dir.exists() {
            log::warn!(
                "Music directory {} does not exist; playback will fail until it does",
                music_dir.display()
            );
        }
        Ok(Self {
            music_dir,
            ..Self::default()
        })
    }

    /// Pretty JSON rendering, logged at debug level on start-up.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize runtime configuration")
    }
}
