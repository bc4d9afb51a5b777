// File: src/config.rs
//! Engine configuration, loadable from JSON.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How words are corrected. The two named constructors are the supported
/// variants; the fields may also be mixed freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectionPolicy {
    /// Shorter words are never corrected.
    pub min_word_length: usize,
    /// Break ranking ties by word popularity.
    pub use_frequency: bool,
    /// Maximum number of prefix completions returned.
    pub max_suggestions: usize,
}

impl CorrectionPolicy {
    /// Ranks by edit distance and keyboard proximity alone.
    pub fn keyboard_distance() -> Self {
        Self { min_word_length: 2, use_frequency: false, max_suggestions: 3 }
    }

    /// Also uses word frequency; skips two-letter words.
    pub fn frequency_aware() -> Self {
        Self { min_word_length: 3, use_frequency: true, max_suggestions: 3 }
    }
}

impl Default for CorrectionPolicy {
    fn default() -> Self {
        Self::keyboard_distance()
    }
}

/// Layout of the word source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordSourceFormat {
    /// One word per line; every word gets frequency 1.
    WordPerLine,
    /// Whitespace-separated columns, e.g. `rank word frequency`.
    /// Other columns are ignored.
    Columns { word_column: usize, frequency_column: usize },
}

impl Default for WordSourceFormat {
    fn default() -> Self {
        WordSourceFormat::WordPerLine
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub format: WordSourceFormat,
    /// Entries committed per store write.
    pub batch_size: usize,
    /// A store already holding at least this many words skips ingestion.
    pub ready_threshold: usize,
    /// Log progress every this many lines.
    pub progress_interval: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            format: WordSourceFormat::default(),
            batch_size: 5000,
            ready_threshold: 10_000,
            progress_interval: 50_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: CorrectionPolicy,
    pub loader: LoaderConfig,
    /// Where the lexicon snapshot is restored from and saved to.
    pub snapshot_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
