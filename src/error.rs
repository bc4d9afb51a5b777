// File: src/error.rs
//! Error types for engine lifecycle and ingestion.
//!
//! Query operations (`correct`, `suggest_prefix`, undo lookups) never fail;
//! they degrade to "no result". Only opening, loading and persisting the
//! lexicon surface an [`AutocorrectError`].

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutocorrectError {
    /// I/O errors while reading a word source or writing a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured word source could not be opened.
    #[error("word source {path:?} is unavailable: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A lexicon snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Ingestion failed or the loader thread died.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// A load was already started on this engine.
    #[error("lexicon load already started")]
    AlreadyLoading,
}

pub type Result<T> = std::result::Result<T, AutocorrectError>;

impl AutocorrectError {
    pub fn store_unavailable<S: Into<String>>(msg: S) -> Self {
        AutocorrectError::StoreUnavailable(msg.into())
    }
}
