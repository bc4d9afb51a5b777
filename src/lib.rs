// src/lib.rs

pub mod c_api;
pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod loader;
pub mod persistence;

pub use crate::config::{CorrectionPolicy, EngineConfig, LoaderConfig, WordSourceFormat};
pub use crate::core::engine::AutocorrectEngine;
pub use crate::core::types::{CorrectionRecord, TouchZone, WordEntry};
pub use crate::error::{AutocorrectError, Result};
pub use crate::loader::{LoadReport, WordSource};
