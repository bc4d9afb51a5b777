use crate::config::EngineConfig;
use crate::core::keyboard::KeyboardLayout;
use crate::core::lexicon::{Lexicon, LexiconStore, WordLookup};
use crate::core::tracker::CorrectionTracker;
use crate::core::types::{CorrectionRecord, TouchZone};
use crate::error::{AutocorrectError, Result};
use crate::fuzzy::candidates::{CandidateGenerator, CandidateSet};
use crate::fuzzy::scoring::{restore_case, Ranker};
use crate::loader::{LoadReport, LoadStatus, WordLoader, WordSource};
use crate::persistence::{load_snapshot, save_snapshot};
use log::{debug, error, info, warn};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

// The engine owns the store, the frequency cache and the undo tracker.
// Queries run on the caller's thread and never wait for ingestion.
pub struct AutocorrectEngine {
    config: EngineConfig,
    layout: &'static KeyboardLayout,
    lexicon: Arc<LexiconStore>,
    status: Arc<LoadStatus>,
    frequency_cache: RwLock<HashMap<String, u64>>,
    tracker: Mutex<CorrectionTracker>,
    loader: Mutex<Option<JoinHandle<Result<LoadReport>>>>,
}

impl AutocorrectEngine {
    /// Creates an engine, restoring the lexicon snapshot when one is
    /// configured and readable. A bad snapshot is logged and skipped.
    pub fn open(config: EngineConfig) -> Arc<Self> {
        let lexicon = match config.snapshot_path.as_deref() {
            Some(path) if path.exists() => match load_snapshot(path) {
                Ok(lexicon) => {
                    info!("Restored {} words from {}", lexicon.len(), path.display());
                    lexicon
                }
                Err(e) => {
                    warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
                    Lexicon::new()
                }
            },
            _ => Lexicon::new(),
        };
        Self::with_lexicon(config, lexicon)
    }

    /// Creates an engine around an already-built lexicon. The engine is
    /// ready immediately if the lexicon already holds `ready_threshold` words.
    pub fn with_lexicon(config: EngineConfig, lexicon: Lexicon) -> Arc<Self> {
        let status = LoadStatus::default();
        status.set_words(lexicon.len());
        if !lexicon.is_empty() && lexicon.len() >= config.loader.ready_threshold {
            status.mark_ready();
        }
        Arc::new(Self {
            config,
            layout: KeyboardLayout::standard(),
            lexicon: Arc::new(LexiconStore::from_lexicon(lexicon)),
            status: Arc::new(status),
            frequency_cache: RwLock::new(HashMap::new()),
            tracker: Mutex::new(CorrectionTracker::new()),
            loader: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Starts ingesting `source` on a background thread. Only one load may
    /// run per engine. An engine that is already ready skips ingestion.
    pub fn start_loading(&self, source: WordSource) -> Result<()> {
        let mut loader = self.loader.lock();
        if loader.is_some() {
            return Err(AutocorrectError::AlreadyLoading);
        }
        if self.status.is_ready() {
            info!("Lexicon already holds {} words, skipping load", self.status.loaded_words());
            return Ok(());
        }
        self.status.clear_failure();

        let store = Arc::clone(&self.lexicon);
        let status = Arc::clone(&self.status);
        let config = self.config.loader.clone();
        let handle = thread::Builder::new()
            .name("lexicon-loader".to_string())
            .spawn(move || {
                let result = WordLoader::new(&config).load(&store, &source, &status);
                if let Err(e) = &result {
                    error!("Failed to load lexicon: {}", e);
                    status.mark_failed(e.to_string());
                }
                result
            })?;
        *loader = Some(handle);
        Ok(())
    }

    /// Blocks until the background load finishes and returns its report.
    pub fn wait_until_loaded(&self) -> Result<LoadReport> {
        let handle = self.loader.lock().take();
        match handle {
            Some(handle) => handle
                .join()
                .map_err(|_| AutocorrectError::store_unavailable("lexicon loader panicked"))?,
            None if self.status.is_ready() => Ok(LoadReport { short_circuited: true, ..Default::default() }),
            None => Err(AutocorrectError::store_unavailable("no lexicon load was started")),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status.is_ready()
    }

    pub fn loaded_words_count(&self) -> usize {
        self.status.loaded_words()
    }

    /// Why the last load failed, if it did.
    pub fn load_failure(&self) -> Option<String> {
        self.status.failure()
    }

    /// Up to `max_suggestions` completions for `prefix`, most frequent first.
    pub fn suggest_prefix(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.trim();
        if prefix.chars().count() < 2 || !self.is_ready() {
            return vec![];
        }
        self.lexicon.read().prefix_search(prefix, self.config.policy.max_suggestions)
    }

    /// Exact, case-insensitive membership. Frequencies are cached only once
    /// the engine is ready.
    pub fn is_known(&self, word: &str) -> bool {
        let key = word.trim().to_lowercase();
        if !self.is_ready() {
            return self.lexicon.read().contains(&key);
        }
        if self.frequency_cache.read().contains_key(&key) {
            return true;
        }
        let lexicon = self.lexicon.read();
        self.cached_frequency(&*lexicon, &key).is_some()
    }

    /// Corrects a just-typed word. Returns `None` when the word is too short,
    /// the lexicon is not ready, the word is already known, or nothing close
    /// enough exists. An applied correction is recorded for undo.
    pub fn correct(&self, word: &str, cursor_position: i64) -> Option<String> {
        let key = self.correctable_key(word)?;
        let lexicon = self.lexicon.read();
        if self.cached_frequency(&*lexicon, &key).is_some() {
            return None;
        }
        let candidates = CandidateGenerator::new(self.layout).generate(&*lexicon, &key);
        self.apply_best(&*lexicon, word, &key, candidates, cursor_position)
    }

    /// Like [`correct`](Self::correct), but only substitutes the keys each
    /// character's touch zone points at.
    pub fn correct_with_touch_zones(&self, word: &str, zones: &[TouchZone], cursor_position: i64) -> Option<String> {
        let key = self.correctable_key(word)?;
        let lexicon = self.lexicon.read();
        if self.cached_frequency(&*lexicon, &key).is_some() {
            return None;
        }
        let candidates = CandidateGenerator::new(self.layout).generate_directional(&*lexicon, &key, zones);
        self.apply_best(&*lexicon, word, &key, candidates, cursor_position)
    }

    /// Record for `corrected`, or the most recent correction when `None`.
    pub fn last_correction(&self, corrected: Option<&str>) -> Option<CorrectionRecord> {
        self.tracker.lock().lookup(corrected).cloned()
    }

    pub fn clear_correction(&self, corrected: &str) {
        self.tracker.lock().clear(corrected);
    }

    /// Records a correction the host applied itself.
    pub fn record_correction(&self, original: &str, corrected: &str, position: i64) {
        self.tracker.lock().record(original, corrected, position);
    }

    /// Writes the lexicon snapshot, if a path is configured.
    pub fn save_snapshot(&self) -> Result<()> {
        if let Some(path) = &self.config.snapshot_path {
            let saved = save_snapshot(&self.lexicon, path)?;
            info!("Saved {} words to {}", saved, path.display());
        }
        Ok(())
    }

    /// Waits for a running load, then persists the lexicon when ready.
    pub fn close(&self) -> Result<()> {
        if self.loader.lock().is_some() {
            if let Err(e) = self.wait_until_loaded() {
                warn!("Lexicon load ended with error: {}", e);
            }
        }
        if self.is_ready() {
            self.save_snapshot()?;
        }
        Ok(())
    }

    fn correctable_key(&self, word: &str) -> Option<String> {
        if word.chars().count() < self.config.policy.min_word_length.max(2) || !self.is_ready() {
            return None;
        }
        Some(word.to_lowercase())
    }

    fn cached_frequency<L: WordLookup + ?Sized>(&self, lexicon: &L, key: &str) -> Option<u64> {
        if let Some(&freq) = self.frequency_cache.read().get(key) {
            return Some(freq);
        }
        let freq = lexicon.frequency(key)?;
        self.frequency_cache.write().insert(key.to_string(), freq);
        Some(freq)
    }

    fn apply_best<L: WordLookup + ?Sized>(
        &self,
        lexicon: &L,
        word: &str,
        key: &str,
        candidates: CandidateSet,
        cursor_position: i64,
    ) -> Option<String> {
        if candidates.exact_match {
            return None;
        }
        let use_frequency = self.config.policy.use_frequency;
        let scored = candidates.words.into_iter().map(|candidate| {
            let freq = if use_frequency { self.cached_frequency(lexicon, &candidate) } else { None };
            (candidate, freq)
        });
        let best = Ranker::new(self.layout, use_frequency).best(key, scored)?;

        let corrected = restore_case(word, &best.word);
        let position = if cursor_position < 0 {
            -1
        } else {
            cursor_position - word.chars().count() as i64
        };
        debug!("Corrected '{}' -> '{}' (distance {})", word, corrected, best.edit_distance);
        self.tracker.lock().record(word, &corrected, position);
        Some(corrected)
    }
}
