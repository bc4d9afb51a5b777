// File: src/loader.rs
//! Bulk ingestion of a word list into the lexicon store.

use crate::config::{LoaderConfig, WordSourceFormat};
use crate::core::lexicon::{ConflictPolicy, LexiconStore};
use crate::core::types::WordEntry;
use crate::error::{AutocorrectError, Result};
use log::{debug, info};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Where the word list comes from.
#[derive(Debug, Clone)]
pub enum WordSource {
    Path(PathBuf),
    /// In-memory text, e.g. a bundled resource.
    Text(String),
}

impl WordSource {
    fn open(&self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            WordSource::Path(path) => {
                let file = File::open(path).map_err(|source| AutocorrectError::SourceUnavailable {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            WordSource::Text(text) => Ok(Box::new(Cursor::new(text.clone().into_bytes()))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub lines_read: usize,
    pub words_inserted: usize,
    pub lines_skipped: usize,
    /// The store already held enough words; nothing was read.
    pub short_circuited: bool,
    pub elapsed: Duration,
}

/// Load state shared between the loader thread and query callers.
#[derive(Debug, Default)]
pub struct LoadStatus {
    ready: AtomicBool,
    words: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl LoadStatus {
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn loaded_words(&self) -> usize {
        self.words.load(Ordering::Acquire)
    }

    pub fn failure(&self) -> Option<String> {
        self.failure.lock().clone()
    }

    pub(crate) fn set_words(&self, count: usize) {
        self.words.store(count, Ordering::Release);
    }

    pub(crate) fn mark_ready(&self) {
        self.clear_failure();
        self.ready.store(true, Ordering::Release);
    }

    pub(crate) fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    pub(crate) fn mark_failed(&self, reason: String) {
        *self.failure.lock() = Some(reason);
    }
}

/// Parses one source line. Returns `None` for blank or malformed lines.
pub fn parse_line(line: &str, format: &WordSourceFormat) -> Option<WordEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match format {
        WordSourceFormat::WordPerLine => WordEntry::new(line, 1),
        WordSourceFormat::Columns { word_column, frequency_column } => {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let word = columns.get(*word_column)?;
            let frequency = columns.get(*frequency_column)?.parse::<u64>().ok()?;
            WordEntry::new(word, frequency)
        }
    }
}

pub struct WordLoader<'a> {
    config: &'a LoaderConfig,
}

impl<'a> WordLoader<'a> {
    pub fn new(config: &'a LoaderConfig) -> Self {
        Self { config }
    }

    /// Streams `source` into `store` in batches, publishing progress to
    /// `status` after every commit. Malformed lines are skipped and counted.
    /// Fails only when the source cannot be opened or read.
    pub fn load(&self, store: &LexiconStore, source: &WordSource, status: &LoadStatus) -> Result<LoadReport> {
        let started = Instant::now();

        let existing = store.len();
        if existing >= self.config.ready_threshold {
            info!("Lexicon already loaded: {} words", existing);
            status.set_words(existing);
            status.mark_ready();
            return Ok(LoadReport { short_circuited: true, elapsed: started.elapsed(), ..Default::default() });
        }

        let mut reader = source.open()?;
        info!("Loading lexicon from {:?}", source_name(source));

        let policy = match self.config.format {
            WordSourceFormat::WordPerLine => ConflictPolicy::KeepFirst,
            WordSourceFormat::Columns { .. } => ConflictPolicy::Overwrite,
        };
        let batch_size = self.config.batch_size.max(1);
        let mut report = LoadReport::default();
        let mut batch = Vec::with_capacity(batch_size);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            report.lines_read += 1;

            let entry = std::str::from_utf8(&buf)
                .ok()
                .map(|line| line.trim_start_matches('\u{feff}'))
                .and_then(|line| parse_line(line, &self.config.format));
            match entry {
                Some(entry) => batch.push(entry),
                None => report.lines_skipped += 1,
            }

            if batch.len() >= batch_size {
                report.words_inserted += store.insert_batch(std::mem::take(&mut batch), policy);
                status.set_words(store.len());
            }
            if self.config.progress_interval > 0 && report.lines_read % self.config.progress_interval == 0 {
                debug!(
                    "Loading... {} lines processed, {} words added",
                    report.lines_read, report.words_inserted
                );
            }
        }

        if !batch.is_empty() {
            report.words_inserted += store.insert_batch(batch, policy);
        }
        status.set_words(store.len());
        status.mark_ready();

        report.elapsed = started.elapsed();
        info!(
            "Loaded {} words in {}ms ({} lines skipped)",
            report.words_inserted,
            report.elapsed.as_millis(),
            report.lines_skipped
        );
        Ok(report)
    }
}

fn source_name(source: &WordSource) -> String {
    match source {
        WordSource::Path(path) => path.display().to_string(),
        WordSource::Text(_) => "<memory>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::WordLookup;

    fn columns() -> WordSourceFormat {
        WordSourceFormat::Columns { word_column: 1, frequency_column: 2 }
    }

    #[test]
    fn parses_word_per_line() {
        let entry = parse_line("  Привет \r", &WordSourceFormat::WordPerLine).unwrap();
        assert_eq!(entry.word, "привет");
        assert_eq!(entry.frequency, 1);
        assert!(parse_line("", &WordSourceFormat::WordPerLine).is_none());
        assert!(parse_line("из-за", &WordSourceFormat::WordPerLine).is_none());
        assert!(parse_line("two words", &WordSourceFormat::WordPerLine).is_none());
    }

    #[test]
    fn parses_columns() {
        let entry = parse_line("17\tпривет\t5321", &columns()).unwrap();
        assert_eq!(entry.word, "привет");
        assert_eq!(entry.frequency, 5321);
        assert!(parse_line("18 привет many", &columns()).is_none());
        assert!(parse_line("19 привет", &columns()).is_none());
    }

    #[test]
    fn loads_in_batches_and_counts_skips() {
        let config = LoaderConfig { batch_size: 2, ..Default::default() };
        let store = LexiconStore::new();
        let status = LoadStatus::default();
        let source = WordSource::Text("hello\nhelp\nx\nhell\nhello\nwell-known\n".to_string());

        let report = WordLoader::new(&config).load(&store, &source, &status).unwrap();
        assert_eq!(report.lines_read, 6);
        assert_eq!(report.words_inserted, 3);
        assert_eq!(report.lines_skipped, 2);
        assert!(status.is_ready());
        assert_eq!(status.loaded_words(), 3);
    }

    #[test]
    fn columns_overwrite_frequencies() {
        let config = LoaderConfig { format: columns(), ..Default::default() };
        let store = LexiconStore::new();
        let status = LoadStatus::default();
        let source = WordSource::Text("1 hello 10\n2 hello 40\n".to_string());

        WordLoader::new(&config).load(&store, &source, &status).unwrap();
        assert_eq!(store.read().frequency("hello"), Some(40));
    }

    #[test]
    fn full_store_short_circuits() {
        let config = LoaderConfig { ready_threshold: 1, ..Default::default() };
        let store = LexiconStore::new();
        store.insert("hello", 1, ConflictPolicy::KeepFirst);
        let status = LoadStatus::default();
        let source = WordSource::Path(PathBuf::from("/nonexistent/words.txt"));

        let report = WordLoader::new(&config).load(&store, &source, &status).unwrap();
        assert!(report.short_circuited);
        assert!(status.is_ready());
    }

    #[test]
    fn missing_source_fails_without_ready() {
        let config = LoaderConfig::default();
        let store = LexiconStore::new();
        let status = LoadStatus::default();
        let source = WordSource::Path(PathBuf::from("/nonexistent/words.txt"));

        let err = WordLoader::new(&config).load(&store, &source, &status).unwrap_err();
        assert!(matches!(err, AutocorrectError::SourceUnavailable { .. }));
        assert!(!status.is_ready());
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_utf8_lines_are_skipped() {
        let config = LoaderConfig::default();
        let store = LexiconStore::new();
        let status = LoadStatus::default();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, b"hello\n\xff\xfe\nworld\n").unwrap();

        let report = WordLoader::new(&config).load(&store, &WordSource::Path(path), &status).unwrap();
        assert_eq!(report.words_inserted, 2);
        assert_eq!(report.lines_skipped, 1);
    }
}
