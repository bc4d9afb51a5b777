// File: src/core/tracker.rs
use crate::core::types::CorrectionRecord;
use std::collections::HashMap;

/// Undo bookkeeping for applied corrections.
///
/// Records are keyed by the lowercased corrected word. The most recent
/// record is also kept on its own for callers that track no position.
///
/// This type does no locking. It is meant to be driven from the host's
/// single UI thread around each correct/undo cycle; the engine wraps it in a
/// mutex only so the engine itself can be shared with the loader thread.
#[derive(Debug, Clone, Default)]
pub struct CorrectionTracker {
    by_corrected: HashMap<String, CorrectionRecord>,
    most_recent: Option<CorrectionRecord>,
}

impl CorrectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record, replacing any earlier one for the same corrected word.
    pub fn record(&mut self, original: &str, corrected: &str, position: i64) -> &CorrectionRecord {
        let record = CorrectionRecord {
            original_word: original.to_string(),
            corrected_word: corrected.to_string(),
            text_position: position,
        };
        self.most_recent = Some(record.clone());
        let key = corrected.to_lowercase();
        self.by_corrected.insert(key.clone(), record);
        &self.by_corrected[&key]
    }

    /// Record for `corrected`, or the most recent record when `None`.
    pub fn lookup(&self, corrected: Option<&str>) -> Option<&CorrectionRecord> {
        match corrected {
            Some(word) => self.by_corrected.get(&word.to_lowercase()),
            None => self.most_recent.as_ref(),
        }
    }

    /// Forgets the record for `corrected`, including the most recent one if
    /// it refers to the same word.
    pub fn clear(&mut self, corrected: &str) {
        let key = corrected.to_lowercase();
        self.by_corrected.remove(&key);
        if self
            .most_recent
            .as_ref()
            .map_or(false, |r| r.corrected_word.to_lowercase() == key)
        {
            self.most_recent = None;
        }
    }

    pub fn len(&self) -> usize {
        self.by_corrected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_corrected.is_empty()
    }
}
