// File: src/core/lexicon.rs
use crate::core::trie::PrefixTrie;
use crate::core::types::{WordEntry, WordId, MIN_WORD_CHARS};
use parking_lot::{RwLock, RwLockReadGuard};
use std::collections::{HashMap, HashSet};

/// Single-character placeholder accepted by [`WordLookup::pattern_search`].
pub const WILDCARD: char = '_';

/// What the correction engine needs from a word store.
pub trait WordLookup {
    /// Exact, case-insensitive membership.
    fn contains(&self, word: &str) -> bool;

    /// Up to `limit` words starting with `prefix`, most frequent first,
    /// ties broken lexicographically. Empty for prefixes under 2 characters.
    fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<String>;

    /// All words matching `pattern`, where exactly one character is
    /// [`WILDCARD`]. Any other number of wildcards matches nothing.
    fn pattern_search(&self, pattern: &str) -> HashSet<String>;

    fn frequency(&self, word: &str) -> Option<u64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// What to do when an inserted word is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the first-seen entry.
    KeepFirst,
    /// Replace the stored frequency.
    Overwrite,
}

/// In-memory lexicon: hash index for membership, trie for prefix and
/// pattern queries. Not synchronised; see [`LexiconStore`].
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<WordEntry>,
    index: HashMap<String, WordId>,
    trie: PrefixTrie,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts with first-seen-wins semantics. Returns true when a new word
    /// was stored.
    pub fn insert(&mut self, word: &str, frequency: u64) -> bool {
        self.insert_with(word, frequency, ConflictPolicy::KeepFirst)
    }

    /// Normalizes and stores `word`. Invalid words are a no-op.
    /// Returns true when a new word was stored.
    pub fn insert_with(&mut self, word: &str, frequency: u64, policy: ConflictPolicy) -> bool {
        match WordEntry::new(word, frequency) {
            Some(entry) => self.insert_entry(entry, policy),
            None => false,
        }
    }

    fn insert_entry(&mut self, entry: WordEntry, policy: ConflictPolicy) -> bool {
        if let Some(&id) = self.index.get(&entry.word) {
            if policy == ConflictPolicy::Overwrite && self.entries[id].frequency != entry.frequency {
                self.entries[id].frequency = entry.frequency;
                self.trie.insert(&entry.word, id, entry.frequency);
            }
            return false;
        }
        let id = self.entries.len();
        self.trie.insert(&entry.word, id, entry.frequency);
        self.index.insert(entry.word.clone(), id);
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    fn lookup_id(&self, word: &str) -> Option<WordId> {
        // Most queries arrive normalized already; skip the allocation then.
        match self.index.get(word) {
            Some(&id) => Some(id),
            None if word.chars().any(char::is_uppercase) => {
                self.index.get(&word.to_lowercase()).copied()
            }
            None => None,
        }
    }
}

impl WordLookup for Lexicon {
    fn contains(&self, word: &str) -> bool {
        self.lookup_id(word).is_some()
    }

    fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.chars().count() < MIN_WORD_CHARS {
            return vec![];
        }
        self.trie
            .top_k(&prefix, limit, &self.entries)
            .into_iter()
            .map(|id| self.entries[id].word.clone())
            .collect()
    }

    fn pattern_search(&self, pattern: &str) -> HashSet<String> {
        let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
        let mut wildcards = pattern.iter().enumerate().filter(|&(_, &c)| c == WILDCARD);
        let wildcard_at = match (wildcards.next(), wildcards.next()) {
            (Some((pos, _)), None) => pos,
            _ => return HashSet::new(),
        };
        self.trie
            .pattern_matches(&pattern, wildcard_at)
            .into_iter()
            .map(|id| self.entries[id].word.clone())
            .collect()
    }

    fn frequency(&self, word: &str) -> Option<u64> {
        self.lookup_id(word).map(|id| self.entries[id].frequency)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Thread-safe lexicon: one bulk writer, any number of readers.
///
/// Each batch is committed under a single write lock, so readers only
/// ever see whole batches and the word count grows monotonically.
#[derive(Debug, Default)]
pub struct LexiconStore {
    inner: RwLock<Lexicon>,
}

impl LexiconStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        Self { inner: RwLock::new(lexicon) }
    }

    /// Consistent read view for the duration of one query.
    pub fn read(&self) -> RwLockReadGuard<'_, Lexicon> {
        self.inner.read()
    }

    pub fn insert(&self, word: &str, frequency: u64, policy: ConflictPolicy) -> bool {
        self.inner.write().insert_with(word, frequency, policy)
    }

    /// Commits a whole batch atomically. Returns how many new words were added.
    pub fn insert_batch(&self, batch: Vec<WordEntry>, policy: ConflictPolicy) -> usize {
        let mut lexicon = self.inner.write();
        batch
            .into_iter()
            .map(|entry| lexicon.insert_entry(entry, policy))
            .filter(|&added| added)
            .count()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every committed entry, for snapshots.
    pub fn entries(&self) -> Vec<WordEntry> {
        self.inner.read().entries().to_vec()
    }
}
