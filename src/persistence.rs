// File: src/persistence.rs
use crate::core::lexicon::{ConflictPolicy, Lexicon, LexiconStore};
use crate::core::types::WordEntry;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk form of the lexicon. Only entries are stored; the indexes are
/// rebuilt on load.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct LexiconSnapshot {
    entries: Vec<WordEntry>,
}

/// Writes every committed entry of `store` to `path`, atomically.
pub fn save_snapshot(store: &LexiconStore, path: &Path) -> Result<usize> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let snapshot = LexiconSnapshot { entries: store.entries() };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &snapshot)?;
    writer.flush()?;
    drop(writer);

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(snapshot.entries.len())
}

/// Rebuilds a lexicon from a snapshot written by [`save_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<Lexicon> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: LexiconSnapshot = bincode::deserialize_from(reader)?;

    let mut lexicon = Lexicon::new();
    for entry in snapshot.entries {
        lexicon.insert_with(&entry.word, entry.frequency, ConflictPolicy::KeepFirst);
    }
    Ok(lexicon)
}
