// src/core/types.rs
use serde::{Deserialize, Serialize};

/// Index of an entry inside the lexicon's entry table.
pub type WordId = usize;

pub const MIN_WORD_CHARS: usize = 2;
pub const MAX_WORD_CHARS: usize = 20;

/// A single lexicon word with its popularity weight.
/// The word is always lowercase and 2..=20 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    /// 1 when the source carries no real frequency.
    pub frequency: u64,
}

impl WordEntry {
    /// Builds an entry if `raw` passes store validation.
    pub fn new(raw: &str, frequency: u64) -> Option<Self> {
        normalize_word(raw).map(|word| Self {
            word,
            frequency: frequency.max(1),
        })
    }
}

/// Lowercases `raw` and checks it against the lexicon's word rules:
/// 2..=20 characters, alphabetic only (no whitespace, hyphens or digits).
pub fn normalize_word(raw: &str) -> Option<String> {
    let word = raw.trim().to_lowercase();
    let len = word.chars().count();
    if !(MIN_WORD_CHARS..=MAX_WORD_CHARS).contains(&len) {
        return None;
    }
    if !word.chars().all(char::is_alphabetic) {
        return None;
    }
    Some(word)
}

/// Coarse region inside a key's touch area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchZone {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl TouchZone {
    pub const ALL: [TouchZone; 9] = [
        TouchZone::TopLeft,
        TouchZone::Top,
        TouchZone::TopRight,
        TouchZone::Left,
        TouchZone::Center,
        TouchZone::Right,
        TouchZone::BottomLeft,
        TouchZone::Bottom,
        TouchZone::BottomRight,
    ];

    /// Classifies a touch by its position relative to the key bounds,
    /// where (0, 0) is the key's top-left corner and (1, 1) its bottom-right.
    pub fn from_relative(x: f32, y: f32) -> Self {
        let top = y < 0.25;
        let bottom = y > 0.75;
        let left = x < 0.25;
        let right = x > 0.75;
        match (top, bottom, left, right) {
            (true, _, true, _) => TouchZone::TopLeft,
            (true, _, _, true) => TouchZone::TopRight,
            (true, _, _, _) => TouchZone::Top,
            (_, true, true, _) => TouchZone::BottomLeft,
            (_, true, _, true) => TouchZone::BottomRight,
            (_, true, _, _) => TouchZone::Bottom,
            (_, _, true, _) => TouchZone::Left,
            (_, _, _, true) => TouchZone::Right,
            _ => TouchZone::Center,
        }
    }

    /// Zone by declaration index (0 = top-left, 8 = bottom-right).
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// An applied correction, kept so the host can undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// The word as typed, original case.
    pub original_word: String,
    /// The case-adjusted replacement that was committed.
    pub corrected_word: String,
    /// Offset of the word's first character, or negative when unknown.
    pub text_position: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_out_of_bounds_and_non_alphabetic() {
        assert_eq!(normalize_word("  Привет "), Some("привет".to_string()));
        assert_eq!(normalize_word("a"), None);
        assert_eq!(normalize_word("abcdefghijklmnopqrstu"), None);
        assert_eq!(normalize_word("из-за"), None);
        assert_eq!(normalize_word("two words"), None);
        assert_eq!(normalize_word("r2d2"), None);
    }

    #[test]
    fn entry_frequency_is_at_least_one() {
        let entry = WordEntry::new("Hello", 0).unwrap();
        assert_eq!(entry.word, "hello");
        assert_eq!(entry.frequency, 1);
    }

    #[test]
    fn touch_zone_classification() {
        assert_eq!(TouchZone::from_relative(0.1, 0.1), TouchZone::TopLeft);
        assert_eq!(TouchZone::from_relative(0.5, 0.1), TouchZone::Top);
        assert_eq!(TouchZone::from_relative(0.9, 0.1), TouchZone::TopRight);
        assert_eq!(TouchZone::from_relative(0.1, 0.5), TouchZone::Left);
        assert_eq!(TouchZone::from_relative(0.5, 0.5), TouchZone::Center);
        assert_eq!(TouchZone::from_relative(0.9, 0.5), TouchZone::Right);
        assert_eq!(TouchZone::from_relative(0.1, 0.9), TouchZone::BottomLeft);
        assert_eq!(TouchZone::from_relative(0.5, 0.9), TouchZone::Bottom);
        assert_eq!(TouchZone::from_relative(0.9, 0.9), TouchZone::BottomRight);
    }

    #[test]
    fn touch_zone_index_round_trips_declaration_order() {
        assert_eq!(TouchZone::from_index(4), Some(TouchZone::Center));
        assert_eq!(TouchZone::from_index(8), Some(TouchZone::BottomRight));
        assert_eq!(TouchZone::from_index(9), None);
    }
}
