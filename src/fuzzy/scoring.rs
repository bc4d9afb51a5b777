// File: src/fuzzy/scoring.rs
//! Candidate scoring and the deterministic ranking used to pick a correction.

use crate::core::keyboard::KeyboardLayout;
use std::cmp::Ordering;

const NEIGHBOR_SUBSTITUTION_PENALTY: u32 = 1;
const DISTANT_SUBSTITUTION_PENALTY: u32 = 10;
const LENGTH_DIFFERENCE_PENALTY: u32 = 5;

/// Classic Levenshtein distance over characters, case-insensitive.
/// Insertion, deletion and substitution all cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Position-aligned keyboard proximity penalty. Each differing pair costs 1
/// when the keys are neighbours and 10 otherwise; the length difference
/// costs 5 per character.
pub fn keyboard_penalty(layout: &KeyboardLayout, input: &str, candidate: &str) -> u32 {
    let input: Vec<char> = input.to_lowercase().chars().collect();
    let candidate: Vec<char> = candidate.to_lowercase().chars().collect();

    let mut penalty: u32 = input
        .iter()
        .zip(candidate.iter())
        .filter(|(typed, wanted)| typed != wanted)
        .map(|(&typed, &wanted)| {
            if layout.are_neighbors(typed, wanted) {
                NEIGHBOR_SUBSTITUTION_PENALTY
            } else {
                DISTANT_SUBSTITUTION_PENALTY
            }
        })
        .sum();

    let length_difference = input.len().abs_diff(candidate.len()) as u32;
    penalty += LENGTH_DIFFERENCE_PENALTY * length_difference;
    penalty
}

/// Largest edit distance accepted for an input of `len` characters.
pub fn max_edit_distance(len: usize) -> usize {
    match len {
        0..=4 => 1,
        5..=6 => 2,
        _ => 3,
    }
}

/// Re-applies the typed word's capitalisation to a lowercase correction.
pub fn restore_case(original: &str, corrected: &str) -> String {
    let lower = corrected.to_lowercase();
    let mut typed = original.chars();
    let first_upper = typed.next().map_or(false, char::is_uppercase);
    if first_upper && typed.all(char::is_uppercase) {
        return corrected.to_uppercase();
    }
    if first_upper {
        let mut chars = lower.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => lower,
        };
    }
    lower
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub word: String,
    pub edit_distance: usize,
    pub keyboard_penalty: u32,
    pub same_first_letter: bool,
    /// Popularity weight; only consulted when ranking by frequency.
    pub frequency: Option<u64>,
}

impl ScoredCandidate {
    pub fn combined_score(&self) -> u32 {
        self.edit_distance as u32 * 10 + self.keyboard_penalty
    }
}

/// Scores candidates against a typed word and orders them best-first.
pub struct Ranker<'a> {
    layout: &'a KeyboardLayout,
    use_frequency: bool,
}

impl<'a> Ranker<'a> {
    pub fn new(layout: &'a KeyboardLayout, use_frequency: bool) -> Self {
        Self { layout, use_frequency }
    }

    pub fn score(&self, input: &str, candidate: &str, frequency: Option<u64>) -> ScoredCandidate {
        ScoredCandidate {
            word: candidate.to_string(),
            edit_distance: levenshtein(input, candidate),
            keyboard_penalty: keyboard_penalty(self.layout, input, candidate),
            same_first_letter: input.chars().next() == candidate.chars().next(),
            frequency,
        }
    }

    /// Scores every candidate, drops those past the length-dependent
    /// distance threshold, and sorts the rest best-first.
    ///
    /// Order: edit distance, then matching first letter, then frequency
    /// (frequency-aware policy only), then `distance * 10 + penalty`, and
    /// finally the word itself so the result never depends on set order.
    pub fn rank<I>(&self, input: &str, candidates: I) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = (String, Option<u64>)>,
    {
        let input = input.to_lowercase();
        let threshold = max_edit_distance(input.chars().count());
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .filter(|(word, _)| *word != input)
            .map(|(word, frequency)| self.score(&input, &word, frequency))
            .filter(|candidate| candidate.edit_distance <= threshold)
            .collect();
        scored.sort_by(|a, b| self.compare(a, b));
        scored
    }

    pub fn best<I>(&self, input: &str, candidates: I) -> Option<ScoredCandidate>
    where
        I: IntoIterator<Item = (String, Option<u64>)>,
    {
        self.rank(input, candidates).into_iter().next()
    }

    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        a.edit_distance
            .cmp(&b.edit_distance)
            .then_with(|| b.same_first_letter.cmp(&a.same_first_letter))
            .then_with(|| {
                if self.use_frequency {
                    b.frequency.cmp(&a.frequency)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.combined_score().cmp(&b.combined_score()))
            .then_with(|| a.word.cmp(&b.word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("превет", "привет"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("Hello", "hello"), 0);
    }

    #[test]
    fn levenshtein_is_symmetric_and_reflexive() {
        let words = ["helo", "hello", "help", "привет", "продам", "a", ""];
        for a in words {
            assert_eq!(levenshtein(a, a), 0);
            for b in words {
                assert_eq!(levenshtein(a, b), levenshtein(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn penalty_prefers_neighbouring_keys() {
        let layout = KeyboardLayout::standard();
        // r and e are neighbours, e and p are not.
        assert_eq!(keyboard_penalty(layout, "hrllo", "hello"), 1);
        assert_eq!(keyboard_penalty(layout, "hpllo", "hello"), 10);
        assert_eq!(keyboard_penalty(layout, "helo", "hello"), 1 + 5);
    }

    #[test]
    fn thresholds_follow_word_length() {
        assert_eq!(max_edit_distance(2), 1);
        assert_eq!(max_edit_distance(4), 1);
        assert_eq!(max_edit_distance(5), 2);
        assert_eq!(max_edit_distance(6), 2);
        assert_eq!(max_edit_distance(7), 3);
    }

    #[test]
    fn case_is_restored() {
        assert_eq!(restore_case("Превет", "привет"), "Привет");
        assert_eq!(restore_case("ПРЕВЕТ", "привет"), "ПРИВЕТ");
        assert_eq!(restore_case("превет", "привет"), "привет");
        assert_eq!(restore_case("hELo", "hello"), "hello");
    }

    #[test]
    fn ranking_is_distance_first() {
        let layout = KeyboardLayout::standard();
        let ranker = Ranker::new(layout, false);
        let best = ranker
            .best("превет", vec![("привет".to_string(), None), ("приказ".to_string(), None)])
            .unwrap();
        assert_eq!(best.word, "привет");
        assert_eq!(best.edit_distance, 1);
    }

    #[test]
    fn first_letter_beats_keyboard_penalty() {
        let layout = KeyboardLayout::standard();
        let ranker = Ranker::new(layout, false);
        // Both one substitution away; only "bat" keeps the first letter.
        let ranked = ranker.rank("bet", vec![("set".to_string(), None), ("bat".to_string(), None)]);
        assert_eq!(ranked[0].word, "bat");
    }

    #[test]
    fn frequency_breaks_ties_when_enabled() {
        let layout = KeyboardLayout::standard();
        let candidates = || vec![("cat".to_string(), Some(2)), ("cot".to_string(), Some(50))];

        let plain = Ranker::new(layout, false).best("cxt", candidates()).unwrap();
        assert_eq!(plain.word, "cat");

        let weighted = Ranker::new(layout, true).best("cxt", candidates()).unwrap();
        assert_eq!(weighted.word, "cot");
    }

    #[test]
    fn threshold_and_self_matches_are_dropped() {
        let layout = KeyboardLayout::standard();
        let ranker = Ranker::new(layout, false);
        let ranked = ranker.rank("helo", vec![("helo".to_string(), None), ("halls".to_string(), None)]);
        assert!(ranked.is_empty());
    }
}
