// File: src/fuzzy/candidates.rs
use crate::core::keyboard::KeyboardLayout;
use crate::core::lexicon::{WordLookup, WILDCARD};
use crate::core::types::TouchZone;
use log::debug;
use std::collections::HashSet;

/// Deletions are only tried on words longer than this.
const DELETION_MIN_CHARS: usize = 4;
/// Insertions are only tried on words shorter than this.
const INSERTION_MAX_CHARS: usize = 8;

/// Dictionary words reachable from a typed word by a few edits.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    /// Never contains the typed word itself.
    pub words: HashSet<String>,
    /// The typed word is itself in the lexicon.
    pub exact_match: bool,
}

impl CandidateSet {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Generates correction candidates by probing the lexicon with edits seeded
/// through keyboard adjacency, so a typical fat-finger typo costs a small,
/// fixed number of lookups instead of a sweep over the lexicon.
pub struct CandidateGenerator<'a> {
    layout: &'a KeyboardLayout,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(layout: &'a KeyboardLayout) -> Self {
        Self { layout }
    }

    /// Unions every strategy: neighbour substitution (two levels),
    /// deletion, insertion, adjacent transposition and the exact pass.
    /// `word` must already be lowercase.
    pub fn generate<L: WordLookup + ?Sized>(&self, lexicon: &L, word: &str) -> CandidateSet {
        let chars: Vec<char> = word.chars().collect();
        let mut set = CandidateSet { exact_match: lexicon.contains(word), ..Default::default() };

        self.neighbor_substitutions(lexicon, &chars, &mut set.words);
        if chars.len() > DELETION_MIN_CHARS {
            deletions(lexicon, &chars, &mut set.words);
        }
        if chars.len() < INSERTION_MAX_CHARS {
            insertions(lexicon, &chars, &mut set.words);
        }
        transpositions(lexicon, &chars, &mut set.words);

        set.words.remove(word);
        debug!("{} candidates for '{}'", set.words.len(), word);
        set
    }

    /// Substitutes only the keys the touch zones point at. Missing zones
    /// count as [`TouchZone::Center`]. Each variant is checked directly,
    /// without further edits.
    pub fn generate_directional<L: WordLookup + ?Sized>(
        &self,
        lexicon: &L,
        word: &str,
        zones: &[TouchZone],
    ) -> CandidateSet {
        let chars: Vec<char> = word.chars().collect();
        let mut set = CandidateSet { exact_match: lexicon.contains(word), ..Default::default() };

        for (i, &typed) in chars.iter().enumerate() {
            let zone = zones.get(i).copied().unwrap_or(TouchZone::Center);
            for &intended in self.layout.directional(typed, zone) {
                let variant = substitute(&chars, i, intended);
                if lexicon.contains(&variant) {
                    set.words.insert(variant);
                }
            }
        }

        set.words.remove(word);
        debug!("{} directional candidates for '{}'", set.words.len(), word);
        set
    }

    /// One substitution per neighbouring key, then a second level applied to
    /// those variants only. Every variant of either level is checked.
    fn neighbor_substitutions<L: WordLookup + ?Sized>(
        &self,
        lexicon: &L,
        chars: &[char],
        found: &mut HashSet<String>,
    ) {
        let first_level = self.substitution_variants(chars);
        let mut checked = HashSet::with_capacity(first_level.len() * 4);

        for variant in &first_level {
            let variant_chars: Vec<char> = variant.chars().collect();
            for second in self.substitution_variants(&variant_chars) {
                if checked.insert(second.clone()) && lexicon.contains(&second) {
                    found.insert(second);
                }
            }
        }
        for variant in first_level {
            if !checked.contains(&variant) && lexicon.contains(&variant) {
                found.insert(variant);
            }
        }
    }

    fn substitution_variants(&self, chars: &[char]) -> Vec<String> {
        let mut variants = Vec::new();
        for (i, &typed) in chars.iter().enumerate() {
            if let Some(neighbors) = self.layout.neighbors(typed) {
                variants.extend(neighbors.iter().map(|&n| substitute(chars, i, n)));
            }
        }
        variants
    }
}

fn substitute(chars: &[char], at: usize, with: char) -> String {
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if i == at { with } else { c })
        .collect()
}

fn deletions<L: WordLookup + ?Sized>(lexicon: &L, chars: &[char], found: &mut HashSet<String>) {
    for skip in 0..chars.len() {
        let variant: String = chars
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != skip)
            .map(|(_, &c)| c)
            .collect();
        if lexicon.contains(&variant) {
            found.insert(variant);
        }
    }
}

/// One pattern query per gap, where the wildcard stands for any inserted
/// character of any alphabet the lexicon holds.
fn insertions<L: WordLookup + ?Sized>(lexicon: &L, chars: &[char], found: &mut HashSet<String>) {
    if chars.contains(&WILDCARD) {
        return;
    }
    for gap in 0..=chars.len() {
        let mut pattern = String::with_capacity(chars.len() * 2 + 1);
        pattern.extend(&chars[..gap]);
        pattern.push(WILDCARD);
        pattern.extend(&chars[gap..]);
        found.extend(lexicon.pattern_search(&pattern));
    }
}

fn transpositions<L: WordLookup + ?Sized>(lexicon: &L, chars: &[char], found: &mut HashSet<String>) {
    for i in 1..chars.len() {
        if chars[i - 1] == chars[i] {
            continue;
        }
        let mut swapped = chars.to_vec();
        swapped.swap(i - 1, i);
        let variant: String = swapped.into_iter().collect();
        if lexicon.contains(&variant) {
            found.insert(variant);
        }
    }
}
