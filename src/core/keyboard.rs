// File: src/core/keyboard.rs
use crate::core::types::TouchZone;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Physical neighbours on the ЙЦУКЕН layout. Listed one way; the layout
/// closes the relation so every pair is symmetric.
const CYRILLIC_ROWS: &[(char, &str)] = &[
    ('а', "пвыфячй"),
    ('б', "июьн"),
    ('в', "апсфя"),
    ('г', "ншк"),
    ('д', "ловжэ"),
    ('е', "нкуё"),
    ('ж', "эдо"),
    ('з', "щхш"),
    ('и', "тсмбй"),
    ('й', "циа"),
    ('к', "уегрп"),
    ('л', "доэ"),
    ('м', "ися"),
    ('н', "гкеи"),
    ('о', "рлдщш"),
    ('п', "арвгк"),
    ('р', "опанг"),
    ('с', "миавф"),
    ('т', "имьз"),
    ('у', "кен"),
    ('ф', "ыас"),
    ('х', "ъзщ"),
    ('ц', "уйщ"),
    ('ч', "сяа"),
    ('ш', "щго"),
    ('щ', "шчцз"),
    ('ъ', "хэ"),
    ('ы', "ваф"),
    ('ь', "бти"),
    ('э', "жлдъ"),
    ('ю', "би"),
    ('я', "ачмв"),
];

const LATIN_ROWS: &[(char, &str)] = &[
    ('q', "wa"),
    ('w', "qesa"),
    ('e', "wrds"),
    ('r', "etfd"),
    ('t', "rygf"),
    ('y', "tuhg"),
    ('u', "yijh"),
    ('i', "uokj"),
    ('o', "iplk"),
    ('p', "ol"),
    ('a', "qwsz"),
    ('s', "wedxza"),
    ('d', "erfcxs"),
    ('f', "rtgvcd"),
    ('g', "tyhbvf"),
    ('h', "yujnbg"),
    ('j', "uikmnh"),
    ('k', "iolmj"),
    ('l', "opk"),
    ('z', "asx"),
    ('x', "zsdc"),
    ('c', "xdfv"),
    ('v', "cfgb"),
    ('b', "vghn"),
    ('n', "bhjm"),
    ('m', "njk"),
];

/// Most likely intended key per touch zone, for the keys users confuse most.
/// Zones absent from a row have no directional substitute.
const CYRILLIC_DIRECTIONAL: &[(char, [(TouchZone, &str); 4])] = &[
    ('а', [(TouchZone::Top, "йч"), (TouchZone::Bottom, "я"), (TouchZone::Left, "ы"), (TouchZone::Right, "п")]),
    ('п', [(TouchZone::Top, "к"), (TouchZone::Bottom, "р"), (TouchZone::Left, "а"), (TouchZone::Right, "р")]),
    ('р', [(TouchZone::Top, "е"), (TouchZone::Bottom, "о"), (TouchZone::Left, "п"), (TouchZone::Right, "о")]),
    ('о', [(TouchZone::Top, "н"), (TouchZone::Bottom, "л"), (TouchZone::Left, "р"), (TouchZone::Right, "л")]),
    ('л', [(TouchZone::Top, "г"), (TouchZone::Bottom, "д"), (TouchZone::Left, "о"), (TouchZone::Right, "д")]),
    ('д', [(TouchZone::Top, "л"), (TouchZone::Bottom, "ж"), (TouchZone::Left, "л"), (TouchZone::Right, "ж")]),
    ('к', [(TouchZone::Top, "у"), (TouchZone::Bottom, "п"), (TouchZone::Left, "у"), (TouchZone::Right, "п")]),
    ('е', [(TouchZone::Top, "ё"), (TouchZone::Bottom, "р"), (TouchZone::Left, "к"), (TouchZone::Right, "н")]),
    ('н', [(TouchZone::Top, "г"), (TouchZone::Bottom, "о"), (TouchZone::Left, "е"), (TouchZone::Right, "г")]),
    ('и', [(TouchZone::Top, "й"), (TouchZone::Bottom, "т"), (TouchZone::Left, "с"), (TouchZone::Right, "т")]),
    ('т', [(TouchZone::Top, "и"), (TouchZone::Bottom, "ь"), (TouchZone::Left, "и"), (TouchZone::Right, "ь")]),
    ('с', [(TouchZone::Top, "ч"), (TouchZone::Bottom, "м"), (TouchZone::Left, "а"), (TouchZone::Right, "м")]),
    ('м', [(TouchZone::Top, "с"), (TouchZone::Bottom, "я"), (TouchZone::Left, "с"), (TouchZone::Right, "я")]),
    ('в', [(TouchZone::Top, "ц"), (TouchZone::Bottom, "а"), (TouchZone::Left, "ы"), (TouchZone::Right, "а")]),
];

lazy_static! {
    static ref STANDARD_LAYOUT: KeyboardLayout = KeyboardLayout::standard_layout();
}

/// Immutable key-adjacency model shared by every correction request.
#[derive(Debug, Clone, Default)]
pub struct KeyboardLayout {
    neighbors: HashMap<char, HashSet<char>>,
    directional: HashMap<char, HashMap<TouchZone, Vec<char>>>,
}

impl KeyboardLayout {
    /// The process-wide Russian + English layout.
    pub fn standard() -> &'static KeyboardLayout {
        &STANDARD_LAYOUT
    }

    fn standard_layout() -> Self {
        let mut layout = Self::default();
        // Each alphabet is closed on its own so no Latin key ever
        // neighbours a Cyrillic one.
        layout.add_rows(CYRILLIC_ROWS);
        layout.add_rows(LATIN_ROWS);
        for (key, zones) in CYRILLIC_DIRECTIONAL {
            for (zone, targets) in zones {
                layout.add_directional(*key, *zone, targets.chars());
            }
        }
        layout
    }

    /// Builds a layout from one-directional neighbour rows, closing each
    /// relation symmetrically.
    pub fn from_rows(rows: &[(char, &str)]) -> Self {
        let mut layout = Self::default();
        layout.add_rows(rows);
        layout
    }

    fn add_rows(&mut self, rows: &[(char, &str)]) {
        for &(key, row) in rows {
            for neighbor in row.chars().filter(|c| c.is_alphabetic() && *c != key) {
                self.neighbors.entry(key).or_default().insert(neighbor);
                self.neighbors.entry(neighbor).or_default().insert(key);
            }
        }
    }

    pub fn add_directional<I>(&mut self, key: char, zone: TouchZone, targets: I)
    where
        I: IntoIterator<Item = char>,
    {
        let slot = self.directional.entry(key).or_default().entry(zone).or_default();
        for target in targets {
            if !slot.contains(&target) {
                slot.push(target);
            }
        }
    }

    pub fn neighbors(&self, key: char) -> Option<&HashSet<char>> {
        self.neighbors.get(&key)
    }

    pub fn are_neighbors(&self, a: char, b: char) -> bool {
        self.neighbors.get(&a).map_or(false, |set| set.contains(&b))
    }

    /// Keys the user most likely meant when `key` registered from `zone`.
    pub fn directional(&self, key: char, zone: TouchZone) -> &[char] {
        self.directional
            .get(&key)
            .and_then(|zones| zones.get(&zone))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.neighbors.keys().copied()
    }
}
