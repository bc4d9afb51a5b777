pub mod engine;
pub mod keyboard;
pub mod lexicon;
pub mod tracker;
pub mod trie;
pub mod types;
