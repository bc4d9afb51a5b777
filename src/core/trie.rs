// --- File: src/core/trie.rs
use crate::core::types::{WordEntry, WordId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Clone, Debug)]
struct TrieNode {
    children: HashMap<char, usize>,
    word_id: Option<WordId>,
    /// Upper bound of every frequency stored at or below this node.
    max_freq_in_subtree: u64,
}

impl TrieNode {
    fn new() -> Self {
        Self { children: HashMap::new(), word_id: None, max_freq_in_subtree: 0 }
    }
}

/// Character trie over the lexicon, used for top-k prefix completion and
/// single-wildcard pattern matching. Word data lives in the lexicon's entry
/// table; the trie only stores ids into it.
#[derive(Clone, Debug)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}

/// (frequency, reversed word, id): greater means a better suggestion.
type Ranked<'a> = (u64, Reverse<&'a str>, WordId);

impl PrefixTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new()] }
    }

    /// Inserts `key`, or refreshes the frequency bound along its path.
    /// O(k) complexity where k is key length.
    pub fn insert(&mut self, key: &str, word_id: WordId, frequency: u64) {
        let mut node_idx = 0;
        let mut path = vec![0];
        for ch in key.chars() {
            let next_idx = if let Some(&id) = self.nodes[node_idx].children.get(&ch) {
                id
            } else {
                let new_node_id = self.nodes.len();
                self.nodes.push(TrieNode::new());
                self.nodes[node_idx].children.insert(ch, new_node_id);
                new_node_id
            };
            node_idx = next_idx;
            path.push(node_idx);
        }
        self.nodes[node_idx].word_id = Some(word_id);

        // Bounds only grow, so stop at the first ancestor that already covers it.
        for &idx in path.iter().rev() {
            if self.nodes[idx].max_freq_in_subtree >= frequency {
                break;
            }
            self.nodes[idx].max_freq_in_subtree = frequency;
        }
    }

    fn find_node(&self, prefix: &str) -> Option<usize> {
        let mut node_idx = 0;
        for ch in prefix.chars() {
            node_idx = *self.nodes[node_idx].children.get(&ch)?;
        }
        Some(node_idx)
    }

    /// Top `k` words under `prefix`, by descending frequency then
    /// lexicographically. Subtrees whose bound cannot beat the current
    /// k-th result are pruned.
    pub fn top_k(&self, prefix: &str, k: usize, entries: &[WordEntry]) -> Vec<WordId> {
        if k == 0 {
            return vec![];
        }
        let Some(node_idx) = self.find_node(prefix) else {
            return vec![];
        };

        let mut heap: BinaryHeap<Reverse<Ranked<'_>>> = BinaryHeap::with_capacity(k + 1);
        self.dfs_search(node_idx, k, entries, &mut heap);

        // Reverse wrapper sorts ascending, which is best-first for `Ranked`.
        heap.into_sorted_vec().into_iter().map(|Reverse((_, _, id))| id).collect()
    }

    fn dfs_search<'a>(
        &self,
        node_idx: usize,
        k: usize,
        entries: &'a [WordEntry],
        heap: &mut BinaryHeap<Reverse<Ranked<'a>>>,
    ) {
        let node = &self.nodes[node_idx];
        if let Some(id) = node.word_id {
            let entry = &entries[id];
            let ranked = (entry.frequency, Reverse(entry.word.as_str()), id);
            if heap.len() < k {
                heap.push(Reverse(ranked));
            } else if heap.peek().map_or(false, |Reverse(worst)| ranked > *worst) {
                heap.pop();
                heap.push(Reverse(ranked));
            }
        }

        // Equal frequencies can still win on the lexicographic tie-break.
        let min_freq_in_heap = match heap.peek() {
            Some(Reverse((freq, _, _))) if heap.len() == k => *freq,
            _ => 0,
        };

        for &child_idx in node.children.values() {
            if self.nodes[child_idx].max_freq_in_subtree >= min_freq_in_heap {
                self.dfs_search(child_idx, k, entries, heap);
            }
        }
    }

    /// Ids of all words equal to `pattern` at every position except
    /// `wildcard_at`, where any single character matches.
    pub fn pattern_matches(&self, pattern: &[char], wildcard_at: usize) -> Vec<WordId> {
        let mut found = Vec::new();
        if wildcard_at >= pattern.len() {
            return found;
        }

        let mut node_idx = 0;
        for ch in &pattern[..wildcard_at] {
            match self.nodes[node_idx].children.get(ch) {
                Some(&next) => node_idx = next,
                None => return found,
            }
        }

        let suffix = &pattern[wildcard_at + 1..];
        'branches: for &branch in self.nodes[node_idx].children.values() {
            let mut idx = branch;
            for ch in suffix {
                match self.nodes[idx].children.get(ch) {
                    Some(&next) => idx = next,
                    None => continue 'branches,
                }
            }
            if let Some(id) = self.nodes[idx].word_id {
                found.push(id);
            }
        }
        found
    }
}
