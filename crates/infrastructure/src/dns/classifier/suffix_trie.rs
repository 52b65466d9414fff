use compact_str::CompactString;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    is_suffix_end: bool,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: HashMap::with_hasher(FxBuildHasher),
            is_suffix_end: false,
        }
    }
}

/// Domain suffixes keyed label by label from the right, so `cn` covers
/// `cn`, `a.cn` and `x.y.cn` but never `cnx`.
#[derive(Default)]
pub struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, suffix: &str) {
        let mut node = &mut self.root;
        for label in suffix.split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        if !node.is_suffix_end {
            node.is_suffix_end = true;
            self.len += 1;
        }
    }

    /// Stops at the first suffix end on the way down.
    #[inline]
    pub fn matches(&self, domain: &str) -> bool {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();
        let mut node = &self.root;

        for label in labels {
            match node.children.get(label) {
                Some(child) if child.is_suffix_end => return true,
                Some(child) => node = child,
                None => return false,
            }
        }

        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
