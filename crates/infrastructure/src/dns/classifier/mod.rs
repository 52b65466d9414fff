mod domain_set;
mod reloadable;
mod suffix_trie;

pub use domain_set::DomainSet;
pub use reloadable::ReloadableClassifier;
pub use suffix_trie::SuffixTrie;
