use compact_str::CompactString;
use rustc_hash::FxHashSet;
use std::path::Path;
use tracing::info;
use zns_application::ports::ClassifierStats;
use zns_application::services::canonical_qname;
use zns_domain::DomainError;

use super::suffix_trie::SuffixTrie;

/// Exact FQDNs plus a suffix trie. Built once and then only read.
#[derive(Default)]
pub struct DomainSet {
    exact: FxHashSet<CompactString>,
    suffixes: SuffixTrie,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// One FQDN per line; blank lines and `#` comments are skipped. Entries are
    /// stored in the same canonical form the dispatcher looks names up with.
    /// Returns the number of lines read.
    pub fn load_exact_list(&mut self, text: &str) -> usize {
        let mut count = 0;
        for entry in text.lines().map(str::trim) {
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            self.exact.insert(CompactString::from(canonical_qname(entry)));
            count += 1;
        }
        count
    }

    /// One suffix per line; blank lines and `//` comments are skipped. Returns the number of lines read.
    pub fn load_suffix_list(&mut self, text: &str) -> usize {
        let mut count = 0;
        for entry in text.lines().map(str::trim) {
            if entry.is_empty() || entry.starts_with("//") {
                continue;
            }
            let suffix = entry.trim_matches('.').to_ascii_lowercase();
            if suffix.is_empty() {
                continue;
            }
            self.suffixes.insert(&suffix);
            count += 1;
        }
        count
    }

    pub fn is_local_domain(&self, fqdn: &str) -> bool {
        self.exact.contains(fqdn) || self.suffixes.matches(fqdn)
    }

    pub fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            exact_entries: self.exact.len(),
            suffix_entries: self.suffixes.len(),
        }
    }

    /// Reads whichever list files are configured.
    pub async fn from_files(
        exact_list: Option<&Path>,
        suffix_list: Option<&Path>,
    ) -> Result<Self, DomainError> {
        let mut set = Self::new();

        if let Some(path) = exact_list {
            let text = read_list(path).await?;
            let loaded = set.load_exact_list(&text);
            info!(path = %path.display(), entries = loaded, "Exact domain list loaded");
        }

        if let Some(path) = suffix_list {
            let text = read_list(path).await?;
            let loaded = set.load_suffix_list(&text);
            info!(path = %path.display(), entries = loaded, "Suffix list loaded");
        }

        Ok(set)
    }
}

async fn read_list(path: &Path) -> Result<String, DomainError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DomainError::IoError(format!("{}: {}", path.display(), e)))
}
