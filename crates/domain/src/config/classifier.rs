use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Exact FQDNs, one per line, `#` comments.
    #[serde(default)]
    pub exact_list: Option<String>,

    /// Domain suffixes, one per line, `//` comments.
    #[serde(default)]
    pub suffix_list: Option<String>,
}

impl ClassifierConfig {
    pub fn has_sources(&self) -> bool {
        self.exact_list.is_some() || self.suffix_list.is_some()
    }
}
