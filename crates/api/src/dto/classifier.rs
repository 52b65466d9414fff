use serde::{Deserialize, Serialize};
use zns_application::ports::ClassifierStats;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierReloadResponse {
    pub exact_entries: usize,
    pub suffix_entries: usize,
}

impl From<ClassifierStats> for ClassifierReloadResponse {
    fn from(stats: ClassifierStats) -> Self {
        Self {
            exact_entries: stats.exact_entries,
            suffix_entries: stats.suffix_entries,
        }
    }
}
