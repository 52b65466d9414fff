use arc_swap::ArcSwap;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};
use zns_application::ports::{ClassifierStats, DomainClassifier};
use zns_domain::DomainError;

use super::domain_set::DomainSet;

/// File-backed [`DomainSet`] that can be rebuilt while queries keep reading the old one.
pub struct ReloadableClassifier {
    current: ArcSwap<DomainSet>,
    exact_list: Option<PathBuf>,
    suffix_list: Option<PathBuf>,
}

impl ReloadableClassifier {
    pub async fn load(
        exact_list: Option<PathBuf>,
        suffix_list: Option<PathBuf>,
    ) -> Result<Self, DomainError> {
        let set = DomainSet::from_files(exact_list.as_deref(), suffix_list.as_deref()).await?;
        Ok(Self {
            current: ArcSwap::from_pointee(set),
            exact_list,
            suffix_list,
        })
    }

    pub fn from_set(set: DomainSet) -> Self {
        Self {
            current: ArcSwap::from_pointee(set),
            exact_list: None,
            suffix_list: None,
        }
    }
}

#[async_trait]
impl DomainClassifier for ReloadableClassifier {
    fn is_local_domain(&self, fqdn: &str) -> bool {
        self.current.load().is_local_domain(fqdn)
    }

    #[instrument(skip(self))]
    async fn reload(&self) -> Result<ClassifierStats, DomainError> {
        let set =
            DomainSet::from_files(self.exact_list.as_deref(), self.suffix_list.as_deref()).await?;
        let stats = set.stats();
        self.current.store(Arc::new(set));
        info!(
            exact = stats.exact_entries,
            suffixes = stats.suffix_entries,
            "Domain set swapped"
        );
        Ok(stats)
    }

    fn stats(&self) -> ClassifierStats {
        self.current.load().stats()
    }
}
