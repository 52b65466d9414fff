use async_trait::async_trait;
use serde::Serialize;
use zns_domain::DomainError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifierStats {
    pub exact_entries: usize,
    pub suffix_entries: usize,
}

#[async_trait]
pub trait DomainClassifier: Send + Sync {
    /// `fqdn` is expected lowercase without the trailing dot.
    fn is_local_domain(&self, fqdn: &str) -> bool;

    /// Rebuilds the lookup tables from their sources and swaps them in.
    async fn reload(&self) -> Result<ClassifierStats, DomainError>;

    fn stats(&self) -> ClassifierStats;
}
