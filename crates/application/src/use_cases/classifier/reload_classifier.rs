use std::sync::Arc;
use tracing::{info, instrument};
use zns_domain::DomainError;

use crate::ports::{ClassifierStats, DomainClassifier};

pub struct ReloadClassifierUseCase {
    classifier: Option<Arc<dyn DomainClassifier>>,
}

impl ReloadClassifierUseCase {
    /// `None` in single-upstream mode, where there is nothing to reload.
    pub fn new(classifier: Option<Arc<dyn DomainClassifier>>) -> Self {
        Self { classifier }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<ClassifierStats, DomainError> {
        let classifier = self.classifier.as_ref().ok_or_else(|| {
            DomainError::NotSupported("classifier reload requires split-horizon mode".to_string())
        })?;

        let stats = classifier.reload().await?;
        info!(
            exact = stats.exact_entries,
            suffixes = stats.suffix_entries,
            "Domain classifier reloaded"
        );
        Ok(stats)
    }
}
