mod domain_classifier;
mod query_normalizer;
mod quota_ledger;
mod upstream_forwarder;

pub use domain_classifier::{ClassifierStats, DomainClassifier};
pub use query_normalizer::{NormalizedQuery, QueryNormalizer};
pub use quota_ledger::{QuotaAccounts, QuotaLedger};
pub use upstream_forwarder::UpstreamForwarder;
