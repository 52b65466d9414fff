pub mod classifier;
pub mod health;
pub mod quota;

pub use classifier::ClassifierReloadResponse;
pub use health::HealthResponse;
pub use quota::{CreditQuotaRequest, QuotaResponse};
