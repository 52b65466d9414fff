use std::sync::Arc;
use tracing::{info, instrument};
use zns_domain::{DomainError, QuotaView};

use crate::ports::QuotaAccounts;

pub struct CreditQuotaUseCase {
    accounts: Arc<dyn QuotaAccounts>,
}

impl CreditQuotaUseCase {
    pub fn new(accounts: Arc<dyn QuotaAccounts>) -> Self {
        Self { accounts }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, token: &str, bytes: u64) -> Result<QuotaView, DomainError> {
        if token.trim().is_empty() {
            return Err(DomainError::BadRequest("token cannot be empty".to_string()));
        }
        if bytes == 0 || bytes > i64::MAX as u64 {
            return Err(DomainError::BadRequest(format!(
                "credit must be between 1 and {}, got {bytes}",
                i64::MAX
            )));
        }

        let view = self.accounts.credit(token, bytes).await?;
        info!(bytes, remaining = view.remaining_bytes, "Quota credited");
        Ok(view)
    }
}
