use std::sync::Arc;
use tracing::instrument;
use zns_domain::{DomainError, QuotaView};

use crate::ports::QuotaAccounts;

pub struct GetQuotaUseCase {
    accounts: Arc<dyn QuotaAccounts>,
}

impl GetQuotaUseCase {
    pub fn new(accounts: Arc<dyn QuotaAccounts>) -> Self {
        Self { accounts }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, token: &str) -> Result<QuotaView, DomainError> {
        self.accounts
            .balance(token)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("unknown token".to_string()))
    }
}
