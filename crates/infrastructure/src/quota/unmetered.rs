use async_trait::async_trait;
use zns_application::ports::{QuotaAccounts, QuotaLedger};
use zns_domain::{DomainError, QuotaView};

/// Free mode: every token is accepted and nothing is recorded.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnmeteredQuotaLedger;

#[async_trait]
impl QuotaLedger for UnmeteredQuotaLedger {
    async fn authorize(&self, _token: &str, _minimum_units: i64) -> Result<QuotaView, DomainError> {
        Ok(QuotaView::unlimited())
    }

    async fn charge(&self, _token: &str, _bytes: u64) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl QuotaAccounts for UnmeteredQuotaLedger {
    async fn balance(&self, _token: &str) -> Result<Option<QuotaView>, DomainError> {
        Ok(Some(QuotaView::unlimited()))
    }

    async fn credit(&self, _token: &str, _bytes: u64) -> Result<QuotaView, DomainError> {
        Err(DomainError::NotSupported(
            "quota credits require metered billing".to_string(),
        ))
    }
}
