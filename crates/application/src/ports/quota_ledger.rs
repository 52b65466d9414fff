use async_trait::async_trait;
use zns_domain::{DomainError, QuotaView};

/// Per-token byte budget consulted on every DoH query.
#[async_trait]
pub trait QuotaLedger: Send + Sync {
    /// Returns the current balance, or `Unauthorized` when the token is unknown
    /// or holds less than `minimum_units`.
    async fn authorize(&self, token: &str, minimum_units: i64) -> Result<QuotaView, DomainError>;

    /// Decrements the balance by `bytes`. Concurrent charges for one token must not lose updates.
    async fn charge(&self, token: &str, bytes: u64) -> Result<(), DomainError>;
}

/// Account management on top of the ledger: lookups and top-ups.
#[async_trait]
pub trait QuotaAccounts: Send + Sync {
    async fn balance(&self, token: &str) -> Result<Option<QuotaView>, DomainError>;

    /// Adds `bytes` to the token's balance, creating the account if needed.
    async fn credit(&self, token: &str, bytes: u64) -> Result<QuotaView, DomainError>;
}
