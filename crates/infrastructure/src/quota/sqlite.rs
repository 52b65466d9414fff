use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, error, instrument};
use zns_application::ports::{QuotaAccounts, QuotaLedger};
use zns_domain::{DomainError, QuotaView};

pub struct SqliteQuotaLedger {
    pool: SqlitePool,
}

impl SqliteQuotaLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_remaining(&self, token: &str) -> Result<Option<i64>, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT remaining_bytes FROM quota WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read quota");
                DomainError::DatabaseError(e.to_string())
            })
    }
}

fn to_units(bytes: u64) -> Result<i64, DomainError> {
    i64::try_from(bytes).map_err(|_| DomainError::BadRequest(format!("{bytes} bytes out of range")))
}

#[async_trait]
impl QuotaLedger for SqliteQuotaLedger {
    #[instrument(skip(self))]
    async fn authorize(&self, token: &str, minimum_units: i64) -> Result<QuotaView, DomainError> {
        let remaining = self
            .fetch_remaining(token)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("unknown token".to_string()))?;

        if remaining <= 0 || remaining < minimum_units {
            debug!(remaining, minimum_units, "Quota below minimum");
            return Err(DomainError::Unauthorized("quota exhausted".to_string()));
        }

        Ok(QuotaView::new(remaining))
    }

    #[instrument(skip(self))]
    async fn charge(&self, token: &str, bytes: u64) -> Result<(), DomainError> {
        let units = to_units(bytes).map_err(|e| DomainError::ChargeFailed(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE quota
             SET remaining_bytes = remaining_bytes - ?, updated_at = CURRENT_TIMESTAMP
             WHERE token = ?",
        )
        .bind(units)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to charge quota");
            DomainError::ChargeFailed(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ChargeFailed("token no longer exists".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl QuotaAccounts for SqliteQuotaLedger {
    #[instrument(skip(self))]
    async fn balance(&self, token: &str) -> Result<Option<QuotaView>, DomainError> {
        Ok(self.fetch_remaining(token).await?.map(QuotaView::new))
    }

    #[instrument(skip(self))]
    async fn credit(&self, token: &str, bytes: u64) -> Result<QuotaView, DomainError> {
        let units = to_units(bytes)?;

        let remaining = sqlx::query_scalar::<_, i64>(
            "INSERT INTO quota (token, remaining_bytes) VALUES (?, ?)
             ON CONFLICT(token) DO UPDATE SET
                remaining_bytes = remaining_bytes + excluded.remaining_bytes,
                updated_at = CURRENT_TIMESTAMP
             RETURNING remaining_bytes",
        )
        .bind(token)
        .bind(units)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to credit quota");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(QuotaView::new(remaining))
    }
}
