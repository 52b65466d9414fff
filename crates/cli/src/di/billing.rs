use std::sync::Arc;
use tracing::info;
use zns_application::ports::{QuotaAccounts, QuotaLedger};
use zns_domain::{BillingMode, Config};
use zns_infrastructure::quota::{SqliteQuotaLedger, UnmeteredQuotaLedger};

use crate::bootstrap;

pub struct Billing {
    pub ledger: Arc<dyn QuotaLedger>,
    pub accounts: Arc<dyn QuotaAccounts>,
}

impl Billing {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        match config.billing.mode {
            BillingMode::Free => {
                info!("Billing disabled: every token is served");
                let ledger = Arc::new(UnmeteredQuotaLedger);
                Ok(Self {
                    ledger: ledger.clone(),
                    accounts: ledger,
                })
            }
            BillingMode::Metered => {
                let pool = bootstrap::init_database(&config.database).await?;
                let ledger = Arc::new(SqliteQuotaLedger::new(pool));
                info!(
                    minimum_units = config.billing.minimum_units,
                    "Metered billing enabled"
                );
                Ok(Self {
                    ledger: ledger.clone(),
                    accounts: ledger,
                })
            }
        }
    }
}
