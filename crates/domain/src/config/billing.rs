use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingMode {
    /// Every token is accepted and nothing is charged.
    #[default]
    Free,
    /// Balances live in the SQLite quota table.
    Metered,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub mode: BillingMode,

    /// Minimum balance a token needs before a query is forwarded.
    #[serde(default = "default_minimum_units")]
    pub minimum_units: i64,

    #[serde(default = "default_ledger_timeout_ms")]
    pub ledger_timeout_ms: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            mode: BillingMode::default(),
            minimum_units: default_minimum_units(),
            ledger_timeout_ms: default_ledger_timeout_ms(),
        }
    }
}

fn default_minimum_units() -> i64 {
    1
}

fn default_ledger_timeout_ms() -> u64 {
    1000
}
