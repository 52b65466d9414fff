mod sqlite;
mod unmetered;

pub use sqlite::SqliteQuotaLedger;
pub use unmetered::UnmeteredQuotaLedger;
