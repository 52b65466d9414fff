mod credit_quota;
mod get_quota;

pub use credit_quota::CreditQuotaUseCase;
pub use get_quota::GetQuotaUseCase;
