pub mod classifier;
pub mod doh;
pub mod quota;

pub use classifier::ReloadClassifierUseCase;
pub use doh::{DohAnswer, HandleDohQueryUseCase};
pub use quota::{CreditQuotaUseCase, GetQuotaUseCase};
