use std::sync::Arc;
use zns_application::use_cases::{
    CreditQuotaUseCase, GetQuotaUseCase, HandleDohQueryUseCase, ReloadClassifierUseCase,
};

#[derive(Clone)]
pub struct AppState {
    pub doh: Arc<HandleDohQueryUseCase>,
    pub get_quota: Arc<GetQuotaUseCase>,
    pub credit_quota: Arc<CreditQuotaUseCase>,
    pub reload_classifier: Arc<ReloadClassifierUseCase>,
    /// Admin routes are refused with 403 when unset.
    pub api_key: Option<Arc<str>>,
}
