mod billing;
mod routing;

use std::sync::Arc;
use std::time::Duration;
use zns_api::AppState;
use zns_application::use_cases::{
    CreditQuotaUseCase, GetQuotaUseCase, HandleDohQueryUseCase, ReloadClassifierUseCase,
};
use zns_domain::Config;
use zns_infrastructure::dns::{EcsNormalizer, HttpsForwarder};

use billing::Billing;

pub async fn build_app_state(config: &Config) -> anyhow::Result<AppState> {
    let billing = Billing::new(config).await?;
    let router = Arc::new(routing::build_router(config).await?);
    let classifier = router.classifier().cloned();

    let forwarder = Arc::new(HttpsForwarder::new(Duration::from_millis(
        config.upstream.timeout_ms,
    ))?);
    let normalizer = Arc::new(EcsNormalizer::new(config.ecs.clone()));

    let doh = HandleDohQueryUseCase::new(billing.ledger, normalizer, router, forwarder)
        .with_minimum_units(config.billing.minimum_units)
        .with_ledger_timeout(Duration::from_millis(config.billing.ledger_timeout_ms));

    Ok(AppState {
        doh: Arc::new(doh),
        get_quota: Arc::new(GetQuotaUseCase::new(billing.accounts.clone())),
        credit_quota: Arc::new(CreditQuotaUseCase::new(billing.accounts)),
        reload_classifier: Arc::new(ReloadClassifierUseCase::new(classifier)),
        api_key: config.admin.api_key.as_deref().map(Arc::from),
    })
}
