use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use zns_application::ports::DomainClassifier;
use zns_application::services::UpstreamRouter;
use zns_domain::Config;
use zns_infrastructure::dns::ReloadableClassifier;

pub async fn build_router(config: &Config) -> anyhow::Result<UpstreamRouter> {
    let Some(local) = &config.upstream.local_url else {
        info!(upstream = %config.upstream.url, "Single upstream mode");
        return Ok(UpstreamRouter::single(config.upstream.url.as_str()));
    };

    let classifier = ReloadableClassifier::load(
        config.classifier.exact_list.as_ref().map(PathBuf::from),
        config.classifier.suffix_list.as_ref().map(PathBuf::from),
    )
    .await?;

    let stats = classifier.stats();
    info!(
        local = %local,
        default = %config.upstream.url,
        exact = stats.exact_entries,
        suffixes = stats.suffix_entries,
        "Split-horizon mode"
    );

    Ok(UpstreamRouter::split_horizon(
        local.as_str(),
        config.upstream.url.as_str(),
        Arc::new(classifier),
    ))
}
