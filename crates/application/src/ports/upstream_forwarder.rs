use async_trait::async_trait;
use bytes::Bytes;
use zns_domain::DomainError;

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Sends one DoH POST to `upstream` and returns the full response body.
    async fn forward(&self, upstream: &str, query: &[u8]) -> Result<Bytes, DomainError>;
}
