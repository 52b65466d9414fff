//! DNS-over-HTTPS upstream client (RFC 8484)
//!
//! Queries are sent as a single HTTP POST with `application/dns-message`
//! content type. The request body is the raw DNS wire format message, and the
//! response body is returned to the caller untouched.
//!
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```

use super::DNS_MESSAGE_CONTENT_TYPE;
use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tracing::debug;
use zns_application::ports::UpstreamForwarder;
use zns_domain::DomainError;

/// Pooled HTTP client shared by all upstreams. One attempt per query, no retry.
pub struct HttpsForwarder {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpsForwarder {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(concat!("zns/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| DomainError::StartupError(format!("HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl UpstreamForwarder for HttpsForwarder {
    async fn forward(&self, upstream: &str, query: &[u8]) -> Result<Bytes, DomainError> {
        debug!(upstream, message_len = query.len(), "Sending DoH query");

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(upstream)
                .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(query.to_vec())
                .send(),
        )
        .await
        .map_err(|_| DomainError::UpstreamTimeout {
            upstream: upstream.to_string(),
        })?
        .map_err(|e| DomainError::UpstreamError {
            upstream: upstream.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamError {
                upstream: upstream.to_string(),
                reason: format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let body = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                upstream: upstream.to_string(),
            })?
            .map_err(|e| DomainError::UpstreamError {
                upstream: upstream.to_string(),
                reason: format!("failed to read response: {e}"),
            })?;

        debug!(upstream, response_len = body.len(), "DoH response received");

        Ok(body)
    }
}
