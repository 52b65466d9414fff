use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use zns_domain::{DohPayload, DohRequest, DomainError, QuotaView};

use crate::ports::{QueryNormalizer, QuotaLedger, UpstreamForwarder};
use crate::services::{canonical_qname, UpstreamRouter};

#[derive(Debug, Clone)]
pub struct DohAnswer {
    pub wire: Bytes,
    pub upstream: Arc<str>,
    /// Bytes debited from the token: normalized query plus answer.
    pub charged_bytes: u64,
}

pub struct HandleDohQueryUseCase {
    ledger: Arc<dyn QuotaLedger>,
    normalizer: Arc<dyn QueryNormalizer>,
    router: Arc<UpstreamRouter>,
    forwarder: Arc<dyn UpstreamForwarder>,
    minimum_units: i64,
    ledger_timeout: Duration,
}

impl HandleDohQueryUseCase {
    pub fn new(
        ledger: Arc<dyn QuotaLedger>,
        normalizer: Arc<dyn QueryNormalizer>,
        router: Arc<UpstreamRouter>,
        forwarder: Arc<dyn UpstreamForwarder>,
    ) -> Self {
        Self {
            ledger,
            normalizer,
            router,
            forwarder,
            minimum_units: 1,
            ledger_timeout: Duration::from_secs(1),
        }
    }

    pub fn with_minimum_units(mut self, minimum_units: i64) -> Self {
        self.minimum_units = minimum_units.max(1);
        self
    }

    pub fn with_ledger_timeout(mut self, ledger_timeout: Duration) -> Self {
        self.ledger_timeout = ledger_timeout;
        self
    }

    pub fn router(&self) -> &UpstreamRouter {
        &self.router
    }

    #[instrument(skip(self, request), fields(client = %request.client_ip))]
    pub async fn execute(&self, request: DohRequest) -> Result<DohAnswer, DomainError> {
        if request.token.is_empty() {
            return Err(DomainError::Unauthorized("missing token".to_string()));
        }

        self.authorize(&request.token).await?;

        let client_is_ipv6 = request.client_is_ipv6();
        let wire = decode_payload(request.payload)?;
        let normalized = self.normalizer.normalize(&wire, client_is_ipv6)?;

        let qname = normalized.question_name.as_deref().map(canonical_qname);
        let upstream = Arc::clone(self.router.select(qname.as_deref()));

        let answer = self.forwarder.forward(&upstream, &normalized.wire).await?;

        let charged_bytes = (normalized.len() + answer.len()) as u64;
        self.charge(&request.token, charged_bytes).await;

        debug!(
            qname = qname.as_deref().unwrap_or(""),
            upstream = %upstream,
            bytes = charged_bytes,
            "DoH query answered"
        );

        Ok(DohAnswer {
            wire: answer,
            upstream,
            charged_bytes,
        })
    }

    async fn authorize(&self, token: &str) -> Result<QuotaView, DomainError> {
        let view = match timeout(
            self.ledger_timeout,
            self.ledger.authorize(token, self.minimum_units),
        )
        .await
        {
            Ok(Ok(view)) => view,
            Ok(Err(DomainError::Unauthorized(reason))) => {
                return Err(DomainError::Unauthorized(reason))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Quota ledger failed during authorize");
                return Err(DomainError::Unauthorized(
                    "quota ledger unavailable".to_string(),
                ));
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.ledger_timeout.as_millis() as u64,
                    "Quota ledger timed out during authorize"
                );
                return Err(DomainError::Unauthorized(
                    "quota ledger unavailable".to_string(),
                ));
            }
        };

        if view.is_exhausted() {
            return Err(DomainError::Unauthorized("quota exhausted".to_string()));
        }
        Ok(view)
    }

    /// Charging is advisory: the answer is already paid for by the upstream.
    async fn charge(&self, token: &str, bytes: u64) {
        match timeout(self.ledger_timeout, self.ledger.charge(token, bytes)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, bytes, "Failed to charge token"),
            Err(_) => warn!(error = %DomainError::LedgerTimeout, bytes, "Failed to charge token"),
        }
    }
}

fn decode_payload(payload: DohPayload) -> Result<Vec<u8>, DomainError> {
    let wire = match payload {
        DohPayload::Wire(body) => body,
        DohPayload::Encoded(encoded) => URL_SAFE_NO_PAD
            .decode(encoded.as_bytes())
            .map_err(|e| DomainError::BadRequest(format!("invalid base64url query: {e}")))?,
    };

    if wire.is_empty() {
        return Err(DomainError::BadRequest("empty DNS message".to_string()));
    }
    Ok(wire)
}
