use serde::{Deserialize, Serialize};
use zns_domain::QuotaView;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaResponse {
    pub token: String,
    pub remaining_bytes: i64,
}

impl QuotaResponse {
    pub fn from_view(token: String, view: QuotaView) -> Self {
        Self {
            token,
            remaining_bytes: view.remaining_bytes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditQuotaRequest {
    pub bytes: u64,
}
