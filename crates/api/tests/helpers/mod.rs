#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::connect_info::MockConnectInfo;
use axum::Router;
use bytes::Bytes;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsOption};
use hickory_proto::rr::{Name, RecordType};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zns_api::{create_api_routes, AppState};
use zns_application::ports::{QuotaAccounts, QuotaLedger, UpstreamForwarder};
use zns_application::services::UpstreamRouter;
use zns_application::use_cases::{
    CreditQuotaUseCase, GetQuotaUseCase, HandleDohQueryUseCase, ReloadClassifierUseCase,
};
use zns_domain::{DomainError, EcsConfig};
use zns_infrastructure::dns::EcsNormalizer;

pub const DEFAULT_UPSTREAM: &str = "https://default.example/dns-query";
pub const LOCAL_UPSTREAM: &str = "https://local.example/dns-query";
pub const API_KEY: &str = "test-admin-key";

pub struct RecordingForwarder {
    calls: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

impl RecordingForwarder {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamForwarder for RecordingForwarder {
    async fn forward(&self, upstream: &str, query: &[u8]) -> Result<Bytes, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((upstream.to_string(), query.to_vec()));
        if self.fail {
            return Err(DomainError::UpstreamError {
                upstream: upstream.to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(Bytes::from(answer_for(query)))
    }
}

pub fn build_query(name: &str) -> Vec<u8> {
    let mut message = Message::new(0xBEEF, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_ascii(name).unwrap(), RecordType::A));
    message.to_vec().unwrap()
}

/// Minimal response echoing the question of `query`.
pub fn answer_for(query: &[u8]) -> Vec<u8> {
    let request = Message::from_vec(query).unwrap();
    let mut response = Message::response(request.id(), OpCode::Query);
    for q in request.queries() {
        response.add_query(q.clone());
    }
    response.to_vec().unwrap()
}

pub fn forwarded_subnets(query: &[u8]) -> Vec<ClientSubnet> {
    let message = Message::from_vec(query).unwrap();
    message
        .extensions()
        .as_ref()
        .map(|edns| {
            edns.options()
                .as_ref()
                .iter()
                .filter_map(|(_, option)| match option {
                    EdnsOption::Subnet(subnet) => Some(*subnet),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn build_state<L>(
    ledger: Arc<L>,
    router: UpstreamRouter,
    forwarder: Arc<RecordingForwarder>,
    api_key: Option<&str>,
) -> AppState
where
    L: QuotaLedger + QuotaAccounts + 'static,
{
    let classifier = router.classifier().cloned();
    let doh = HandleDohQueryUseCase::new(
        ledger.clone(),
        Arc::new(EcsNormalizer::new(EcsConfig::default())),
        Arc::new(router),
        forwarder,
    )
    .with_ledger_timeout(Duration::from_secs(2));

    AppState {
        doh: Arc::new(doh),
        get_quota: Arc::new(GetQuotaUseCase::new(ledger.clone())),
        credit_quota: Arc::new(CreditQuotaUseCase::new(ledger)),
        reload_classifier: Arc::new(ReloadClassifierUseCase::new(classifier)),
        api_key: api_key.map(Arc::from),
    }
}

pub fn app(state: AppState, peer: SocketAddr) -> Router {
    create_api_routes(state).layer(MockConnectInfo(peer))
}

pub fn ipv4_peer() -> SocketAddr {
    "203.0.113.9:50000".parse().unwrap()
}

pub fn ipv6_peer() -> SocketAddr {
    "[2001:db8::7]:50000".parse().unwrap()
}
