use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use zns_application::ports::{
    ClassifierStats, DomainClassifier, NormalizedQuery, QueryNormalizer, QuotaAccounts,
    QuotaLedger, UpstreamForwarder,
};
use zns_domain::{DomainError, QuotaView};

/// Appended by [`MockQueryNormalizer`] so tests can tell the normalized query apart.
pub const NORMALIZED_MARKER: [u8; 2] = [0xEC, 0x50];

#[derive(Clone, Default)]
pub struct MockQuotaLedger {
    balances: Arc<RwLock<HashMap<String, i64>>>,
    charges: Arc<RwLock<Vec<(String, u64)>>>,
    authorize_calls: Arc<AtomicUsize>,
    fail_charge: Arc<RwLock<bool>>,
    fail_authorize: Arc<RwLock<bool>>,
    authorize_delay: Arc<RwLock<Option<Duration>>>,
}

impl MockQuotaLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_balances(balances: Vec<(&str, i64)>) -> Self {
        let map = balances
            .into_iter()
            .map(|(t, b)| (t.to_string(), b))
            .collect();
        Self {
            balances: Arc::new(RwLock::new(map)),
            ..Self::default()
        }
    }

    pub async fn balance_of(&self, token: &str) -> Option<i64> {
        self.balances.read().await.get(token).copied()
    }

    pub async fn charges(&self) -> Vec<(String, u64)> {
        self.charges.read().await.clone()
    }

    pub fn authorize_calls(&self) -> usize {
        self.authorize_calls.load(Ordering::SeqCst)
    }

    pub async fn set_fail_charge(&self, fail: bool) {
        *self.fail_charge.write().await = fail;
    }

    pub async fn set_fail_authorize(&self, fail: bool) {
        *self.fail_authorize.write().await = fail;
    }

    pub async fn set_authorize_delay(&self, delay: Duration) {
        *self.authorize_delay.write().await = Some(delay);
    }
}

#[async_trait]
impl QuotaLedger for MockQuotaLedger {
    async fn authorize(&self, token: &str, minimum_units: i64) -> Result<QuotaView, DomainError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.authorize_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_authorize.read().await {
            return Err(DomainError::DatabaseError("mock ledger offline".to_string()));
        }

        match self.balances.read().await.get(token) {
            Some(&balance) if balance >= minimum_units => Ok(QuotaView::new(balance)),
            Some(_) => Err(DomainError::Unauthorized("quota exhausted".to_string())),
            None => Err(DomainError::Unauthorized("unknown token".to_string())),
        }
    }

    async fn charge(&self, token: &str, bytes: u64) -> Result<(), DomainError> {
        if *self.fail_charge.read().await {
            return Err(DomainError::ChargeFailed("mock charge failure".to_string()));
        }
        let mut balances = self.balances.write().await;
        let balance = balances
            .get_mut(token)
            .ok_or_else(|| DomainError::ChargeFailed(format!("unknown token {token}")))?;
        *balance -= bytes as i64;
        self.charges.write().await.push((token.to_string(), bytes));
        Ok(())
    }
}

#[async_trait]
impl QuotaAccounts for MockQuotaLedger {
    async fn balance(&self, token: &str) -> Result<Option<QuotaView>, DomainError> {
        Ok(self.balances.read().await.get(token).map(|b| QuotaView::new(*b)))
    }

    async fn credit(&self, token: &str, bytes: u64) -> Result<QuotaView, DomainError> {
        let mut balances = self.balances.write().await;
        let balance = balances.entry(token.to_string()).or_insert(0);
        *balance += bytes as i64;
        Ok(QuotaView::new(*balance))
    }
}

/// Passes the query through, appending [`NORMALIZED_MARKER`]. A leading 0xFF byte is malformed.
#[derive(Clone, Default)]
pub struct MockQueryNormalizer {
    question_name: Option<String>,
    seen_ipv6: Arc<std::sync::Mutex<Vec<bool>>>,
}

impl MockQueryNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(name: &str) -> Self {
        Self {
            question_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn seen_families(&self) -> Vec<bool> {
        self.seen_ipv6.lock().unwrap().clone()
    }
}

impl QueryNormalizer for MockQueryNormalizer {
    fn normalize(&self, wire: &[u8], client_is_ipv6: bool) -> Result<NormalizedQuery, DomainError> {
        self.seen_ipv6.lock().unwrap().push(client_is_ipv6);
        if wire.first() == Some(&0xFF) {
            return Err(DomainError::DecodeError("mock malformed message".to_string()));
        }
        let mut out = wire.to_vec();
        out.extend_from_slice(&NORMALIZED_MARKER);
        Ok(NormalizedQuery {
            wire: out,
            question_name: self.question_name.clone(),
        })
    }
}

#[derive(Clone)]
pub struct MockUpstreamForwarder {
    answer: Bytes,
    calls: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockUpstreamForwarder {
    pub fn new(answer: &[u8]) -> Self {
        Self {
            answer: Bytes::copy_from_slice(answer),
            calls: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn calls(&self) -> Vec<(String, Vec<u8>)> {
        self.calls.read().await.clone()
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(&self, upstream: &str, query: &[u8]) -> Result<Bytes, DomainError> {
        self.calls
            .write()
            .await
            .push((upstream.to_string(), query.to_vec()));
        if *self.should_fail.read().await {
            return Err(DomainError::UpstreamError {
                upstream: upstream.to_string(),
                reason: "mock upstream failure".to_string(),
            });
        }
        Ok(self.answer.clone())
    }
}

pub struct MockDomainClassifier {
    local: HashSet<String>,
    reloads: AtomicUsize,
}

impl MockDomainClassifier {
    pub fn with_local(domains: Vec<&str>) -> Self {
        Self {
            local: domains.into_iter().map(String::from).collect(),
            reloads: AtomicUsize::new(0),
        }
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainClassifier for MockDomainClassifier {
    fn is_local_domain(&self, fqdn: &str) -> bool {
        self.local.contains(fqdn)
    }

    async fn reload(&self) -> Result<ClassifierStats, DomainError> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(self.stats())
    }

    fn stats(&self) -> ClassifierStats {
        ClassifierStats {
            exact_entries: self.local.len(),
            suffix_entries: 0,
        }
    }
}
