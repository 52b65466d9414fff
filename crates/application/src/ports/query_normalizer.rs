use zns_domain::DomainError;

#[derive(Debug, Clone)]
pub struct NormalizedQuery {
    /// Re-encoded message carrying exactly one Client-Subnet option.
    pub wire: Vec<u8>,
    /// Name of the first question, as written on the wire.
    pub question_name: Option<String>,
}

impl NormalizedQuery {
    pub fn len(&self) -> usize {
        self.wire.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wire.is_empty()
    }
}

pub trait QueryNormalizer: Send + Sync {
    fn normalize(&self, wire: &[u8], client_is_ipv6: bool) -> Result<NormalizedQuery, DomainError>;
}
