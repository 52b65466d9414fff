use std::net::IpAddr;
use std::sync::Arc;

/// Query bytes as they arrived on the wire, before any decoding.
#[derive(Debug, Clone)]
pub enum DohPayload {
    /// `dns` query parameter of a GET request, base64url without padding.
    Encoded(String),
    /// Raw body of a POST request.
    Wire(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct DohRequest {
    pub token: Arc<str>,
    pub payload: DohPayload,
    pub client_ip: IpAddr,
}

impl DohRequest {
    pub fn get(token: impl Into<Arc<str>>, dns: impl Into<String>, client_ip: IpAddr) -> Self {
        Self {
            token: token.into(),
            payload: DohPayload::Encoded(dns.into()),
            client_ip,
        }
    }

    pub fn post(token: impl Into<Arc<str>>, body: Vec<u8>, client_ip: IpAddr) -> Self {
        Self {
            token: token.into(),
            payload: DohPayload::Wire(body),
            client_ip,
        }
    }

    /// Address family of the transport peer. IPv4-mapped IPv6 peers count as IPv4.
    pub fn client_is_ipv6(&self) -> bool {
        match self.client_ip {
            IpAddr::V4(_) => false,
            IpAddr::V6(v6) => v6.to_ipv4_mapped().is_none(),
        }
    }
}
