pub mod https;

/// Content type for DNS-over-HTTPS requests and responses (RFC 8484 §4.2.1)
pub const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";
