use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Default DoH upstream. The only upstream in single mode.
    #[serde(default = "default_upstream_url")]
    pub url: String,

    /// Upstream for domains the classifier marks as local. Enables split-horizon mode.
    #[serde(default)]
    pub local_url: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn is_split_horizon(&self) -> bool {
        self.local_url.is_some()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            local_url: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_upstream_url() -> String {
    "https://doh.pub/dns-query".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}
