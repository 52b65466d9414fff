use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// What to do with a Client-Subnet option the caller already sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EcsPolicy {
    /// Keep a caller option with a non-zero source prefix.
    #[default]
    Preserve,
    /// Always replace with the anchor.
    Force,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EcsConfig {
    #[serde(default)]
    pub policy: EcsPolicy,

    #[serde(default = "default_ipv4_anchor")]
    pub ipv4_anchor: Ipv4Addr,

    #[serde(default = "default_ipv6_anchor")]
    pub ipv6_anchor: Ipv6Addr,

    #[serde(default = "default_ipv4_prefix")]
    pub ipv4_prefix: u8,

    #[serde(default = "default_ipv6_prefix")]
    pub ipv6_prefix: u8,
}

impl EcsConfig {
    /// Anchor address and source prefix for a caller of the given family.
    pub fn anchor_for(&self, client_is_ipv6: bool) -> (IpAddr, u8) {
        if client_is_ipv6 {
            (IpAddr::V6(self.ipv6_anchor), self.ipv6_prefix)
        } else {
            (IpAddr::V4(self.ipv4_anchor), self.ipv4_prefix)
        }
    }
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            policy: EcsPolicy::default(),
            ipv4_anchor: default_ipv4_anchor(),
            ipv6_anchor: default_ipv6_anchor(),
            ipv4_prefix: default_ipv4_prefix(),
            ipv6_prefix: default_ipv6_prefix(),
        }
    }
}

fn default_ipv4_anchor() -> Ipv4Addr {
    Ipv4Addr::new(218, 85, 157, 99)
}

fn default_ipv6_anchor() -> Ipv6Addr {
    Ipv6Addr::new(0x240e, 0x14, 0x6000, 0, 0, 0, 0, 1)
}

fn default_ipv4_prefix() -> u8 {
    24
}

fn default_ipv6_prefix() -> u8 {
    56
}
