use std::sync::Arc;
use tracing::debug;

use crate::ports::DomainClassifier;

/// Chooses the DoH upstream for a query.
pub enum UpstreamRouter {
    Single {
        upstream: Arc<str>,
    },
    SplitHorizon {
        local: Arc<str>,
        default: Arc<str>,
        classifier: Arc<dyn DomainClassifier>,
    },
}

impl UpstreamRouter {
    pub fn single(upstream: impl Into<Arc<str>>) -> Self {
        Self::Single {
            upstream: upstream.into(),
        }
    }

    pub fn split_horizon(
        local: impl Into<Arc<str>>,
        default: impl Into<Arc<str>>,
        classifier: Arc<dyn DomainClassifier>,
    ) -> Self {
        Self::SplitHorizon {
            local: local.into(),
            default: default.into(),
            classifier,
        }
    }

    /// `qname` must already be canonical, see [`canonical_qname`]. Queries
    /// without a question go to the default upstream.
    pub fn select(&self, qname: Option<&str>) -> &Arc<str> {
        match self {
            Self::Single { upstream } => upstream,
            Self::SplitHorizon {
                local,
                default,
                classifier,
            } => match qname {
                Some(name) if classifier.is_local_domain(name) => {
                    debug!(qname = %name, upstream = %local, "Routing to local upstream");
                    local
                }
                _ => default,
            },
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Single { .. } => "single",
            Self::SplitHorizon { .. } => "split",
        }
    }

    pub fn classifier(&self) -> Option<&Arc<dyn DomainClassifier>> {
        match self {
            Self::Single { .. } => None,
            Self::SplitHorizon { classifier, .. } => Some(classifier),
        }
    }
}

/// Lowercases a question name and strips one trailing dot.
pub fn canonical_qname(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}
