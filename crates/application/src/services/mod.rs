mod upstream_router;

pub use upstream_router::{canonical_qname, UpstreamRouter};
