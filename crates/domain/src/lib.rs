//! ZNS Domain Layer
pub mod config;
pub mod doh_request;
pub mod errors;
pub mod quota;

pub use config::{BillingMode, CliOverrides, Config, EcsConfig, EcsPolicy};
pub use doh_request::{DohPayload, DohRequest};
pub use errors::DomainError;
pub use quota::QuotaView;
