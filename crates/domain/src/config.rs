pub mod admin;
pub mod billing;
pub mod classifier;
pub mod database;
pub mod ecs;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use admin::AdminConfig;
pub use billing::{BillingConfig, BillingMode};
pub use classifier::ClassifierConfig;
pub use database::DatabaseConfig;
pub use ecs::{EcsConfig, EcsPolicy};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
