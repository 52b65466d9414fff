pub mod tls;
pub mod web;

pub use tls::start_tls_server;
pub use web::start_web_server;

use tracing::{info, warn};

pub(crate) async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
