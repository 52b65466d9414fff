use clap::Parser;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tracing::info;
use zns_domain::CliOverrides;

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "zns")]
#[command(version)]
#[command(about = "ZNS - metered DNS-over-HTTPS gateway with client-subnet rewriting")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Default DoH upstream URL
    #[arg(long)]
    upstream: Option<String>,

    /// DoH upstream for local domains (enables split-horizon)
    #[arg(long)]
    local_upstream: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Serve every token without metering
    #[arg(long)]
    free: bool,

    /// TLS certificate chain (PEM)
    #[arg(long, value_name = "FILE")]
    tls_cert: Option<String>,

    /// TLS private key (PEM)
    #[arg(long, value_name = "FILE")]
    tls_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind,
        tls_cert: cli.tls_cert,
        tls_key: cli.tls_key,
        upstream: cli.upstream,
        local_upstream: cli.local_upstream,
        database_path: cli.database,
        log_level: cli.log_level,
        free: cli.free,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        billing = ?config.billing.mode,
        ecs_policy = ?config.ecs.policy,
        split_horizon = config.upstream.is_split_horizon(),
        tls = config.server.tls_enabled(),
        "Starting ZNS gateway"
    );

    let app_state = di::build_app_state(&config).await?;

    let bind_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {e}"))?;

    match (&config.server.tls_cert, &config.server.tls_key) {
        (Some(cert), Some(key)) => {
            let tls = server::tls::load_server_config(cert, key)?;
            server::start_tls_server(bind_addr, app_state, tls).await?;
        }
        _ => server::start_web_server(bind_addr, app_state).await?,
    }

    info!("Server shutdown complete");
    Ok(())
}
