use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use fund_proxy::config::load_config;
use fund_proxy::observability::logging;
use fund_proxy::{HttpServer, ProxyConfig, Shutdown, StartupError};

#[derive(Parser, Debug)]
#[command(name = "fund-proxy")]
#[command(about = "CORS proxy for fund quote, fund API and news endpoints")]
struct Args {
    /// Path to a TOML config file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listen address (e.g. 127.0.0.1:8080).
    #[arg(short, long)]
    bind: Option<String>,

    /// Accept invalid upstream TLS certificates.
    #[arg(long)]
    insecure: bool,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if args.insecure {
        config.upstream.accept_invalid_certs = true;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("fund-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        scrapes = config.scrapes.len(),
        match_mode = ?config.routing.match_mode,
        request_timeout_secs = config.upstream.request_timeout_secs,
        "Configuration loaded"
    );

    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
