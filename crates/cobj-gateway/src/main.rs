//! `cobj-gateway` entry point.
//!
//! Loads `.env` if present, reads [`GatewayConfig`] from the environment and
//! serves until the process exits. See [`cobj_gateway::config`] for the
//! variables.

use cobj_gateway::config::GatewayConfig;
use cobj_gateway::server::GatewayServer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cobj_gateway=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        addr = %config.bind_addr(),
        endpoint = %config.collection_endpoint(),
        static_dir = %config.static_dir.display(),
        "configuration loaded"
    );

    if let Err(e) = GatewayServer::new(config).start().await {
        error!(error = %e, "gateway stopped");
        std::process::exit(1);
    }
}
