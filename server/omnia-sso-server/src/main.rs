use anyhow::{Context, Result};
use auth_identity::{InMemoryUserDirectory, UserDirectory};
use clap::Parser;
use config_engine::{ConfigEngine, ConfigSource};
use logger_redacted::{init_tracing, LoggerConfig};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};

use omnia_sso_server::{create_app, load_user_directory, SsoServer};

/// Omnia SSO bridge HTTP server
#[derive(Parser, Debug)]
#[command(name = "omnia-sso-server")]
#[command(about = "Single sign-on bridge between Omnia and a local user directory")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long, default_value = "omnia-sso.toml")]
    config: PathBuf,

    /// Local user directory (JSON array of users)
    #[arg(short, long, env = "OMNIA_SSO_USERS_FILE")]
    users: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(&LoggerConfig::default().verbose(args.verbose).json(args.json_logs))?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Omnia SSO server");

    let settings = ConfigEngine::new()
        .add_source(ConfigSource::optional_file(&args.config))
        .add_source(ConfigSource::env())
        .build()
        .context("Failed to load configuration")?;

    let directory: Arc<dyn UserDirectory> = match &args.users {
        Some(path) => Arc::new(load_user_directory(path)?),
        None => {
            warn!("No user directory given; every sign-on will fail with user not found");
            Arc::new(InMemoryUserDirectory::new())
        }
    };

    let server = SsoServer::new(settings, directory)?;
    let app = create_app(server);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    info!(address = %addr, "Omnia SSO server listening");
    info!("Auto-login available at: http://{addr}/sso/auto-login");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;
    Ok(())
}
