//! vatrack server binary.
//!
//! Affiliate referral tracking and VA client registration service: client
//! registry, CRM webhook relay, attribution capture, and the admin session
//! gate.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use vatrack_core::tracing_init::init_tracing;
use vatrack_server::relay::WebhookRelay;
use vatrack_server::routes::{AppState, build_router};
use vatrack_server::session::{AdminCredentials, SessionStore};
use vatrack_server::storage::Database;

#[derive(Parser, Debug)]
#[command(name = "vatrack-server")]
#[command(
    version,
    about = "Affiliate referral tracking and VA client registration server"
)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080", env = "LISTEN_ADDR")]
    addr: SocketAddr,

    /// Path to the SQLite database file.
    #[arg(long, env = "VATRACK_DB")]
    db_path: Option<PathBuf>,

    /// External CRM webhook target. Payout events fail until this is set.
    #[arg(long, env = "GHL_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Admin username for the dashboard session gate.
    #[arg(long, env = "VATRACK_ADMIN_USER", default_value = "admin")]
    admin_user: String,

    /// Admin password for the dashboard session gate.
    #[arg(long, env = "VATRACK_ADMIN_PASS", default_value = "change-me")]
    admin_pass: String,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("vatrack_server=info", args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        "Starting vatrack-server"
    );

    let db_path = match args.db_path {
        Some(path) => path,
        None => default_db_path()?,
    };
    info!(path = %db_path.display(), "Opening client registry");
    let db = Database::open(&db_path).await?;

    if args.webhook_url.as_deref().unwrap_or_default().is_empty() {
        warn!("GHL_WEBHOOK_URL is not set; payout events will fail until it is configured");
    }
    let relay = Arc::new(WebhookRelay::new(args.webhook_url)?);

    let state = AppState {
        db,
        relay,
        sessions: SessionStore::new(),
        credentials: AdminCredentials {
            username: args.admin_user,
            password: args.admin_pass,
        },
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".vatrack").join("vatrack.db"))
}
