#![forbid(unsafe_code)]

use roster_server::config::{
    ENV_ROSTER_BIND, ENV_ROSTER_DB_PATH, ENV_ROSTER_LOG_LEVEL, ENV_ROSTER_MAX_BODY_BYTES,
};
use roster_server::{build_router, AppState, ServerConfig};
use std::env;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn env_str(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        bind: env_str(ENV_ROSTER_BIND, &defaults.bind),
        db_path: PathBuf::from(env_str(
            ENV_ROSTER_DB_PATH,
            &defaults.db_path.to_string_lossy(),
        )),
        max_body_bytes: env_usize(ENV_ROSTER_MAX_BODY_BYTES, defaults.max_body_bytes),
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env(ENV_ROSTER_LOG_LEVEL)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = config_from_env();

    let conn = match roster_store::open(&config.db_path) {
        Ok(conn) => conn,
        Err(e) => {
            error!(db = %config.db_path.display(), %e, "failed to open roster database");
            std::process::exit(1);
        }
    };
    info!(db = %config.db_path.display(), "roster database ready");

    let app = build_router(AppState::new(conn), config.max_body_bytes);

    let listener = match TcpListener::bind(&config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(bind = %config.bind, %e, "failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(bind = %config.bind, "roster-server listening");

    if let Err(e) = axum::serve(listener, app).await {
        error!(%e, "server terminated");
        std::process::exit(1);
    }
}
