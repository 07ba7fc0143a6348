use std::fs;

use tracing_subscriber::EnvFilter;

use speedmed::api::server::start_server;
use speedmed::api::types::ApiContext;
use speedmed::config;
use speedmed::db::sqlite::open_database;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::db_path();
    if let Some(parent) = db_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::error!("Cannot create data directory {}: {e}", parent.display());
            std::process::exit(1);
        }
    }

    // Run migrations once at startup; requests open their own connections
    match open_database(&db_path) {
        Ok(conn) => drop(conn),
        Err(e) => {
            tracing::error!("Cannot open database {}: {e}", db_path.display());
            std::process::exit(1);
        }
    }

    let ctx = ApiContext::new(db_path);
    let mut server = match start_server(ctx, config::bind_addr()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();
}
