//! cfstats - Application Entry Point

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cfstats::{
    codeforces::HttpCodeforcesClient,
    config::{LogFormat, CONFIG},
    create_router,
    db::{self, PgStore},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting cfstats server...");

    tracing::info!("Connecting to database...");
    let pool = db::connect(&CONFIG.database)
        .await
        .context("failed to connect to the database")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    let api = HttpCodeforcesClient::new(&CONFIG.codeforces)?;
    tracing::info!(
        api_url = %CONFIG.codeforces.api_url,
        call_delay_ms = CONFIG.codeforces.call_delay.as_millis() as u64,
        "Codeforces client ready"
    );

    let state = AppState::new(
        Arc::new(PgStore::new(pool.clone())),
        Arc::new(api),
        &CONFIG.codeforces,
    );
    let app = create_router(state);

    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into());
    let registry = tracing_subscriber::registry().with(filter);

    match CONFIG.server.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
