//! # Dayplan API Server
//!
//! HTTP API for the Dayplan task tracker: sign-in (registered or anonymous),
//! todo CRUD, and the by-date listing that expands recurring todos into their
//! per-day occurrences.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/dayplan \
//! JWT_SECRET=$(openssl rand -hex 32) \
//! cargo run -p dayplan-api
//! ```

use dayplan_api::{
    app::{build_router, AppState},
    config::Config,
};
use dayplan_shared::db::{migrations::run_migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dayplan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Dayplan API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&db).await?;

    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
