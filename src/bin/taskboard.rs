//! Runs a task board against `PostgreSQL` and keeps it in sync until
//! interrupted.
//!
//! Usage:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/tasks taskboard
//! ```
//!
//! Changes by any client reach the board through `LISTEN todotasks_changes`;
//! the notification trigger is installed at startup when the role may do so.
//! `TASKBOARD_REFRESH_SECS` and `TASKBOARD_POOL_SIZE` tune the fallback
//! refresh interval and the store's share of the connection pool. Log verbosity follows
//! `RUST_LOG` and defaults to `info`.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use std::sync::Arc;
use taskboard::{
    board::services::BoardController,
    config::BoardConfig,
    task::adapters::postgres::{DEFAULT_POLL_INTERVAL, ListenChangeFeed, PostgresTaskStore},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            std::process::exit(2);
        }
    };

    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    // One connection on top of the configured size stays with the listener.
    let pool = Pool::builder()
        .max_size(config.pool_size().saturating_add(1))
        .build(manager)?;

    if let Err(err) = ListenChangeFeed::install_trigger(&pool).await {
        warn!(error = %err, "change trigger not installed; relying on fallback refresh");
    }
    let feed = Arc::new(ListenChangeFeed::spawn(pool.clone(), DEFAULT_POLL_INTERVAL));
    let store = Arc::new(PostgresTaskStore::new(pool));
    let controller = BoardController::new(store, feed, config.refresh_interval());

    match controller.refresh().await {
        Ok(count) => info!(tasks = count, "board loaded"),
        Err(err) => warn!(error = %err, "initial fetch failed; waiting for next refresh"),
    }
    let summary = serde_json::to_string(&controller.progress())?;
    info!(progress = %summary, "board progress");

    let sync = controller.start_sync();
    info!(
        refresh_secs = config.refresh_interval().as_secs(),
        "board sync running"
    );

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    sync.stop().await;
    Ok(())
}
