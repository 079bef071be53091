use std::sync::Arc;

use maze_app::{app::MazeApp, config::Config};
use maze_db::{PostgresStorage, bootstrap_database, establish_connection_pool};
use maze_types::{Result, errors::ApplicationError};
use maze_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let config = Config::from_env();
    let app = setup_app(&config).await?;
    let state = AppState::new(app, &config.db_name);

    WebRouter::serve(state, config.http_port).await
}

async fn setup_app(config: &Config) -> Result<MazeApp, ApplicationError> {
    let db_pool = establish_connection_pool().await?;

    if let Err(e) = bootstrap_database(&db_pool, &config.db_name).await {
        tracing::error!("Error during database bootstrap: {e}");
        return Err(e.into());
    }

    let storage = Arc::new(PostgresStorage::new(db_pool));
    Ok(MazeApp::new(storage))
}
