use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use maze_app::app::MazeApp;
use maze_types::{Result, errors::ApplicationError};

use crate::handlers::{
    create_quadrant, create_spot, delete_quadrant, delete_spot, get_quadrant, get_spot,
    missing_id, update_quadrant, update_spot,
};

#[derive(Clone)]
pub struct AppState {
    pub app: MazeApp,
    /// Database every request of this server is routed to.
    pub db_name: Arc<str>,
}

impl AppState {
    pub fn new(app: MazeApp, db_name: &str) -> AppState {
        AppState {
            app,
            db_name: Arc::from(db_name),
        }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/spot/create", post(create_spot))
            .route("/spot/read/", get(missing_id))
            .route("/spot/read/{id}", get(get_spot))
            .route("/spot/update", patch(update_spot))
            .route("/spot/delete/", delete(missing_id))
            .route("/spot/delete/{id}", delete(delete_spot))
            .route("/quadrant/create", post(create_quadrant))
            .route("/quadrant/read/", get(missing_id))
            .route("/quadrant/read/{id}", get(get_quadrant))
            .route("/quadrant/update", patch(update_quadrant))
            .route("/quadrant/delete/", delete(missing_id))
            .route("/quadrant/delete/{id}", delete(delete_quadrant))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(infra_error)?;

        tracing::info!(
            "HTTP Server started, listening on http://{}",
            addr.to_string()
        );
        Self::serve_on(state, listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve_on(state: AppState, listener: TcpListener) -> Result<(), ApplicationError> {
        axum::serve(listener, Self::router(state))
            .await
            .map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
