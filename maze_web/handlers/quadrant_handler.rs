use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use maze_app::{filters::QuadrantFilter, stores::QuadrantStore};
use maze_types::quadrant::Quadrant;

use crate::{handlers::ApiError, http::AppState};

/// POST /quadrant/create
pub async fn create_quadrant(
    State(state): State<AppState>,
    WithRejection(Json(mut quadrant), _): WithRejection<Json<Quadrant>, ApiError>,
) -> Result<Json<Quadrant>, ApiError> {
    quadrant.id = state
        .app
        .quadrants
        .create(&state.db_name, &quadrant)
        .await?;
    // Only hydrated reads carry spots.
    quadrant.spots.clear();
    Ok(Json(quadrant))
}

/// GET /quadrant/read/{id} – the quadrant with its spots hydrated.
pub async fn get_quadrant(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Quadrant>, ApiError> {
    let quadrant = state
        .app
        .quadrants
        .get(&state.db_name, &QuadrantFilter::by_id(&id))
        .await?;
    Ok(Json(quadrant))
}

/// PATCH /quadrant/update
pub async fn update_quadrant(
    State(state): State<AppState>,
    WithRejection(Json(patch), _): WithRejection<Json<Quadrant>, ApiError>,
) -> Result<Json<Quadrant>, ApiError> {
    let quadrant = state
        .app
        .quadrants
        .update(&state.db_name, &patch)
        .await?;
    Ok(Json(quadrant))
}

/// DELETE /quadrant/delete/{id} – also deletes every spot of the quadrant.
pub async fn delete_quadrant(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Value>, ApiError> {
    state
        .app
        .quadrants
        .delete(&state.db_name, &QuadrantFilter::by_id(&id))
        .await?;
    Ok(Json(json!({})))
}
