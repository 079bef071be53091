use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};

use maze_app::{filters::SpotFilter, stores::SpotStore};
use maze_types::spot::Spot;

use crate::{handlers::ApiError, http::AppState};

/// POST /spot/create
pub async fn create_spot(
    State(state): State<AppState>,
    WithRejection(Json(mut spot), _): WithRejection<Json<Spot>, ApiError>,
) -> Result<Json<Spot>, ApiError> {
    if spot.gold_amount.is_empty() {
        return Err(ApiError::bad_request(
            "the Spot.gold_amount attribute must be specified",
        ));
    }

    spot.id = state.app.spots.create(&state.db_name, &spot).await?;
    Ok(Json(spot))
}

/// GET /spot/read/{id}
pub async fn get_spot(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Spot>, ApiError> {
    let spot = state
        .app
        .spots
        .get(&state.db_name, &SpotFilter::by_id(&id))
        .await?;
    Ok(Json(spot))
}

/// PATCH /spot/update
pub async fn update_spot(
    State(state): State<AppState>,
    WithRejection(Json(patch), _): WithRejection<Json<Spot>, ApiError>,
) -> Result<Json<Spot>, ApiError> {
    let spot = state.app.spots.update(&state.db_name, &patch).await?;
    Ok(Json(spot))
}

/// DELETE /spot/delete/{id}
pub async fn delete_spot(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Value>, ApiError> {
    state
        .app
        .spots
        .delete(&state.db_name, &SpotFilter::by_id(&id))
        .await?;
    Ok(Json(json!({})))
}
