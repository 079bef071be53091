use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use maze_types::errors::ApplicationError;

/// Every failure leaves the API as `400 {"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        tracing::error!(kind = ?err.kind(), "Request failed: {err}");
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Routes whose `:id` segment was left empty.
pub async fn missing_id() -> ApiError {
    ApiError::bad_request("param :id must not be empty")
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use maze_types::errors::DbError;

    use super::*;

    #[tokio::test]
    async fn test_errors_render_as_bad_request_json() {
        let err: ApplicationError = DbError::SpotNotFound("s1".to_string()).into();
        let response = ApiError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"error": "Spot with ID s1 not found"}));
    }
}
