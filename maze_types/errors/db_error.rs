use thiserror::Error;

/// Errors for storage stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Quadrant with {0} not found")]
    QuadrantNotFound(String),

    #[error("Spot with ID {0} not found")]
    SpotNotFound(String),

    #[error("Database name '{0}' is not a valid identifier")]
    InvalidDatabaseName(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::QuadrantNotFound(_) | DbError::SpotNotFound(_))
    }
}
