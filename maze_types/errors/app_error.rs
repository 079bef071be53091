use thiserror::Error;

/// Errors for malformed requests reaching the stores.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(&'static str),

    #[error("Wrong id '{0}'")]
    InvalidId(String),
}

impl AppError {
    pub fn missing(field: &'static str) -> Self {
        AppError::InvalidArgument(format!("the {field} attribute must be specified"))
    }
}
