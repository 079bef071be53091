use thiserror::Error;

pub mod app_error;
pub mod db_error;

pub use app_error::AppError;
pub use db_error::DbError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

/// Coarse classification of failures, used for logging and tests.
/// Clients never see it: every error becomes the same HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidId,
    NotFound,
    DependencyFailure,
    StorageFailure,
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// A cascading step (hydration, cascade delete, re-parenting) failed.
    /// Earlier steps of the same operation are not rolled back.
    #[error("{step}: {source}")]
    Dependency {
        step: &'static str,
        #[source]
        source: Box<ApplicationError>,
    },

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn dependency(step: &'static str, source: ApplicationError) -> Self {
        ApplicationError::Dependency {
            step,
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::App(AppError::InvalidId(_)) => ErrorKind::InvalidId,
            ApplicationError::App(_) => ErrorKind::InvalidArgument,
            ApplicationError::Db(e) if e.is_not_found() => ErrorKind::NotFound,
            ApplicationError::Db(DbError::InvalidDatabaseName(_)) => ErrorKind::InvalidArgument,
            ApplicationError::Db(_) => ErrorKind::StorageFailure,
            ApplicationError::Dependency { .. } => ErrorKind::DependencyFailure,
            ApplicationError::Json(_) | ApplicationError::Infrastructure(_) => {
                ErrorKind::StorageFailure
            }
        }
    }

    /// Kind of the innermost error behind any `Dependency` wrappers.
    pub fn root_kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Dependency { source, .. } => source.root_kind(),
            other => other.kind(),
        }
    }
}
