//! Business logic behind the HTTP routes.
//!
//! Every operation returns a [`ServiceError`] variant that the route layer
//! matches exhaustively into the documented JSON error responses.

use thiserror::Error;

use crate::forms::products::FieldError;
use crate::repository::RepositoryError;
use crate::services::images::UploadError;

pub mod images;
pub mod products;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body failed schema validation; one entry per failing field.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Kept for taxonomy parity with the HTTP contract (401); no route
    /// currently produces it.
    #[error("unauthorized")]
    Unauthorized,
    #[error("database error: {0}")]
    Database(String),
    #[error("internal error")]
    Internal,
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Pool(e) => Self::Database(e.to_string()),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
            RepositoryError::Validation(_) => Self::Internal,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
