//! Application services shared by the HTML views and the JSON API.

use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod book;
pub mod main;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("type constraint violated: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
