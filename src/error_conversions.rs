//! Error conversion glue between the value objects and the storage layer.
//!
//! The domain layer must not depend on repository or service error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
