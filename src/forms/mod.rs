//! JSON request bodies accepted by the card API.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod cards;
pub mod issuers;
pub mod transactions;

#[derive(Debug, Error)]
/// Errors that can occur when processing request bodies.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("nothing to update")]
    EmptyUpdate,
}
