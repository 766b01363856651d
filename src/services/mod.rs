//! Use cases of the card API, generic over the repository traits.

use thiserror::Error;

pub mod cards;
pub mod issuers;
pub mod transactions;

/// Errors surfaced by service functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Malformed list parameters, filters or sort fields.
    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Details are logged where the failure happens and never returned.
    #[error("internal server error")]
    Internal,
}

impl ServiceError {
    /// Returns `true` for errors caused by caller input.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Internal)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
