//! Error type shared by every repository implementation.
//!
//! Driver failures keep the original Diesel or pool error as their
//! [`source`](std::error::Error::source), so callers can log the whole chain.

use std::fmt;

use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Integrity rule that rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Constraint::Unique => "unique",
            Constraint::ForeignKey => "foreign key",
            Constraint::NotNull => "not null",
            Constraint::Check => "check",
        })
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested row does not exist.
    #[error("entity not found")]
    NotFound,

    #[error("{0} constraint violated: {1}")]
    ConstraintViolation(Constraint, #[source] DieselError),

    #[error("database query failed: {0}")]
    Query(#[source] DieselError),

    #[error("database connection unavailable: {0}")]
    Connection(#[source] PoolError),

    /// A stored row no longer satisfies the domain constraints.
    #[error("invalid stored row: {0}")]
    InvalidRow(#[from] TypeConstraintError),

    #[error("unexpected storage result: {0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint(kind: &DatabaseErrorKind) -> Option<Constraint> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(Constraint::Unique),
        DatabaseErrorKind::ForeignKeyViolation => Some(Constraint::ForeignKey),
        DatabaseErrorKind::NotNullViolation => Some(Constraint::NotNull),
        DatabaseErrorKind::CheckViolation => Some(Constraint::Check),
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        if let DieselError::NotFound = err {
            return RepositoryError::NotFound;
        }

        let violated = match &err {
            DieselError::DatabaseError(kind, _) => constraint(kind),
            _ => None,
        };
        match violated {
            Some(rule) => RepositoryError::ConstraintViolation(rule, err),
            None => RepositoryError::Query(err),
        }
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::Connection(err)
    }
}

/// Builds a driver error the way SQLite reports one.
#[cfg(test)]
pub(crate) fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
    DieselError::DatabaseError(kind, Box::new(message.to_string()))
}
