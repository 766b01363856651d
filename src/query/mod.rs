//! Dynamic filtering and offset pagination over a single table.
//!
//! Callers hand over a sparse [`FilterSpec`] and a [`PageRequest`]; both are
//! validated against the entity's [`FieldRegistry`] before anything reaches
//! the store. The resulting predicates are rendered into parameterized
//! statements and a [`PageStorage`] answers the count and the page from the
//! same read snapshot.
//!
//! [`PageRequest`]: crate::pagination::PageRequest

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod engine;
pub mod fields;
pub mod filter;
pub mod sql;

pub use engine::{PageStorage, assemble, find_page};
pub use fields::{Bound, ColumnType, FieldDef, FieldRegistry, FilterKind, FilterTarget};
pub use filter::{Condition, FilterSpec, Predicate, SqlValue, build_predicates};
pub use sql::{SelectQuery, Statement};

/// Failures raised while shaping or running a list query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Requested sort field is not sortable for the entity.
    #[error("invalid sort field: {0}")]
    InvalidSortField(String),
    /// Filter key does not name a filterable field of the entity.
    #[error("unknown filter field: {0}")]
    UnknownFilterField(String),
    /// Filter value cannot be used against the field's column.
    #[error("invalid value for filter `{field}`: {reason}")]
    InvalidFilterValue { field: String, reason: String },
    /// Requested page size is zero.
    #[error("page size must be greater than zero")]
    InvalidPageSize,
    /// The storage driver failed; nothing is returned.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl QueryError {
    /// Returns `true` when the error was caused by caller input.
    ///
    /// Such errors are always detected before the store is queried.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, QueryError::Storage(_))
    }

    pub(crate) fn invalid_value(field: &FieldDef, reason: impl Into<String>) -> Self {
        QueryError::InvalidFilterValue {
            field: field.name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
