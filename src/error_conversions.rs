//! Error conversion glue between layers.
//!
//! The domain and query layers must not depend on service error types, so
//! the conversions live here instead of next to the error definitions.

use crate::domain::types::TypeConstraintError;
use crate::dto::api::ListParamsError;
use crate::forms::FormError;
use crate::query::QueryError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(val: RepositoryError) -> Self {
        match val {
            RepositoryError::NotFound => ServiceError::NotFound,
            err @ RepositoryError::ConstraintViolation(..) => {
                ServiceError::Conflict(err.to_string())
            }
            _ => ServiceError::Internal,
        }
    }
}

impl From<QueryError> for ServiceError {
    fn from(val: QueryError) -> Self {
        match val {
            QueryError::Storage(err) => err.into(),
            client => ServiceError::InvalidQuery(client.to_string()),
        }
    }
}

impl From<ListParamsError> for ServiceError {
    fn from(val: ListParamsError) -> Self {
        ServiceError::InvalidQuery(val.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        match val {
            FormError::TypeConstraint(err) => err.into(),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;

    use super::*;
    use crate::repository::errors::database_error;

    #[test]
    fn query_client_errors_become_invalid_query() {
        let err = ServiceError::from(QueryError::UnknownFilterField("bogusField".into()));
        assert_eq!(
            err,
            ServiceError::InvalidQuery("unknown filter field: bogusField".into())
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn storage_errors_are_internal() {
        let err = ServiceError::from(QueryError::Storage(RepositoryError::from(
            database_error(DatabaseErrorKind::Unknown, "disk I/O error"),
        )));
        assert_eq!(err, ServiceError::Internal);
        assert!(!err.is_client_error());
    }

    #[test]
    fn constraint_violations_are_conflicts() {
        let err = ServiceError::from(RepositoryError::from(database_error(
            DatabaseErrorKind::UniqueViolation,
            "UNIQUE constraint failed: transactions.reference",
        )));
        assert_eq!(
            err,
            ServiceError::Conflict(
                "unique constraint violated: UNIQUE constraint failed: transactions.reference"
                    .into()
            )
        );
        assert_eq!(ServiceError::from(RepositoryError::NotFound), ServiceError::NotFound);
    }
}
