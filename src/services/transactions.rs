//! Transaction use cases.

use crate::domain::transaction::Transaction;
use crate::domain::types::TransactionId;
use crate::dto::api::ListParams;
use crate::forms::transactions::CreateTransactionForm;
use crate::pagination::PageResponse;
use crate::repository::{TransactionReader, TransactionWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists transactions matching the decoded query-string pairs.
pub fn list_transactions<R>(
    repo: &R,
    pairs: Vec<(String, String)>,
    max_page_size: usize,
) -> ServiceResult<PageResponse<Transaction>>
where
    R: TransactionReader + ?Sized,
{
    let query = ListParams::from_query_pairs(pairs)?.into_list_query(max_page_size);

    repo.list_transactions(&query).map_err(|err| {
        if !err.is_client_error() {
            log::error!("Failed to list transactions: {err}");
        }
        ServiceError::from(err)
    })
}

pub fn get_transaction<R>(repo: &R, id: i32) -> ServiceResult<Transaction>
where
    R: TransactionReader + ?Sized,
{
    let id = TransactionId::new(id).map_err(|_| ServiceError::NotFound)?;

    repo.get_transaction_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load transaction {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Records a transaction. A duplicate reference is reported as a conflict.
pub fn create_transaction<R>(repo: &R, form: CreateTransactionForm) -> ServiceResult<Transaction>
where
    R: TransactionWriter + ?Sized,
{
    let new_transaction = form.into_new_transaction()?;

    repo.create_transaction(&new_transaction).map_err(|err| {
        log::error!("Failed to create transaction: {err}");
        ServiceError::from(err)
    })
}
