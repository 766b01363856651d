//! Repository implementation for card transactions.

use diesel::prelude::*;

use crate::{
    domain::{
        transaction::{NewTransaction, Transaction},
        types::TransactionId,
    },
    models::transaction::{
        NewTransaction as DbNewTransaction, TRANSACTION_FIELDS, Transaction as DbTransaction,
    },
    pagination::PageResponse,
    query::{QueryError, QueryResult, find_page},
    repository::{
        DieselRepository, ListQuery, TransactionReader, TransactionWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl TransactionReader for DieselRepository {
    fn get_transaction_by_id(&self, id: TransactionId) -> RepositoryResult<Option<Transaction>> {
        use crate::schema::transactions;

        let mut conn = self.conn()?;
        let db_transaction = transactions::table
            .find(id.get())
            .first::<DbTransaction>(&mut conn)
            .optional()?;

        db_transaction
            .map(Transaction::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_transactions(&self, query: &ListQuery) -> QueryResult<PageResponse<Transaction>> {
        find_page(
            self,
            &TRANSACTION_FIELDS,
            &query.filter,
            &query.page,
            query.max_page_size,
            |row: DbTransaction| Transaction::try_from(row),
        )?
        .transpose()
        .map_err(|err| QueryError::Storage(err.into()))
    }
}

impl TransactionWriter for DieselRepository {
    fn create_transaction(
        &self,
        new_transaction: &NewTransaction,
    ) -> RepositoryResult<Transaction> {
        use crate::schema::transactions;

        let mut conn = self.conn()?;

        let db_transaction = diesel::insert_into(transactions::table)
            .values(&DbNewTransaction::from(new_transaction))
            .get_result::<DbTransaction>(&mut conn)?;

        Transaction::try_from(db_transaction).map_err(RepositoryError::from)
    }
}
