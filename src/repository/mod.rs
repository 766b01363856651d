//! Persistence traits and their Diesel/SQLite implementation.

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::card::{Card, NewCard, UpdateCard};
use crate::domain::issuer::{Issuer, NewIssuer};
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::domain::types::{CardId, IssuerId, TransactionId};
use crate::pagination::{MAX_PAGE_SIZE, PageRequest, PageResponse};
use crate::query::{FilterSpec, QueryResult};
use crate::repository::errors::RepositoryResult;

pub mod card;
pub mod errors;
pub mod issuer;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod page;
pub mod transaction;

/// Repository backed by a pool of SQLite connections.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        get_connection(&self.pool)
    }
}

/// Filter, page and size ceiling for one list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: FilterSpec,
    pub page: PageRequest,
    pub max_page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: FilterSpec::new(),
            page: PageRequest::default(),
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new(filter: FilterSpec, page: PageRequest) -> Self {
        Self {
            filter,
            page,
            ..Self::default()
        }
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    pub fn max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }
}

pub trait IssuerReader {
    fn get_issuer_by_id(&self, id: IssuerId) -> RepositoryResult<Option<Issuer>>;
    fn list_issuers(&self, query: &ListQuery) -> QueryResult<PageResponse<Issuer>>;
}

pub trait IssuerWriter {
    fn create_issuer(&self, new_issuer: &NewIssuer) -> RepositoryResult<Issuer>;
}

pub trait CardReader {
    fn get_card_by_id(&self, id: CardId) -> RepositoryResult<Option<Card>>;
    fn list_cards(&self, query: &ListQuery) -> QueryResult<PageResponse<Card>>;
}

pub trait CardWriter {
    fn create_card(&self, new_card: &NewCard) -> RepositoryResult<Card>;
    fn update_card(&self, id: CardId, updates: &UpdateCard) -> RepositoryResult<Card>;
    /// Removes the card and, through the foreign key, its transactions.
    fn delete_card(&self, id: CardId) -> RepositoryResult<()>;
}

pub trait TransactionReader {
    fn get_transaction_by_id(&self, id: TransactionId) -> RepositoryResult<Option<Transaction>>;
    fn list_transactions(&self, query: &ListQuery) -> QueryResult<PageResponse<Transaction>>;
}

pub trait TransactionWriter {
    fn create_transaction(&self, new_transaction: &NewTransaction)
    -> RepositoryResult<Transaction>;
}
