//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::card::{Card, NewCard, UpdateCard};
use crate::domain::issuer::{Issuer, NewIssuer};
use crate::domain::transaction::{NewTransaction, Transaction};
use crate::domain::types::{CardId, IssuerId, TransactionId};
use crate::pagination::PageResponse;
use crate::query::QueryResult;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CardReader, CardWriter, IssuerReader, IssuerWriter, ListQuery, TransactionReader,
    TransactionWriter,
};

mock! {
    pub Repository {}

    impl IssuerReader for Repository {
        fn get_issuer_by_id(&self, id: IssuerId) -> RepositoryResult<Option<Issuer>>;
        fn list_issuers(&self, query: &ListQuery) -> QueryResult<PageResponse<Issuer>>;
    }

    impl IssuerWriter for Repository {
        fn create_issuer(&self, new_issuer: &NewIssuer) -> RepositoryResult<Issuer>;
    }

    impl CardReader for Repository {
        fn get_card_by_id(&self, id: CardId) -> RepositoryResult<Option<Card>>;
        fn list_cards(&self, query: &ListQuery) -> QueryResult<PageResponse<Card>>;
    }

    impl CardWriter for Repository {
        fn create_card(&self, new_card: &NewCard) -> RepositoryResult<Card>;
        fn update_card(&self, id: CardId, updates: &UpdateCard) -> RepositoryResult<Card>;
        fn delete_card(&self, id: CardId) -> RepositoryResult<()>;
    }

    impl TransactionReader for Repository {
        fn get_transaction_by_id(&self, id: TransactionId) -> RepositoryResult<Option<Transaction>>;
        fn list_transactions(&self, query: &ListQuery) -> QueryResult<PageResponse<Transaction>>;
    }

    impl TransactionWriter for Repository {
        fn create_transaction(
            &self,
            new_transaction: &NewTransaction,
        ) -> RepositoryResult<Transaction>;
    }
}
