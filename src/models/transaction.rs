use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::transaction::{
    NewTransaction as DomainNewTransaction, Transaction as DomainTransaction,
};
use crate::domain::types::{
    Amount, CardId, CurrencyCode, NonEmptyString, TransactionId, TransactionStatus,
    TypeConstraintError,
};
use crate::query::{ColumnType, FieldDef, FieldRegistry, FilterKind};

/// Filterable and sortable fields of the `transactions` table.
pub static TRANSACTION_FIELDS: FieldRegistry = FieldRegistry::new(
    "transactions",
    "id",
    &[
        FieldDef::new("id", "id", ColumnType::Integer)
            .filter(FilterKind::Range)
            .sortable(),
        FieldDef::new("cardId", "card_id", ColumnType::Integer).filter(FilterKind::Set),
        FieldDef::new("reference", "reference", ColumnType::Uuid).filter(FilterKind::Equality),
        FieldDef::new("amount", "amount", ColumnType::Integer)
            .filter(FilterKind::Range)
            .sortable(),
        FieldDef::new("currency", "currency", ColumnType::Text)
            .filter(FilterKind::Equality)
            .upper_case(),
        FieldDef::new("status", "status", ColumnType::Text)
            .filter(FilterKind::Set)
            .one_of(TransactionStatus::VALUES),
        FieldDef::new("merchant", "merchant", ColumnType::Text).filter(FilterKind::Equality),
        FieldDef::new("createdAt", "created_at", ColumnType::Timestamp)
            .filter(FilterKind::Range)
            .sortable(),
    ],
);

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = crate::schema::transactions)]
/// Diesel model for [`crate::domain::transaction::Transaction`].
pub struct Transaction {
    pub id: i32,
    pub card_id: i32,
    pub reference: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub merchant: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
/// Insertable form of [`Transaction`].
pub struct NewTransaction<'a> {
    pub card_id: i32,
    pub reference: String,
    pub amount: i64,
    pub currency: &'a str,
    pub status: &'static str,
    pub merchant: &'a str,
}

impl TryFrom<Transaction> for DomainTransaction {
    type Error = TypeConstraintError;

    fn try_from(tx: Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TransactionId::new(tx.id)?,
            card_id: CardId::new(tx.card_id)?,
            reference: tx.reference.parse()?,
            amount: Amount::new(tx.amount)?,
            currency: CurrencyCode::new(tx.currency)?,
            status: tx.status.parse()?,
            merchant: NonEmptyString::new(tx.merchant)?,
            created_at: tx.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewTransaction> for NewTransaction<'a> {
    fn from(tx: &'a DomainNewTransaction) -> Self {
        Self {
            card_id: tx.card_id.get(),
            reference: tx.reference.to_string(),
            amount: tx.amount.get(),
            currency: tx.currency.as_str(),
            status: tx.status.as_str(),
            merchant: tx.merchant.as_str(),
        }
    }
}
