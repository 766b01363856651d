use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Amount, CardId, CurrencyCode, NonEmptyString, Reference, TransactionId, TransactionStatus,
    TypeConstraintError,
};

/// Authorization or settlement recorded against a card.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub card_id: CardId,
    pub reference: Reference,
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    pub merchant: NonEmptyString,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub card_id: CardId,
    pub reference: Reference,
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    pub merchant: NonEmptyString,
}

impl NewTransaction {
    /// Builds a `PENDING` transaction; a fresh reference is generated when
    /// none is supplied.
    #[must_use]
    pub fn new(
        card_id: CardId,
        reference: Option<Reference>,
        amount: Amount,
        currency: CurrencyCode,
        merchant: NonEmptyString,
    ) -> Self {
        Self {
            card_id,
            reference: reference.unwrap_or_default(),
            amount,
            currency,
            status: TransactionStatus::Pending,
            merchant,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn try_new(
        card_id: i32,
        reference: Option<&str>,
        amount: i64,
        currency: impl Into<String>,
        merchant: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        let reference = reference.map(str::parse::<Reference>).transpose()?;
        Ok(Self::new(
            CardId::new(card_id)?,
            reference,
            Amount::new(amount)?,
            CurrencyCode::new(currency)?,
            NonEmptyString::new(merchant)?,
        ))
    }
}
