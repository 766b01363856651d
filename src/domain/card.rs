use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Bin, CardId, CardKind, CardStatus, CreditLimit, IssuerId, NonEmptyString, PanLast4,
    TypeConstraintError,
};

/// Payment card as exposed by the API. Full card numbers are never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub issuer_id: IssuerId,
    pub holder_name: NonEmptyString,
    pub bin: Bin,
    pub pan_last4: PanLast4,
    pub kind: CardKind,
    pub status: CardStatus,
    pub credit_limit: CreditLimit,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCard {
    pub issuer_id: IssuerId,
    pub holder_name: NonEmptyString,
    pub bin: Bin,
    pub pan_last4: PanLast4,
    pub kind: CardKind,
    pub status: CardStatus,
    pub credit_limit: CreditLimit,
}

impl NewCard {
    /// New cards start out `ACTIVE`.
    #[must_use]
    pub fn new(
        issuer_id: IssuerId,
        holder_name: NonEmptyString,
        bin: Bin,
        pan_last4: PanLast4,
        kind: CardKind,
        credit_limit: CreditLimit,
    ) -> Self {
        Self {
            issuer_id,
            holder_name,
            bin,
            pan_last4,
            kind,
            status: CardStatus::Active,
            credit_limit,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: CardStatus) -> Self {
        self.status = status;
        self
    }

    pub fn try_new(
        issuer_id: i32,
        holder_name: impl Into<String>,
        bin: impl Into<String>,
        pan_last4: impl Into<String>,
        kind: &str,
        credit_limit: i64,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            IssuerId::new(issuer_id)?,
            NonEmptyString::new(holder_name)?,
            Bin::new(bin)?,
            PanLast4::new(pan_last4)?,
            kind.parse()?,
            CreditLimit::new(credit_limit)?,
        ))
    }
}

/// Partial update of a card; `None` leaves the column untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCard {
    pub holder_name: Option<NonEmptyString>,
    pub status: Option<CardStatus>,
    pub credit_limit: Option<CreditLimit>,
}

impl UpdateCard {
    pub fn is_empty(&self) -> bool {
        self.holder_name.is_none() && self.status.is_none() && self.credit_limit.is_none()
    }
}
