use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::card::{
    Card as DomainCard, NewCard as DomainNewCard, UpdateCard as DomainUpdateCard,
};
use crate::domain::types::{
    Bin, CardId, CardKind, CardStatus, CreditLimit, IssuerId, NonEmptyString, PanLast4,
    TypeConstraintError,
};
use crate::query::{ColumnType, FieldDef, FieldRegistry, FilterKind};

/// Filterable and sortable fields of the `cards` table.
pub static CARD_FIELDS: FieldRegistry = FieldRegistry::new(
    "cards",
    "id",
    &[
        FieldDef::new("id", "id", ColumnType::Integer)
            .filter(FilterKind::Range)
            .sortable(),
        FieldDef::new("issuerId", "issuer_id", ColumnType::Integer).filter(FilterKind::Set),
        FieldDef::new("holderName", "holder_name", ColumnType::Text)
            .filter(FilterKind::Equality)
            .sortable(),
        FieldDef::new("bin", "bin", ColumnType::Text).filter(FilterKind::Equality),
        FieldDef::new("kind", "kind", ColumnType::Text)
            .filter(FilterKind::Equality)
            .one_of(CardKind::VALUES),
        FieldDef::new("status", "status", ColumnType::Text)
            .filter(FilterKind::Set)
            .one_of(CardStatus::VALUES),
        FieldDef::new("creditLimit", "credit_limit", ColumnType::Integer)
            .filter(FilterKind::Range)
            .sortable(),
        FieldDef::new("createdAt", "created_at", ColumnType::Timestamp)
            .filter(FilterKind::Range)
            .sortable(),
    ],
);

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = crate::schema::cards)]
/// Diesel model for [`crate::domain::card::Card`].
pub struct Card {
    pub id: i32,
    pub issuer_id: i32,
    pub holder_name: String,
    pub bin: String,
    pub pan_last4: String,
    pub kind: String,
    pub status: String,
    pub credit_limit: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::cards)]
/// Insertable form of [`Card`].
pub struct NewCard<'a> {
    pub issuer_id: i32,
    pub holder_name: &'a str,
    pub bin: &'a str,
    pub pan_last4: &'a str,
    pub kind: &'static str,
    pub status: &'static str,
    pub credit_limit: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::cards)]
/// Data used when updating a [`Card`] record. `None` fields are skipped.
pub struct UpdateCard<'a> {
    pub holder_name: Option<&'a str>,
    pub status: Option<&'static str>,
    pub credit_limit: Option<i64>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Card> for DomainCard {
    type Error = TypeConstraintError;

    fn try_from(card: Card) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CardId::new(card.id)?,
            issuer_id: IssuerId::new(card.issuer_id)?,
            holder_name: NonEmptyString::new(card.holder_name)?,
            bin: Bin::new(card.bin)?,
            pan_last4: PanLast4::new(card.pan_last4)?,
            kind: card.kind.parse()?,
            status: card.status.parse()?,
            credit_limit: CreditLimit::new(card.credit_limit)?,
            created_at: card.created_at,
            updated_at: card.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCard> for NewCard<'a> {
    fn from(card: &'a DomainNewCard) -> Self {
        Self {
            issuer_id: card.issuer_id.get(),
            holder_name: card.holder_name.as_str(),
            bin: card.bin.as_str(),
            pan_last4: card.pan_last4.as_str(),
            kind: card.kind.as_str(),
            status: card.status.as_str(),
            credit_limit: card.credit_limit.get(),
        }
    }
}

impl<'a> UpdateCard<'a> {
    pub fn new(update: &'a DomainUpdateCard, updated_at: NaiveDateTime) -> Self {
        Self {
            holder_name: update.holder_name.as_ref().map(|name| name.as_str()),
            status: update.status.map(CardStatus::as_str),
            credit_limit: update.credit_limit.map(CreditLimit::get),
            updated_at,
        }
    }
}
