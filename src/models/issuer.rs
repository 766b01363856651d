use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::issuer::{Issuer as DomainIssuer, NewIssuer as DomainNewIssuer};
use crate::domain::types::{CountryCode, IssuerId, NonEmptyString, TypeConstraintError};
use crate::query::{ColumnType, FieldDef, FieldRegistry, FilterKind};

/// Filterable and sortable fields of the `issuers` table.
pub static ISSUER_FIELDS: FieldRegistry = FieldRegistry::new(
    "issuers",
    "id",
    &[
        FieldDef::new("id", "id", ColumnType::Integer)
            .filter(FilterKind::Range)
            .sortable(),
        FieldDef::new("name", "name", ColumnType::Text)
            .filter(FilterKind::Equality)
            .sortable(),
        FieldDef::new("country", "country", ColumnType::Text)
            .filter(FilterKind::Set)
            .upper_case(),
        FieldDef::new("createdAt", "created_at", ColumnType::Timestamp)
            .filter(FilterKind::Range)
            .sortable(),
    ],
);

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = crate::schema::issuers)]
/// Diesel model for [`crate::domain::issuer::Issuer`].
pub struct Issuer {
    pub id: i32,
    pub name: String,
    pub country: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::issuers)]
/// Insertable form of [`Issuer`].
pub struct NewIssuer<'a> {
    pub name: &'a str,
    pub country: &'a str,
}

impl TryFrom<Issuer> for DomainIssuer {
    type Error = TypeConstraintError;

    fn try_from(issuer: Issuer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IssuerId::new(issuer.id)?,
            name: NonEmptyString::new(issuer.name)?,
            country: CountryCode::new(issuer.country)?,
            created_at: issuer.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewIssuer> for NewIssuer<'a> {
    fn from(issuer: &'a DomainNewIssuer) -> Self {
        Self {
            name: issuer.name.as_str(),
            country: issuer.country.as_str(),
        }
    }
}
