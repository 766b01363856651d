use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CountryCode, IssuerId, NonEmptyString, TypeConstraintError};

/// Bank or program manager issuing cards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    pub id: IssuerId,
    pub name: NonEmptyString,
    pub country: CountryCode,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewIssuer {
    pub name: NonEmptyString,
    pub country: CountryCode,
}

impl NewIssuer {
    #[must_use]
    pub fn new(name: NonEmptyString, country: CountryCode) -> Self {
        Self { name, country }
    }

    /// Validates raw input before building the value.
    pub fn try_new(
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self::new(
            NonEmptyString::new(name)?,
            CountryCode::new(country)?,
        ))
    }
}
