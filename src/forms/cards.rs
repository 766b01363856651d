use serde::Deserialize;
use validator::Validate;

use crate::domain::card::{NewCard, UpdateCard};
use crate::domain::types::{CardStatus, CreditLimit, NonEmptyString};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/v1/cards`.
pub struct CreateCardForm {
    #[validate(range(min = 1))]
    pub issuer_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub holder_name: String,
    #[validate(length(min = 6, max = 8))]
    pub bin: String,
    #[validate(length(equal = 4))]
    pub pan_last4: String,
    pub kind: String,
    /// Initial status; cards are `ACTIVE` unless told otherwise.
    pub status: Option<String>,
    #[validate(range(min = 0))]
    pub credit_limit: Option<i64>,
}

impl CreateCardForm {
    pub fn into_new_card(self) -> Result<NewCard, FormError> {
        self.validate()?;

        let card = NewCard::try_new(
            self.issuer_id,
            self.holder_name,
            self.bin,
            self.pan_last4,
            &self.kind,
            self.credit_limit.unwrap_or_default(),
        )?;

        match self.status {
            Some(status) => Ok(card.with_status(status.parse::<CardStatus>()?)),
            None => Ok(card),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `PUT /api/v1/cards/{id}`. Omitted fields are left unchanged.
pub struct UpdateCardForm {
    #[validate(length(min = 1, max = 128))]
    pub holder_name: Option<String>,
    pub status: Option<String>,
    #[validate(range(min = 0))]
    pub credit_limit: Option<i64>,
}

impl UpdateCardForm {
    pub fn into_update_card(self) -> Result<UpdateCard, FormError> {
        self.validate()?;

        let update = UpdateCard {
            holder_name: self.holder_name.map(NonEmptyString::new).transpose()?,
            status: self
                .status
                .map(|status| status.parse::<CardStatus>())
                .transpose()?,
            credit_limit: self.credit_limit.map(CreditLimit::new).transpose()?,
        };

        if update.is_empty() {
            return Err(FormError::EmptyUpdate);
        }
        Ok(update)
    }
}
