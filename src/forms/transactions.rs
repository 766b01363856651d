use serde::Deserialize;
use validator::Validate;

use crate::domain::transaction::NewTransaction;
use crate::domain::types::TransactionStatus;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/v1/transactions`.
pub struct CreateTransactionForm {
    #[validate(range(min = 1))]
    pub card_id: i32,
    /// Network reference; generated when omitted.
    pub reference: Option<String>,
    /// Amount in minor units.
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(equal = 3))]
    pub currency: String,
    #[validate(length(min = 1, max = 255))]
    pub merchant: String,
    pub status: Option<String>,
}

impl CreateTransactionForm {
    pub fn into_new_transaction(self) -> Result<NewTransaction, FormError> {
        self.validate()?;

        let transaction = NewTransaction::try_new(
            self.card_id,
            self.reference.as_deref(),
            self.amount,
            self.currency,
            self.merchant,
        )?;

        match self.status {
            Some(status) => Ok(transaction.with_status(status.parse::<TransactionStatus>()?)),
            None => Ok(transaction),
        }
    }
}
