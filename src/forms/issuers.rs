use serde::Deserialize;
use validator::Validate;

use crate::domain::issuer::NewIssuer;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Body of `POST /api/v1/issuers`.
pub struct CreateIssuerForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    #[validate(length(equal = 2))]
    pub country: String,
}

impl CreateIssuerForm {
    pub fn into_new_issuer(self) -> Result<NewIssuer, FormError> {
        self.validate()?;
        Ok(NewIssuer::try_new(self.name, self.country)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_is_normalized() {
        let form = CreateIssuerForm {
            name: " First Bank ".into(),
            country: "de".into(),
        };
        let issuer = form.into_new_issuer().unwrap();
        assert_eq!(issuer.name.as_str(), "First Bank");
        assert_eq!(issuer.country.as_str(), "DE");
    }

    #[test]
    fn wrong_country_length_fails_validation() {
        let form = CreateIssuerForm {
            name: "First Bank".into(),
            country: "DEU".into(),
        };
        assert!(matches!(
            form.into_new_issuer(),
            Err(FormError::Validation(_))
        ));
    }
}
