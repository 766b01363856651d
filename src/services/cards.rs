//! Card use cases.

use crate::domain::card::Card;
use crate::domain::types::CardId;
use crate::dto::api::ListParams;
use crate::forms::cards::{CreateCardForm, UpdateCardForm};
use crate::pagination::PageResponse;
use crate::repository::{CardReader, CardWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists cards matching the decoded query-string pairs.
pub fn list_cards<R>(
    repo: &R,
    pairs: Vec<(String, String)>,
    max_page_size: usize,
) -> ServiceResult<PageResponse<Card>>
where
    R: CardReader + ?Sized,
{
    let query = ListParams::from_query_pairs(pairs)?.into_list_query(max_page_size);

    repo.list_cards(&query).map_err(|err| {
        if !err.is_client_error() {
            log::error!("Failed to list cards: {err}");
        }
        ServiceError::from(err)
    })
}

pub fn get_card<R>(repo: &R, id: i32) -> ServiceResult<Card>
where
    R: CardReader + ?Sized,
{
    let id = CardId::new(id).map_err(|_| ServiceError::NotFound)?;

    repo.get_card_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load card {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_card<R>(repo: &R, form: CreateCardForm) -> ServiceResult<Card>
where
    R: CardWriter + ?Sized,
{
    let new_card = form.into_new_card()?;

    repo.create_card(&new_card).map_err(|err| {
        log::error!("Failed to create card: {err}");
        ServiceError::from(err)
    })
}

/// Applies a partial update. Unknown ids are reported as not found.
pub fn update_card<R>(repo: &R, id: i32, form: UpdateCardForm) -> ServiceResult<Card>
where
    R: CardWriter + ?Sized,
{
    let id = CardId::new(id).map_err(|_| ServiceError::NotFound)?;
    let updates = form.into_update_card()?;

    repo.update_card(id, &updates).map_err(|err| {
        if !err.is_not_found() {
            log::error!("Failed to update card {id}: {err}");
        }
        ServiceError::from(err)
    })
}

pub fn delete_card<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: CardWriter + ?Sized,
{
    let id = CardId::new(id).map_err(|_| ServiceError::NotFound)?;

    repo.delete_card(id).map_err(|err| {
        if !err.is_not_found() {
            log::error!("Failed to delete card {id}: {err}");
        }
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;

    use super::*;
    use crate::domain::types::{
        Bin, CardKind, CardStatus, CreditLimit, IssuerId, NonEmptyString, PanLast4,
    };
    use crate::query::QueryError;
    use crate::repository::errors::{RepositoryError, database_error};
    use crate::repository::mock::MockRepository;

    fn card(id: i32, status: CardStatus) -> Card {
        let now = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        Card {
            id: CardId::new(id).unwrap(),
            issuer_id: IssuerId::new(1).unwrap(),
            holder_name: NonEmptyString::new("Ada Lovelace").unwrap(),
            bin: Bin::new("411111").unwrap(),
            pan_last4: PanLast4::new("4242").unwrap(),
            kind: CardKind::Virtual,
            status,
            credit_limit: CreditLimit::new(0).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    fn create_form() -> CreateCardForm {
        CreateCardForm {
            issuer_id: 1,
            holder_name: "Ada Lovelace".into(),
            bin: "411111".into(),
            pan_last4: "4242".into(),
            kind: "VIRTUAL".into(),
            status: None,
            credit_limit: Some(1_000),
        }
    }

    #[test]
    fn storage_failures_are_internal() {
        let mut repo = MockRepository::new();
        repo.expect_list_cards().times(1).returning(|_| {
            Err(QueryError::Storage(RepositoryError::from(database_error(
                DatabaseErrorKind::Unknown,
                "database is locked",
            ))))
        });

        let result = list_cards(&repo, Vec::new(), 100);
        assert_eq!(result, Err(ServiceError::Internal));
    }

    #[test]
    fn invalid_sort_direction_is_rejected_before_repository() {
        let mut repo = MockRepository::new();
        repo.expect_list_cards().times(0);

        let pairs = vec![("sort".to_string(), "holderName,sideways".to_string())];
        assert!(matches!(
            list_cards(&repo, pairs, 100),
            Err(ServiceError::InvalidQuery(_))
        ));
    }

    #[test]
    fn get_returns_stored_card() {
        let mut repo = MockRepository::new();
        repo.expect_get_card_by_id()
            .withf(|id| id.get() == 7)
            .returning(|id| Ok(Some(card(id.get(), CardStatus::Active))));

        assert_eq!(get_card(&repo, 7).unwrap().id.get(), 7);
    }

    #[test]
    fn create_maps_constraint_violation_to_conflict() {
        let mut repo = MockRepository::new();
        repo.expect_create_card().times(1).returning(|_| {
            Err(RepositoryError::from(database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                "FOREIGN KEY constraint failed",
            )))
        });

        assert!(matches!(
            create_card(&repo, create_form()),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn create_rejects_unknown_kind_without_writing() {
        let mut repo = MockRepository::new();
        repo.expect_create_card().times(0);

        let form = CreateCardForm {
            kind: "METAL".into(),
            ..create_form()
        };
        assert!(matches!(
            create_card(&repo, form),
            Err(ServiceError::TypeConstraint(_))
        ));
    }

    #[test]
    fn update_forwards_only_supplied_fields() {
        let mut repo = MockRepository::new();
        repo.expect_update_card()
            .withf(|id, updates| {
                id.get() == 5
                    && updates.status == Some(CardStatus::Blocked)
                    && updates.holder_name.is_none()
                    && updates.credit_limit.is_none()
            })
            .times(1)
            .returning(|id, _| Ok(card(id.get(), CardStatus::Blocked)));

        let form = UpdateCardForm {
            status: Some("blocked".into()),
            ..UpdateCardForm::default()
        };
        let updated = update_card(&repo, 5, form).unwrap();
        assert_eq!(updated.status, CardStatus::Blocked);
    }

    #[test]
    fn empty_update_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_update_card().times(0);

        assert_eq!(
            update_card(&repo, 5, UpdateCardForm::default()),
            Err(ServiceError::Form("nothing to update".into()))
        );
    }

    #[test]
    fn deleting_missing_card_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_delete_card()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        assert_eq!(delete_card(&repo, 11), Err(ServiceError::NotFound));
    }
}
