//! Issuer use cases.

use crate::domain::issuer::Issuer;
use crate::domain::types::IssuerId;
use crate::dto::api::ListParams;
use crate::forms::issuers::CreateIssuerForm;
use crate::pagination::PageResponse;
use crate::repository::{IssuerReader, IssuerWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists issuers matching the decoded query-string pairs.
pub fn list_issuers<R>(
    repo: &R,
    pairs: Vec<(String, String)>,
    max_page_size: usize,
) -> ServiceResult<PageResponse<Issuer>>
where
    R: IssuerReader + ?Sized,
{
    let query = ListParams::from_query_pairs(pairs)?.into_list_query(max_page_size);

    repo.list_issuers(&query).map_err(|err| {
        if !err.is_client_error() {
            log::error!("Failed to list issuers: {err}");
        }
        ServiceError::from(err)
    })
}

pub fn get_issuer<R>(repo: &R, id: i32) -> ServiceResult<Issuer>
where
    R: IssuerReader + ?Sized,
{
    let id = IssuerId::new(id).map_err(|_| ServiceError::NotFound)?;

    repo.get_issuer_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load issuer {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

pub fn create_issuer<R>(repo: &R, form: CreateIssuerForm) -> ServiceResult<Issuer>
where
    R: IssuerWriter + ?Sized,
{
    let new_issuer = form.into_new_issuer()?;

    repo.create_issuer(&new_issuer).map_err(|err| {
        log::error!("Failed to create issuer: {err}");
        ServiceError::from(err)
    })
}
