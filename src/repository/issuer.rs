//! Repository implementation for card issuers.

use diesel::prelude::*;

use crate::{
    domain::{
        issuer::{Issuer, NewIssuer},
        types::IssuerId,
    },
    models::issuer::{ISSUER_FIELDS, Issuer as DbIssuer, NewIssuer as DbNewIssuer},
    pagination::PageResponse,
    query::{QueryError, QueryResult, find_page},
    repository::{
        DieselRepository, IssuerReader, IssuerWriter, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl IssuerReader for DieselRepository {
    fn get_issuer_by_id(&self, id: IssuerId) -> RepositoryResult<Option<Issuer>> {
        use crate::schema::issuers;

        let mut conn = self.conn()?;
        let db_issuer = issuers::table
            .find(id.get())
            .first::<DbIssuer>(&mut conn)
            .optional()?;

        db_issuer
            .map(Issuer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_issuers(&self, query: &ListQuery) -> QueryResult<PageResponse<Issuer>> {
        let page = find_page(
            self,
            &ISSUER_FIELDS,
            &query.filter,
            &query.page,
            query.max_page_size,
            |row: DbIssuer| Issuer::try_from(row),
        )?;

        page.transpose()
            .map_err(|err| QueryError::Storage(RepositoryError::from(err)))
    }
}

impl IssuerWriter for DieselRepository {
    fn create_issuer(&self, new_issuer: &NewIssuer) -> RepositoryResult<Issuer> {
        use crate::schema::issuers;

        let mut conn = self.conn()?;

        let db_issuer = diesel::insert_into(issuers::table)
            .values(&DbNewIssuer::from(new_issuer))
            .get_result::<DbIssuer>(&mut conn)?;

        Issuer::try_from(db_issuer).map_err(RepositoryError::from)
    }
}
