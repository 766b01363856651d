//! Repository implementation for cards.

use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        card::{Card, NewCard, UpdateCard},
        types::CardId,
    },
    models::card::{
        CARD_FIELDS, Card as DbCard, NewCard as DbNewCard, UpdateCard as DbUpdateCard,
    },
    pagination::PageResponse,
    query::{QueryError, QueryResult, find_page},
    repository::{
        CardReader, CardWriter, DieselRepository, ListQuery,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl CardReader for DieselRepository {
    fn get_card_by_id(&self, id: CardId) -> RepositoryResult<Option<Card>> {
        use crate::schema::cards;

        let mut conn = self.conn()?;
        let db_card = cards::table
            .find(id.get())
            .first::<DbCard>(&mut conn)
            .optional()?;

        db_card
            .map(Card::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_cards(&self, query: &ListQuery) -> QueryResult<PageResponse<Card>> {
        find_page(
            self,
            &CARD_FIELDS,
            &query.filter,
            &query.page,
            query.max_page_size,
            |row: DbCard| Card::try_from(row),
        )?
        .transpose()
        .map_err(|err| QueryError::Storage(err.into()))
    }
}

impl CardWriter for DieselRepository {
    fn create_card(&self, new_card: &NewCard) -> RepositoryResult<Card> {
        use crate::schema::cards;

        let mut conn = self.conn()?;
        let db_new_card = DbNewCard::from(new_card);

        let db_card = diesel::insert_into(cards::table)
            .values(&db_new_card)
            .get_result::<DbCard>(&mut conn)?;

        Card::try_from(db_card).map_err(RepositoryError::from)
    }

    fn update_card(&self, id: CardId, updates: &UpdateCard) -> RepositoryResult<Card> {
        use crate::schema::cards;

        let mut conn = self.conn()?;
        let changes = DbUpdateCard::new(updates, Utc::now().naive_utc());

        let db_card = diesel::update(cards::table.find(id.get()))
            .set(&changes)
            .get_result::<DbCard>(&mut conn)?;

        Card::try_from(db_card).map_err(RepositoryError::from)
    }

    fn delete_card(&self, id: CardId) -> RepositoryResult<()> {
        use crate::schema::cards;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(cards::table.find(id.get())).execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
