//! SQLite driver for the paged query engine.

use diesel::Connection;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{BigInt, Text, Timestamp};
use diesel::sqlite::Sqlite;

use crate::models::RowCount;
use crate::pagination::PageDescriptor;
use crate::query::{PageStorage, SelectQuery, SqlValue, Statement};
use crate::repository::DieselRepository;
use crate::repository::errors::{RepositoryError, RepositoryResult};

type BoxedQuery = BoxedSqlQuery<'static, Sqlite, SqlQuery>;

impl<R> PageStorage<R> for DieselRepository
where
    R: QueryableByName<Sqlite> + 'static,
{
    fn count_and_fetch(
        &self,
        query: &SelectQuery<'_>,
        page: &PageDescriptor,
    ) -> RepositoryResult<(u64, Vec<R>)> {
        let count = query.count();
        let fetch = query.fetch(page);

        let mut conn = self.conn()?;

        // Both statements run in one transaction so they read the same snapshot.
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let total = prepare(count).get_result::<RowCount>(conn)?.count;
            let rows = prepare(fetch).load::<R>(conn)?;

            let total = u64::try_from(total).map_err(|_| {
                RepositoryError::Unexpected(format!("negative row count: {total}"))
            })?;
            Ok((total, rows))
        })
    }
}

fn prepare(statement: Statement) -> BoxedQuery {
    log::debug!("{} -- binds: {:?}", statement.sql, statement.binds);

    statement
        .binds
        .into_iter()
        .fold(diesel::sql_query(statement.sql).into_boxed(), bind)
}

fn bind(query: BoxedQuery, value: SqlValue) -> BoxedQuery {
    match value {
        SqlValue::Text(value) => query.bind::<Text, _>(value),
        SqlValue::Integer(value) => query.bind::<BigInt, _>(value),
        SqlValue::Timestamp(value) => query.bind::<Timestamp, _>(value),
    }
}
