//! Database models and query field registries for the card tables.

use diesel::QueryableByName;

pub mod card;
pub mod config;
pub mod issuer;
pub mod transaction;

/// Result row of a `SELECT COUNT(*) AS count` statement.
#[derive(Debug, QueryableByName)]
pub struct RowCount {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub count: i64,
}
