//! Shared helpers for integration tests.
#![allow(dead_code)]

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_cards::db::{DbPool, establish_connection_pool};
use pushkind_cards::domain::card::{Card, NewCard};
use pushkind_cards::domain::issuer::{Issuer, NewIssuer};
use pushkind_cards::domain::transaction::{NewTransaction, Transaction};
use pushkind_cards::repository::{CardWriter, DieselRepository, IssuerWriter, TransactionWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Migrated SQLite database living in a temporary directory.
///
/// The pool is declared first so its connections close before the directory
/// is removed.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("build connection pool");

        let mut conn = pool.get().expect("get connection");
        let conn: &mut SqliteConnection = &mut conn;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn issuer(repo: &DieselRepository, name: &str, country: &str) -> Issuer {
    let new_issuer = NewIssuer::try_new(name, country).expect("valid issuer");
    repo.create_issuer(&new_issuer).expect("create issuer")
}

pub fn card(
    repo: &DieselRepository,
    issuer: &Issuer,
    holder_name: &str,
    status: &str,
    credit_limit: i64,
) -> Card {
    let new_card = NewCard::try_new(
        issuer.id.get(),
        holder_name,
        "411111",
        "4242",
        "VIRTUAL",
        credit_limit,
    )
    .expect("valid card")
    .with_status(status.parse().expect("valid status"));
    repo.create_card(&new_card).expect("create card")
}

pub fn transaction(
    repo: &DieselRepository,
    card: &Card,
    amount: i64,
    status: &str,
    reference: Option<&str>,
) -> Transaction {
    let new_transaction = NewTransaction::try_new(card.id.get(), reference, amount, "EUR", "Cafe")
        .expect("valid transaction")
        .with_status(status.parse().expect("valid status"));
    repo.create_transaction(&new_transaction)
        .expect("create transaction")
}
