//! Shared setup for repository integration tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use sheetwise_db::migration::Migrator;
use sheetwise_db::CompanyRepository;

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Creates the given companies in order, so IDs start at 1.
#[allow(dead_code)]
pub async fn seed_companies(db: &DatabaseConnection, names: &[&str]) {
    let repo = CompanyRepository::new(db.clone());
    for name in names {
        repo.create(name, Some("Reliance Group"))
            .await
            .expect("Failed to create company");
    }
}
