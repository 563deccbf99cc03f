//! Initial schema: companies, users, and balance sheets.
//!
//! SQLite is the default backend; PostgreSQL gets an equivalent script.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let statements = match manager.get_database_backend() {
            DbBackend::Sqlite => SQLITE_UP,
            DbBackend::Postgres => POSTGRES_UP,
            other => {
                return Err(DbErr::Migration(format!("unsupported backend: {other:?}")));
            }
        };

        let db = manager.get_connection();
        for sql in statements {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in ["balance_sheets", "users", "companies"] {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table}"))
                .await?;
        }
        Ok(())
    }
}

const SQLITE_UP: &[&str] = &[
    r"
    CREATE TABLE companies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        parent_group TEXT
    )",
    r"
    CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL CHECK (role IN ('analyst', 'ceo', 'groupadmin')),
        company_id INTEGER REFERENCES companies(id) ON DELETE SET NULL
    )",
    r"
    CREATE TABLE balance_sheets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
        year INTEGER NOT NULL,
        revenue REAL,
        assets REAL,
        liabilities REAL,
        profit REAL,
        UNIQUE (company_id, year)
    )",
    "CREATE INDEX idx_users_company ON users(company_id)",
    "CREATE INDEX idx_balance_sheets_year ON balance_sheets(year)",
];

const POSTGRES_UP: &[&str] = &[
    r"
    CREATE TABLE companies (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL UNIQUE,
        parent_group VARCHAR(255)
    )",
    r"
    CREATE TABLE users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(255) NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role VARCHAR(20) NOT NULL CHECK (role IN ('analyst', 'ceo', 'groupadmin')),
        company_id INTEGER REFERENCES companies(id) ON DELETE SET NULL
    )",
    r"
    CREATE TABLE balance_sheets (
        id SERIAL PRIMARY KEY,
        company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
        year INTEGER NOT NULL,
        revenue DOUBLE PRECISION,
        assets DOUBLE PRECISION,
        liabilities DOUBLE PRECISION,
        profit DOUBLE PRECISION,
        CONSTRAINT uq_balance_sheets_company_year UNIQUE (company_id, year)
    )",
    "CREATE INDEX idx_users_company ON users(company_id)",
    "CREATE INDEX idx_balance_sheets_year ON balance_sheets(year)",
];
