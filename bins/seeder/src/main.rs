//! Database seeder for Sheetwise development and demos.
//!
//! Seeds the Reliance Group companies, one user per role, and two years of
//! balance sheets per company. Safe to run repeatedly: existing companies
//! and users are left alone and balance sheets are upserted.
//!
//! Usage: `DATABASE_URL=sqlite://sheetwise.db?mode=rwc cargo run --bin seeder`
//! (run the migrator first).

use anyhow::Context;
use sea_orm::DatabaseConnection;

use sheetwise_core::auth::{Role, hash_password};
use sheetwise_core::records::{BalanceFigures, RecordStore};
use sheetwise_db::{BalanceSheetRepository, CompanyRepository, UserRepository};
use sheetwise_shared::config::DatabaseConfig;

const GROUP: &str = "Reliance Group";

const COMPANIES: [&str; 3] = ["Reliance Retail", "Jio Platforms", "Reliance Industries"];

/// (username, password, role, company)
const USERS: [(&str, &str, Role, Option<&str>); 5] = [
    ("rajiv", "pass123", Role::Analyst, Some("Reliance Retail")),
    ("sneha", "pass123", Role::Analyst, Some("Jio Platforms")),
    ("amit", "pass123", Role::Ceo, Some("Reliance Retail")),
    ("ramesh", "pass123", Role::Ceo, Some("Jio Platforms")),
    ("ambani", "ambani123", Role::GroupAdmin, None),
];

/// (company, year, revenue, assets, liabilities, profit)
const BALANCE_SHEETS: [(&str, i32, f64, f64, f64, f64); 6] = [
    ("Reliance Retail", 2022, 220_000.0, 500_000.0, 200_000.0, 30_000.0),
    ("Reliance Retail", 2023, 260_000.0, 520_000.0, 210_000.0, 35_000.0),
    ("Jio Platforms", 2022, 180_000.0, 400_000.0, 150_000.0, 25_000.0),
    ("Jio Platforms", 2023, 202_000.0, 420_000.0, 160_000.0, 28_000.0),
    ("Reliance Industries", 2022, 450_000.0, 1_000_000.0, 600_000.0, 70_000.0),
    ("Reliance Industries", 2023, 480_000.0, 1_050_000.0, 620_000.0, 75_000.0),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = sheetwise_db::connect(&DatabaseConfig {
        url,
        max_connections: 1,
        min_connections: 1,
    })
    .await?;

    println!("Seeding companies...");
    seed_companies(&db).await?;

    println!("Seeding users...");
    seed_users(&db).await?;

    println!("Seeding balance sheets...");
    seed_balance_sheets(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_companies(db: &DatabaseConnection) -> anyhow::Result<()> {
    let store = BalanceSheetRepository::new(db.clone());
    let companies = CompanyRepository::new(db.clone());

    for name in COMPANIES {
        if store.find_company_by_name(name).await?.is_some() {
            println!("  {name} already exists, skipping...");
            continue;
        }
        companies.create(name, Some(GROUP)).await?;
        println!("  Created company: {name}");
    }
    Ok(())
}

async fn seed_users(db: &DatabaseConnection) -> anyhow::Result<()> {
    let store = BalanceSheetRepository::new(db.clone());
    let users = UserRepository::new(db.clone());

    for (username, password, role, company) in USERS {
        if users.find_by_username(username).await?.is_some() {
            println!("  {username} already exists, skipping...");
            continue;
        }

        let company_id = match company {
            Some(name) => Some(
                store
                    .find_company_by_name(name)
                    .await?
                    .with_context(|| format!("company '{name}' is missing"))?
                    .id,
            ),
            None => None,
        };

        let hash = hash_password(password)?;
        users.create(username, &hash, role, company_id).await?;
        println!("  Created {role} user: {username}");
    }
    Ok(())
}

async fn seed_balance_sheets(db: &DatabaseConnection) -> anyhow::Result<()> {
    let store = BalanceSheetRepository::new(db.clone());

    for (company, year, revenue, assets, liabilities, profit) in BALANCE_SHEETS {
        store
            .upsert_by_company_name(
                company,
                year,
                BalanceFigures::new(revenue, assets, liabilities, profit),
            )
            .await?;
        println!("  Balance sheet added/updated for {company} ({year})");
    }
    Ok(())
}
