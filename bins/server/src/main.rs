//! Sheetwise API Server
//!
//! Main entry point for the balance-sheet service.

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetwise_api::{AppState, create_router};
use sheetwise_core::qa::ChatCompletionClient;
use sheetwise_db::{connect, migration::Migrator};
use sheetwise_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetwise=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect(&config.database).await?;
    Migrator::up(&db, None).await?;
    info!("Database schema is up to date");

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        access_token_expires_secs: i64::try_from(config.jwt.access_token_expiry_secs)?,
    });

    let llm = ChatCompletionClient::new(&config.llm)?;
    info!(
        endpoint = %llm.endpoint(),
        model = %config.llm.model,
        "Language model configured"
    );

    let upload_dir = PathBuf::from(&config.uploads.dir);
    tokio::fs::create_dir_all(&upload_dir).await?;

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        llm: Arc::new(llm),
        upload_dir: Arc::new(upload_dir),
        max_upload_bytes: config.uploads.max_bytes,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
