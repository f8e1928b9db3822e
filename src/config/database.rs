//! Database configuration module for the donation ledger.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! The ledger persists its cart and donations as serialized blobs in a single key-value
//! table, so the schema is generated from the [`AppState`] entity alone.

use crate::config::settings;
use crate::entities::AppState;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

/// Establishes a connection to the `SQLite` database at `DATABASE_URL`.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = settings::database_url();
    ensure_parent_dir(&database_url)?;
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the directory holding a file-backed `SQLite` database, if needed.
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Creates the `app_state` table from its entity definition if it does not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut app_state_table = schema.create_table_from_entity(AppState);
    app_state_table.if_not_exists();

    db.execute(builder.build(&app_state_table)).await?;
    info!("Database tables ensured.");
    Ok(())
}

/// Connects to the configured database and ensures all tables exist.
pub async fn init_database() -> Result<DatabaseConnection> {
    let db = create_connection().await?;
    create_tables(&db).await?;
    Ok(db)
}
