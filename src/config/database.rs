//! Database configuration module for the campaign ledger.
//!
//! Handles `SQLite` connection setup and creates the `ledger_slots` table with
//! `SeaORM`'s `Schema::create_table_from_entity`, so the schema always matches
//! the entity definition without hand-written SQL.

use crate::entities::LedgerSlot;
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/heartchain_ledger.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, or the
/// default local `SQLite` file.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    ensure_sqlite_parent_dir(&database_url)?;
    debug!("Connecting to database at {}", database_url);
    let db = Database::connect(&database_url).await?;
    info!("Database connection established.");
    Ok(db)
}

/// Creates the directory holding a file-backed `SQLite` database, so a fresh
/// checkout can start without a `data/` folder.
fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Creates the ledger tables if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut slot_table = schema.create_table_from_entity(LedgerSlot);
    slot_table.if_not_exists();

    db.execute(builder.build(&slot_table)).await?;

    Ok(())
}
