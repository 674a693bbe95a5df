use crate::db::schema::create_tables;
use crate::errors::{Error, Result};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument};

/// Shared handle to the single store connection.
///
/// Every repository call locks the mutex for its whole duration, which is
/// what serializes the multi-step child-tree replacement: no caller can
/// observe a report halfway through an update.
pub type DbPool = Arc<Mutex<Connection>>;

/// Opens (creating if needed) the report database at `db_path`.
#[instrument]
pub async fn init_db(db_path: &str) -> Result<DbPool> {
    debug!("Initializing database connection to: {}", db_path);
    let conn = Connection::open(db_path)
        .map_err(|e| Error::Persist(format!("Failed to open database at {}: {}", db_path, e)))?;

    // Deleting a report must take its groups and items with it; that runs on
    // the FK cascades, which SQLite only honors with this pragma set.
    conn.execute("PRAGMA foreign_keys = ON;", [])
        .map_err(|e| Error::Persist(format!("Failed to enable foreign keys: {}", e)))?;

    info!("Database connection opened. Ensuring tables are created...");
    create_tables(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}
