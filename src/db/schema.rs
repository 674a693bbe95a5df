use crate::errors::{Error, Result};
use rusqlite::Connection;
use tracing::{debug, info, instrument};

#[instrument(skip(conn))]
pub(crate) fn create_tables(conn: &Connection) -> Result<()> {
    debug!("Executing CREATE TABLE statements if tables do not exist.");
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            month_str TEXT NOT NULL,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL,
            company TEXT NOT NULL,
            revenue REAL NOT NULL,
            daily_average REAL NOT NULL,
            opening_balance REAL NOT NULL,
            balance REAL NOT NULL,
            running_balance REAL NOT NULL,
            total_expenses REAL NOT NULL
        );

        -- Lookup index only. (company, month, year) uniqueness is NOT declared
        -- here; the repository enforces it through its upsert.
        CREATE INDEX IF NOT EXISTS idx_reports_company_month_year
            ON reports(company, month, year);

        CREATE TABLE IF NOT EXISTS report_groups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            report_id INTEGER NOT NULL,
            group_number INTEGER NOT NULL,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            target REAL NOT NULL DEFAULT 0, -- 0 means no target was set
            note TEXT NOT NULL,
            FOREIGN KEY (report_id) REFERENCES reports (id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS report_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            group_id INTEGER NOT NULL,
            item_number INTEGER NOT NULL,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            note TEXT NOT NULL,
            has_issue BOOLEAN NOT NULL DEFAULT FALSE, -- set by review tooling, cleared on re-import
            FOREIGN KEY (group_id) REFERENCES report_groups (id) ON DELETE CASCADE
        );
        COMMIT;",
    )
    .map_err(|e| Error::Persist(format!("Failed to create tables: {}", e)))?;
    info!("Database tables ensured.");
    Ok(())
}
