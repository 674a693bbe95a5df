#![allow(dead_code)]
use crate::db::records::{GroupRow, ItemRow, ReportRow};
use crate::db::{DbPool, schema};
use crate::errors::{Error, Result};
use crate::models::{Report, ReportGroup, ReportItem};
use rusqlite::{Connection, params};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")), // Default to TRACE for tests if RUST_LOG is not set
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

/// Fresh in-memory connection with the schema applied and FK cascades armed.
pub(crate) fn setup_test_conn() -> Result<Connection> {
    let conn = Connection::open_in_memory()
        .map_err(|e| Error::Persist(format!("Test DB: Failed to open in-memory: {}", e)))?;
    conn.execute("PRAGMA foreign_keys = ON;", [])
        .map_err(|e| Error::Persist(format!("Test DB: Failed to enable foreign keys: {}", e)))?;
    schema::create_tables(&conn)?;
    Ok(conn)
}

// Helper to create an in-memory DbPool for testing
pub(crate) async fn setup_test_db() -> Result<DbPool> {
    let conn = setup_test_conn()?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Domain fixture with deterministic scalars derived from the key, so two
/// fixtures with the same arguments compare equal.
pub(crate) fn sample_report(
    company: &str,
    month: u32,
    year: i32,
    groups: Vec<ReportGroup>,
) -> Report {
    let revenue = f64::from(month) * 100_000.0;
    Report {
        month_str: MONTH_NAMES
            .get(month as usize - 1)
            .unwrap_or(&"Unknown")
            .to_string(),
        month,
        year,
        company: company.to_string(),
        revenue,
        daily_average: revenue / 30.0,
        opening_balance: 10_000.0,
        balance: 12_345.67,
        running_balance: 54_321.0,
        total_expenses: revenue * 0.8,
        groups,
    }
}

pub(crate) fn sample_group(
    group_number: i64,
    title: &str,
    target: Option<f64>,
    items: Vec<ReportItem>,
) -> ReportGroup {
    let amount = items.iter().map(|i| i.amount).sum();
    ReportGroup {
        group_number,
        title: title.to_string(),
        amount,
        target,
        note: format!("{} as parsed", title),
        items,
    }
}

pub(crate) fn sample_item(item_number: i64, title: &str, amount: f64) -> ReportItem {
    ReportItem {
        item_number,
        title: title.to_string(),
        amount,
        note: String::new(),
    }
}

// Direct row inserts bypass the repository on purpose: tests use them to
// plant states the upsert itself would never produce (duplicate keys,
// scrambled child order).
pub(crate) fn direct_insert_report_row(
    conn: &Connection,
    company: &str,
    month: u32,
    year: i32,
) -> Result<i64> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO reports (month_str, month, year, company, revenue, daily_average, \
             opening_balance, balance, running_balance, total_expenses)
             VALUES (?1, ?2, ?3, ?4, 0, 0, 0, 0, 0, 0)",
        )
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))?;
    stmt.insert(params![format!("{:02}/{}", month, year), month, year, company])
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))
}

pub(crate) fn direct_insert_group_row(
    conn: &Connection,
    report_id: i64,
    group_number: i64,
) -> Result<i64> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO report_groups (report_id, group_number, title, amount, target, note)
             VALUES (?1, ?2, ?3, 0, 0, '')",
        )
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))?;
    stmt.insert(params![report_id, group_number, format!("Group {}", group_number)])
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))
}

pub(crate) fn direct_insert_item_row(
    conn: &Connection,
    group_id: i64,
    item_number: i64,
) -> Result<i64> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO report_items (group_id, item_number, title, amount, note)
             VALUES (?1, ?2, ?3, 0, '')",
        )
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))?;
    stmt.insert(params![group_id, item_number, format!("Item {}", item_number)])
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))
}

// Helper to fetch a raw report row by id for test verification
pub(crate) fn fetch_report_row(conn: &Connection, id: i64) -> Result<ReportRow> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM reports WHERE id = ?1",
            ReportRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))?;
    stmt.query_row(params![id], ReportRow::from_row)
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))
}

// Raw child-row readback for verifying the ownership chain and the
// storage-only columns the domain model never sees.
pub(crate) fn fetch_group_rows(conn: &Connection, report_id: i64) -> Result<Vec<GroupRow>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM report_groups WHERE report_id = ?1 ORDER BY group_number",
            GroupRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))?;
    let rows = stmt
        .query_map(params![report_id], GroupRow::from_row)
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))
}

pub(crate) fn fetch_item_rows(conn: &Connection, group_id: i64) -> Result<Vec<ItemRow>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM report_items WHERE group_id = ?1 ORDER BY item_number",
            ItemRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))?;
    let rows = stmt
        .query_map(params![group_id], ItemRow::from_row)
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))
}

pub(crate) fn count_reports(conn: &Connection) -> Result<i64> {
    count_rows(conn, "SELECT COUNT(*) FROM reports")
}

pub(crate) fn count_groups(conn: &Connection) -> Result<i64> {
    count_rows(conn, "SELECT COUNT(*) FROM report_groups")
}

pub(crate) fn count_items(conn: &Connection) -> Result<i64> {
    count_rows(conn, "SELECT COUNT(*) FROM report_items")
}

pub(crate) fn count_flagged_items(conn: &Connection) -> Result<i64> {
    count_rows(conn, "SELECT COUNT(*) FROM report_items WHERE has_issue = TRUE")
}

fn count_rows(conn: &Connection, sql: &str) -> Result<i64> {
    conn.query_row(sql, [], |row| row.get(0))
        .map_err(|e| Error::Lookup(format!("Test DB: {}", e)))
}

/// Marks every stored item as suspicious, the way external review tooling
/// would, to exercise the lossy full-replace behavior.
pub(crate) fn flag_all_items(conn: &Connection) -> Result<usize> {
    conn.execute("UPDATE report_items SET has_issue = TRUE", [])
        .map_err(|e| Error::Persist(format!("Test DB: {}", e)))
}
