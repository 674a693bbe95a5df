//! The report repository: upsert, fetch-all and delete keyed by
//! (company, month, year).
//!
//! All operations run against the single shared connection and are atomic
//! per call - one transaction each, committed on success and rolled back on
//! drop otherwise. The functions are `async` so callers get a deferred
//! result; the work itself is local and synchronous under the pool lock,
//! which is what serializes concurrent callers.

use crate::db::connection::DbPool;
use crate::db::lookup::find_report_id;
use crate::db::mapper::{insert_report_record, overwrite_report, report_from_row};
use crate::db::records::ReportRow;
use crate::errors::{Error, Result};
use crate::models::Report;
use rusqlite::params;
use tracing::{debug, info, instrument};

/// Inserts `report`, or overwrites the stored report with the same natural
/// key if one exists.
///
/// The lookup and the write happen inside one transaction, so the
/// read-modify-write cannot race with another call on the same pool and the
/// store never ends up with two reports for one key.
#[instrument(skip(pool, report), fields(company = %report.company, month = report.month, year = report.year))]
pub async fn insert_report(pool: &DbPool, report: &Report) -> Result<()> {
    let mut conn = pool
        .lock()
        .map_err(|_| Error::Persist("Failed to acquire DB lock for insert".to_string()))?;
    let tx = conn
        .transaction()
        .map_err(|e| Error::Persist(format!("Failed to start transaction: {}", e)))?;

    match find_report_id(&tx, report)? {
        Some(report_id) => {
            overwrite_report(&tx, report_id, report)?;
            info!(
                "Updated stored report {} for '{}' {}/{} in place",
                report_id, report.company, report.month, report.year
            );
        }
        None => {
            let report_id = insert_report_record(&tx, report)?;
            info!(
                "Created stored report {} for '{}' {}/{}",
                report_id, report.company, report.month, report.year
            );
        }
    }

    tx.commit()
        .map_err(|e| Error::Persist(format!("Failed to commit insert transaction: {}", e)))
}

/// Reads every stored report back as a domain value.
///
/// Reports are ordered by (year, month, company); groups and items inside
/// each report by their own ordering keys.
#[instrument(skip(pool))]
pub async fn fetch_all_reports(pool: &DbPool) -> Result<Vec<Report>> {
    let conn = pool
        .lock()
        .map_err(|_| Error::Persist("Failed to acquire DB lock for fetch".to_string()))?;

    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM reports ORDER BY year, month, company",
            ReportRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Failed to prepare report fetch: {}", e)))?;
    let row_iter = stmt
        .query_map([], ReportRow::from_row)
        .map_err(|e| Error::Lookup(format!("Failed to fetch reports: {}", e)))?;

    let mut rows = Vec::new();
    for row_result in row_iter {
        rows.push(
            row_result.map_err(|e| Error::Lookup(format!("Failed to map report row: {}", e)))?,
        );
    }

    let mut reports = Vec::with_capacity(rows.len());
    for row in &rows {
        reports.push(report_from_row(&conn, row)?);
    }

    debug!("Fetched {} reports.", reports.len());
    Ok(reports)
}

/// Deletes the stored report matching `report`'s natural key, cascading to
/// its groups and items.
///
/// Returns `true` if a report was removed. Deleting a key that is not stored
/// is a successful no-op returning `false`.
#[instrument(skip(pool, report), fields(company = %report.company, month = report.month, year = report.year))]
pub async fn delete_report(pool: &DbPool, report: &Report) -> Result<bool> {
    let mut conn = pool
        .lock()
        .map_err(|_| Error::Persist("Failed to acquire DB lock for delete".to_string()))?;
    let tx = conn
        .transaction()
        .map_err(|e| Error::Persist(format!("Failed to start transaction: {}", e)))?;

    let deleted = match find_report_id(&tx, report)? {
        Some(report_id) => {
            // Groups and items go with the report via the FK cascades.
            tx.execute("DELETE FROM reports WHERE id = ?1", params![report_id])
                .map_err(|e| {
                    Error::Persist(format!("Failed to delete report {}: {}", report_id, e))
                })?;
            info!(
                "Deleted stored report {} for '{}' {}/{}",
                report_id, report.company, report.month, report.year
            );
            true
        }
        None => {
            debug!(
                "No stored report for '{}' {}/{}; nothing to delete",
                report.company, report.month, report.year
            );
            false
        }
    };

    tx.commit()
        .map_err(|e| Error::Persist(format!("Failed to commit delete transaction: {}", e)))?;
    Ok(deleted)
}
