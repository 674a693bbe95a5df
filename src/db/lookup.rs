//! Natural-key lookup for stored reports.

use crate::errors::{Error, Result};
use crate::models::Report;
use rusqlite::{Connection, params};
use tracing::{debug, warn};

/// Finds the stored report matching `report`'s natural key
/// (company, month, year).
///
/// At most one row should ever match - the repository only writes through the
/// upsert. More than one match means that invariant was broken at some
/// earlier point, and is surfaced as [`Error::DuplicateNaturalKey`] rather
/// than silently picking a row. A failed read propagates as
/// [`Error::Lookup`], never as "not found".
pub(crate) fn find_report_id(conn: &Connection, report: &Report) -> Result<Option<i64>> {
    let mut stmt = conn
        .prepare_cached("SELECT id FROM reports WHERE company = ?1 AND month = ?2 AND year = ?3")
        .map_err(|e| Error::Lookup(format!("Failed to prepare natural-key lookup: {}", e)))?;

    let id_iter = stmt
        .query_map(params![report.company, report.month, report.year], |row| {
            row.get(0)
        })
        .map_err(|e| {
            Error::Lookup(format!(
                "Natural-key lookup failed for '{}' {}/{}: {}",
                report.company, report.month, report.year, e
            ))
        })?;

    let mut ids: Vec<i64> = Vec::new();
    for id_result in id_iter {
        ids.push(
            id_result
                .map_err(|e| Error::Lookup(format!("Failed to read matched report id: {}", e)))?,
        );
    }

    match ids.as_slice() {
        [] => Ok(None),
        [id] => {
            debug!(
                "Found stored report {} for '{}' {}/{}",
                id, report.company, report.month, report.year
            );
            Ok(Some(*id))
        }
        _ => {
            warn!(
                "{} stored reports share the key ('{}', {}, {})",
                ids.len(),
                report.company,
                report.month,
                report.year
            );
            Err(Error::DuplicateNaturalKey {
                company: report.company.clone(),
                month: report.month,
                year: report.year,
                count: ids.len(),
            })
        }
    }
}
