//! Bidirectional mapping between domain reports and their stored rows.
//!
//! Writing is destructive-and-rebuild, not diff/merge: an update overwrites
//! the report scalars and then replaces the whole group/item tree. That keeps
//! the reconciliation trivial at the cost of dropping storage-only per-item
//! state (`has_issue`) on every update.

use crate::db::records::{GroupRow, ItemRow, ReportRow};
use crate::errors::{Error, Result};
use crate::models::{Report, ReportGroup, ReportItem};
use rusqlite::{Connection, params};
use tracing::debug;

/// Inserts a fresh report row plus its full group/item subtree.
///
/// Returns the new row id. Runs inside the repository's transaction; a
/// failure aborts the whole call, so no partial subtree is ever committed.
pub(crate) fn insert_report_record(conn: &Connection, report: &Report) -> Result<i64> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO reports (month_str, month, year, company, revenue, daily_average, \
             opening_balance, balance, running_balance, total_expenses)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(|e| Error::Persist(format!("Failed to prepare report insert: {}", e)))?;
    let report_id = stmt
        .insert(params![
            report.month_str,
            report.month,
            report.year,
            report.company,
            report.revenue,
            report.daily_average,
            report.opening_balance,
            report.balance,
            report.running_balance,
            report.total_expenses,
        ])
        .map_err(|e| {
            Error::Persist(format!(
                "Failed to insert report for '{}' {}/{}: {}",
                report.company, report.month, report.year, e
            ))
        })?;

    insert_group_subtree(conn, report_id, &report.groups)?;
    Ok(report_id)
}

/// Overwrites the stored report `report_id` with `report`.
///
/// Every scalar column is rewritten, then the existing child groups are
/// deleted (the cascade removes their items) and the subtree is rebuilt from
/// the domain value in its order.
pub(crate) fn overwrite_report(conn: &Connection, report_id: i64, report: &Report) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE reports SET month_str = ?1, month = ?2, year = ?3, company = ?4, \
             revenue = ?5, daily_average = ?6, opening_balance = ?7, balance = ?8, \
             running_balance = ?9, total_expenses = ?10
             WHERE id = ?11",
            params![
                report.month_str,
                report.month,
                report.year,
                report.company,
                report.revenue,
                report.daily_average,
                report.opening_balance,
                report.balance,
                report.running_balance,
                report.total_expenses,
                report_id,
            ],
        )
        .map_err(|e| Error::Persist(format!("Failed to update report {}: {}", report_id, e)))?;

    // The id came out of the lookup inside this same transaction, so a miss
    // here is a hard fault, not a race to paper over.
    if updated != 1 {
        return Err(Error::Persist(format!(
            "Stored report {} disappeared during update",
            report_id
        )));
    }

    let dropped_groups = conn
        .execute(
            "DELETE FROM report_groups WHERE report_id = ?1",
            params![report_id],
        )
        .map_err(|e| {
            Error::Persist(format!(
                "Failed to clear groups of report {}: {}",
                report_id, e
            ))
        })?;
    debug!(
        "Replaced {} stored groups of report {} with {} new ones",
        dropped_groups,
        report_id,
        report.groups.len()
    );

    insert_group_subtree(conn, report_id, &report.groups)
}

fn insert_group_subtree(conn: &Connection, report_id: i64, groups: &[ReportGroup]) -> Result<()> {
    let mut group_stmt = conn
        .prepare_cached(
            "INSERT INTO report_groups (report_id, group_number, title, amount, target, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| Error::Persist(format!("Failed to prepare group insert: {}", e)))?;
    let mut item_stmt = conn
        .prepare_cached(
            "INSERT INTO report_items (group_id, item_number, title, amount, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(|e| Error::Persist(format!("Failed to prepare item insert: {}", e)))?;

    for group in groups {
        // An absent target is stored as the 0 sentinel.
        let group_id = group_stmt
            .insert(params![
                report_id,
                group.group_number,
                group.title,
                group.amount,
                group.target.unwrap_or(0.0),
                group.note,
            ])
            .map_err(|e| {
                Error::Persist(format!(
                    "Failed to insert group {} of report {}: {}",
                    group.group_number, report_id, e
                ))
            })?;

        for item in &group.items {
            item_stmt
                .insert(params![
                    group_id,
                    item.item_number,
                    item.title,
                    item.amount,
                    item.note,
                ])
                .map_err(|e| {
                    Error::Persist(format!(
                        "Failed to insert item {} of group {}: {}",
                        item.item_number, group.group_number, e
                    ))
                })?;
        }
    }
    Ok(())
}

/// Rebuilds a domain [`Report`] from its stored row and child tables.
///
/// Storage iteration order is not meaningful, so children are ordered by
/// their explicit `group_number` / `item_number` keys here.
pub(crate) fn report_from_row(conn: &Connection, row: &ReportRow) -> Result<Report> {
    let groups = fetch_groups(conn, row.id)?;
    Ok(Report {
        month_str: row.month_str.clone(),
        month: row.month,
        year: row.year,
        company: row.company.clone(),
        revenue: row.revenue,
        daily_average: row.daily_average,
        opening_balance: row.opening_balance,
        balance: row.balance,
        running_balance: row.running_balance,
        total_expenses: row.total_expenses,
        groups,
    })
}

fn fetch_groups(conn: &Connection, report_id: i64) -> Result<Vec<ReportGroup>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM report_groups WHERE report_id = ?1 ORDER BY group_number",
            GroupRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Failed to prepare group fetch: {}", e)))?;
    let row_iter = stmt
        .query_map(params![report_id], GroupRow::from_row)
        .map_err(|e| {
            Error::Lookup(format!(
                "Failed to fetch groups of report {}: {}",
                report_id, e
            ))
        })?;

    let mut group_rows = Vec::new();
    for row_result in row_iter {
        group_rows
            .push(row_result.map_err(|e| {
                Error::Lookup(format!("Failed to map group row: {}", e))
            })?);
    }

    let mut groups = Vec::with_capacity(group_rows.len());
    for group_row in group_rows {
        let items = fetch_items(conn, group_row.id)?;
        groups.push(ReportGroup {
            group_number: group_row.group_number,
            title: group_row.title,
            amount: group_row.amount,
            target: if group_row.target == 0.0 {
                None
            } else {
                Some(group_row.target)
            },
            note: group_row.note,
            items,
        });
    }
    Ok(groups)
}

fn fetch_items(conn: &Connection, group_id: i64) -> Result<Vec<ReportItem>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {} FROM report_items WHERE group_id = ?1 ORDER BY item_number",
            ItemRow::SELECT_COLUMNS
        ))
        .map_err(|e| Error::Lookup(format!("Failed to prepare item fetch: {}", e)))?;
    let row_iter = stmt
        .query_map(params![group_id], ItemRow::from_row)
        .map_err(|e| {
            Error::Lookup(format!("Failed to fetch items of group {}: {}", group_id, e))
        })?;

    let mut items = Vec::new();
    for row_result in row_iter {
        let item_row = row_result
            .map_err(|e| Error::Lookup(format!("Failed to map item row: {}", e)))?;
        // has_issue stays behind in storage; the domain item has no slot for it.
        items.push(ReportItem {
            item_number: item_row.item_number,
            title: item_row.title,
            amount: item_row.amount,
            note: item_row.note,
        });
    }
    Ok(items)
}
