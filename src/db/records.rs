//! Row shapes read back from the store.
//!
//! One struct per table, mirroring the columns exactly. The ownership chain
//! runs report -> group -> item through the `report_id` / `group_id`
//! back-references; rows are never shared between parents, and deleting a
//! parent cascades to everything below it.

use rusqlite::Row;

/// A row of the `reports` table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReportRow {
    pub(crate) id: i64,
    pub(crate) month_str: String,
    pub(crate) month: u32,
    pub(crate) year: i32,
    pub(crate) company: String,
    pub(crate) revenue: f64,
    pub(crate) daily_average: f64,
    pub(crate) opening_balance: f64,
    pub(crate) balance: f64,
    pub(crate) running_balance: f64,
    pub(crate) total_expenses: f64,
}

impl ReportRow {
    /// Columns in the order `from_row` reads them.
    pub(crate) const SELECT_COLUMNS: &str = "id, month_str, month, year, company, revenue, \
         daily_average, opening_balance, balance, running_balance, total_expenses";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            month_str: row.get(1)?,
            month: row.get(2)?,
            year: row.get(3)?,
            company: row.get(4)?,
            revenue: row.get(5)?,
            daily_average: row.get(6)?,
            opening_balance: row.get(7)?,
            balance: row.get(8)?,
            running_balance: row.get(9)?,
            total_expenses: row.get(10)?,
        })
    }
}

/// A row of the `report_groups` table.
///
/// `target` keeps the stored magnitude; 0 stands for "no target set" and is
/// translated to `None` by the mapper.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GroupRow {
    pub(crate) id: i64,
    pub(crate) report_id: i64,
    pub(crate) group_number: i64,
    pub(crate) title: String,
    pub(crate) amount: f64,
    pub(crate) target: f64,
    pub(crate) note: String,
}

impl GroupRow {
    pub(crate) const SELECT_COLUMNS: &str =
        "id, report_id, group_number, title, amount, target, note";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            report_id: row.get(1)?,
            group_number: row.get(2)?,
            title: row.get(3)?,
            amount: row.get(4)?,
            target: row.get(5)?,
            note: row.get(6)?,
        })
    }
}

/// A row of the `report_items` table.
///
/// `has_issue` exists only in storage - review tooling flags suspicious lines
/// here, and the domain model has no counterpart for it. A re-import rebuilds
/// the item rows and therefore clears the flag.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ItemRow {
    pub(crate) id: i64,
    pub(crate) group_id: i64,
    pub(crate) item_number: i64,
    pub(crate) title: String,
    pub(crate) amount: f64,
    pub(crate) note: String,
    pub(crate) has_issue: bool,
}

impl ItemRow {
    pub(crate) const SELECT_COLUMNS: &str =
        "id, group_id, item_number, title, amount, note, has_issue";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            group_id: row.get(1)?,
            item_number: row.get(2)?,
            title: row.get(3)?,
            amount: row.get(4)?,
            note: row.get(5)?,
            has_issue: row.get(6)?,
        })
    }
}
