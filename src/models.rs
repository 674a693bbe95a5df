//! Domain model for parsed monthly reports.
//!
//! These are pure value types with no persistence knowledge. Equality is
//! structural, which is what lets callers assert that a report read back from
//! the store matches the report that went in.

use serde::{Deserialize, Serialize};

/// One month of figures for one company.
///
/// `(company, month, year)` is the report's identity; everything else is
/// payload. Groups keep the order the parser produced them in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Report {
    /// Display label for the month as it appeared in the source text
    pub month_str: String,
    /// Month number, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Company name - part of the natural key
    pub company: String,
    /// Total revenue for the month
    pub revenue: f64,
    /// Average daily revenue
    pub daily_average: f64,
    /// Balance carried in from the previous month
    pub opening_balance: f64,
    /// Closing balance for the month
    pub balance: f64,
    /// Running balance across months
    pub running_balance: f64,
    /// Sum of all expense groups
    pub total_expenses: f64,
    /// Expense groups, in report order
    pub groups: Vec<ReportGroup>,
}

/// A titled block of line items within a report.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportGroup {
    /// Position of the group within its report
    pub group_number: i64,
    /// Group heading (e.g. "Running costs")
    pub title: String,
    /// Group total
    pub amount: f64,
    /// Budget target for the group, if one was set
    pub target: Option<f64>,
    /// Free-form annotation from the source text
    pub note: String,
    /// Line items, in report order
    pub items: Vec<ReportItem>,
}

/// A single expense line within a group.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReportItem {
    /// Position of the item within its group
    pub item_number: i64,
    /// Item label
    pub title: String,
    /// Item amount
    pub amount: f64,
    /// Free-form annotation from the source text
    pub note: String,
}
