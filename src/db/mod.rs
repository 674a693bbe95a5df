pub mod connection;
pub(crate) mod lookup;
pub(crate) mod mapper;
pub(crate) mod records;
pub mod reports;
pub(crate) mod schema;
#[cfg(test)]
pub(crate) mod test_utils;

pub use connection::{DbPool, init_db};
pub use reports::{delete_report, fetch_all_reports, insert_report};
