use thiserror::Error;

/// Failures surfaced by the report store.
///
/// Storage errors are classified where they happen: read failures during the
/// natural-key search become [`Error::Lookup`], write/commit failures become
/// [`Error::Persist`]. There is deliberately no blanket
/// `From<rusqlite::Error>` impl, so a raw storage error cannot slip past the
/// classification via `?`.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store could not be read while searching for reports.
    /// Never collapsed into "not found".
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// The store could not be opened, written or committed.
    #[error("Persist error: {0}")]
    Persist(String),

    /// More than one stored report matched a natural key. The store only
    /// ever writes through the upsert, so this signals data corruption.
    #[error(
        "{count} stored reports share the key ('{company}', month {month}, year {year}); expected at most one"
    )]
    DuplicateNaturalKey {
        /// Company component of the offending key.
        company: String,
        /// Month component of the offending key.
        month: u32,
        /// Year component of the offending key.
        year: i32,
        /// How many rows matched.
        count: usize,
    },

    /// Filesystem error while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience `Result` type
/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
