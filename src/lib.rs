//! `ReportStore` - embedded storage for parsed monthly business reports
//!
//! This crate persists `Report` domain values (a month of figures for one
//! company, broken down into expense groups and line items) in a local
//! `SQLite` database. Reports are identified by their natural key
//! (company, month, year) rather than a surrogate id: inserting a report
//! whose key already exists overwrites the stored scalars and replaces the
//! stored group/item tree wholesale, so the store never holds two reports
//! for the same company and month.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Configuration management for database path resolution
pub mod config;
/// Storage layer - schema, natural-key lookup, record mapping and the report repository
pub mod db;
/// Unified error types and result handling
pub mod errors;
/// Domain model - reports, expense groups and line items
pub mod models;
