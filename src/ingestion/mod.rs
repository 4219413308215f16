//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_bytes`] (from [`unified`]) which:
//!
//! - detect the workbook format by file extension or leading bytes (or you can force one via
//!   [`IngestionOptions`])
//! - decode the input into an in-memory [`crate::types::Workbook`] of untyped rows
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - `excel` (requires the Cargo feature `excel`)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
mod header;
pub mod json;
pub mod observability;
pub mod unified;

/// Sheet name given to inputs that have no tabs of their own (CSV, JSON rows).
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    StdErrObserver,
};
pub use unified::{
    ingest_bytes, ingest_from_path, parse_workbook, severity_for_error, IngestionOptions, WorkbookFormat,
};
