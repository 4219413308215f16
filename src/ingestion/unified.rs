//! Unified ingestion entrypoints.
//!
//! Most callers should use [`ingest_from_path`] or [`ingest_bytes`], which decode an uploaded
//! file into a [`crate::types::Workbook`].
//!
//! - If [`IngestionOptions::format`] is `None`, the format is inferred from the file extension
//!   ([`ingest_from_path`]) or sniffed from the leading bytes ([`ingest_bytes`]).
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::Workbook;

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json};

/// Supported workbook formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Comma-separated values.
    Csv,
    /// JSON rows (array-of-objects, sheet map, or NDJSON).
    Json,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl WorkbookFormat {
    /// Parse a workbook format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "ndjson" => Some(Self::Json),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Guess the format from the leading bytes of a file.
    ///
    /// Zip (xlsx/xlsm/ods) and OLE (xls) containers are Excel; input starting with `[` or `{`
    /// is JSON; anything else is treated as CSV.
    pub fn sniff(bytes: &[u8]) -> Self {
        const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
        const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            return Self::Excel;
        }
        let first = bytes
            .strip_prefix(b"\xEF\xBB\xBF")
            .unwrap_or(bytes)
            .iter()
            .copied()
            .find(|b| !b.is_ascii_whitespace());
        match first {
            Some(b'[' | b'{') => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, detect the format from the extension or the leading bytes.
    pub format: Option<WorkbookFormat>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Decode workbook bytes of a known format.
pub fn parse_workbook(bytes: &[u8], format: WorkbookFormat) -> AnalysisResult<Workbook> {
    match format {
        WorkbookFormat::Csv => Ok(Workbook::new(vec![csv::parse_csv_bytes(bytes)?])),
        WorkbookFormat::Json => {
            let text = std::str::from_utf8(bytes).map_err(|e| AnalysisError::InvalidWorkbook {
                message: format!("json input is not valid utf-8: {e}"),
            })?;
            json::parse_json_str(text)
        }
        WorkbookFormat::Excel => parse_excel_dispatch(bytes),
    }
}

/// Unified ingestion entry point for in-memory uploads.
///
/// If `options.format` is `None`, the format is sniffed with [`WorkbookFormat::sniff`].
pub fn ingest_bytes(bytes: &[u8], options: &IngestionOptions) -> AnalysisResult<Workbook> {
    let format = options.format.unwrap_or_else(|| WorkbookFormat::sniff(bytes));
    let ctx = IngestionContext {
        source: PathBuf::from("<memory>"),
        format: Some(format),
    };
    let result = parse_workbook(bytes, format);
    report(options, &ctx, &result);
    result
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, the format is inferred from the file extension, falling back
///   to sniffing the content when the extension is missing or unknown.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with sheet/row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use sheet_analytics::ingestion::{ingest_from_path, IngestionOptions, IngestionSeverity, StdErrObserver};
///
/// # fn main() -> Result<(), sheet_analytics::AnalysisError> {
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(StdErrObserver::default())),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// let wb = ingest_from_path("uploads/sales.csv", &opts)?;
/// println!("sheets={:?}", wb.sheet_names());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> AnalysisResult<Workbook> {
    let path = path.as_ref();
    let extension_format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(WorkbookFormat::from_extension);

    let mut ctx = IngestionContext {
        source: path.to_path_buf(),
        format: options.format.or(extension_format),
    };

    let result = fs::read(path).map_err(AnalysisError::from).and_then(|bytes| {
        let format = ctx.format.unwrap_or_else(|| WorkbookFormat::sniff(&bytes));
        ctx.format = Some(format);
        parse_workbook(&bytes, format)
    });

    report(options, &ctx, &result);
    result
}

fn report(options: &IngestionOptions, ctx: &IngestionContext, result: &AnalysisResult<Workbook>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(wb) => obs.on_success(
            ctx,
            IngestionStats {
                sheets: wb.sheets.len(),
                rows: wb.sheets.iter().map(|s| s.row_count()).sum(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

/// Severity used when reporting `e` to an observer.
pub fn severity_for_error(e: &AnalysisError) -> IngestionSeverity {
    match e {
        AnalysisError::Io(_) => IngestionSeverity::Critical,
        AnalysisError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        #[cfg(feature = "excel")]
        AnalysisError::Excel(err) => {
            // calamine wraps I/O failures in several ways; walk the chain.
            if error_chain_contains_io(err) {
                IngestionSeverity::Critical
            } else {
                IngestionSeverity::Error
            }
        }
        #[cfg(feature = "export")]
        AnalysisError::Xlsx(_) => IngestionSeverity::Error,
        AnalysisError::InvalidOperator { .. } => IngestionSeverity::Warning,
        AnalysisError::Json(_)
        | AnalysisError::UnsupportedFormat { .. }
        | AnalysisError::InvalidWorkbook { .. }
        | AnalysisError::InvalidFileName { .. } => IngestionSeverity::Error,
    }
}

#[cfg_attr(not(feature = "excel"), allow(dead_code))]
fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn parse_excel_dispatch(bytes: &[u8]) -> AnalysisResult<Workbook> {
    // Avoid unused warnings when the feature is off.
    let _ = bytes;

    #[cfg(feature = "excel")]
    {
        super::excel::parse_excel_bytes(bytes)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(AnalysisError::UnsupportedFormat {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}
