use thiserror::Error;

/// Convenience result type for analysis, ingestion and export operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error type returned across the crate.
///
/// The analytics core itself only ever fails with [`AnalysisError::InvalidOperator`]; the other
/// variants come from the ingestion/export layers that sit around it.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Aggregate operator outside of `sum`/`mean`/`min`/`max`/`count`.
    #[error("invalid aggregate operator '{op}' (expected one of sum, mean, min, max, count)")]
    InvalidOperator { op: String },

    /// Underlying I/O error (e.g. upload not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "excel")]
    /// Excel decoding error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "export")]
    /// xlsx encoding error (feature-gated behind `export`).
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook format could not be determined or is not enabled in this build.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// The input decoded fine but does not have a row-table shape.
    #[error("invalid workbook: {message}")]
    InvalidWorkbook { message: String },

    /// An upload name that is not a plain file name inside the uploads directory.
    #[error("invalid file name '{name}'")]
    InvalidFileName { name: String },
}
