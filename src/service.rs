//! Application context for the upload/analysis endpoints.
//!
//! [`AnalysisService`] owns the uploads directory and ingestion options that request handlers
//! share. Each method reads the named upload, decodes it, picks a sheet and returns a report; no
//! state is kept between calls.

use std::path::{Component, Path, PathBuf};

use crate::error::{AnalysisError, AnalysisResult};
use crate::ingestion::{ingest_from_path, IngestionOptions};
use crate::processing::Operator;
use crate::report::{build_pivot_report, build_summary_report, PivotReport, SummaryReport};
use crate::types::{Sheet, Workbook};

/// Shared state for analysis handlers.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    uploads_dir: PathBuf,
    options: IngestionOptions,
}

impl AnalysisService {
    /// Create a service reading uploads from `uploads_dir` with default ingestion options.
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: uploads_dir.into(),
            options: IngestionOptions::default(),
        }
    }

    /// Replace the ingestion options (format override, observer, alert threshold).
    pub fn with_options(mut self, options: IngestionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn options(&self) -> &IngestionOptions {
        &self.options
    }

    /// Resolve an upload name to a path inside the uploads directory.
    ///
    /// Only plain file names are accepted; anything with a directory component or `..` fails with
    /// [`AnalysisError::InvalidFileName`].
    pub fn resolve_upload(&self, file: &str) -> AnalysisResult<PathBuf> {
        let mut components = Path::new(file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.uploads_dir.join(name)),
            _ => Err(AnalysisError::InvalidFileName {
                name: file.to_string(),
            }),
        }
    }

    /// Decode an uploaded file.
    pub fn load_workbook(&self, file: &str) -> AnalysisResult<Workbook> {
        let path = self.resolve_upload(file)?;
        ingest_from_path(path, &self.options)
    }

    /// Load one sheet of an upload: the named one, or the first when `sheet` is `None`.
    ///
    /// A sheet name that does not exist yields an empty sheet.
    pub fn load_sheet(&self, file: &str, sheet: Option<&str>) -> AnalysisResult<Sheet> {
        Ok(self.load_workbook(file)?.select(sheet))
    }

    /// Column types and numeric summaries for one sheet of an upload.
    pub fn summary(&self, file: &str, sheet: Option<&str>) -> AnalysisResult<SummaryReport> {
        let sheet = self.load_sheet(file, sheet)?;
        Ok(build_summary_report(&sheet))
    }

    /// Group-by aggregation over one sheet of an upload.
    ///
    /// `op` defaults to `sum`; unknown operators fail with [`AnalysisError::InvalidOperator`]
    /// before the upload is read.
    pub fn pivot(
        &self,
        file: &str,
        sheet: Option<&str>,
        group_key: &str,
        agg_key: &str,
        op: Option<&str>,
    ) -> AnalysisResult<PivotReport> {
        let op = Operator::parse_or_default(op)?;
        let sheet = self.load_sheet(file, sheet)?;
        Ok(build_pivot_report(&sheet, group_key, agg_key, op))
    }

    /// Write `rows` as an xlsx file into the uploads directory and return the new file name.
    ///
    /// The sheet is named `sheet`, or `Sheet1` when `None`. Files are named
    /// `export_<unix millis>.xlsx`.
    #[cfg(feature = "export")]
    pub fn export(&self, sheet: Option<&str>, rows: Vec<crate::types::Row>) -> AnalysisResult<String> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let name = sheet.unwrap_or(crate::ingestion::DEFAULT_SHEET_NAME);
        let bytes = crate::export::build_workbook(&[Sheet::new(name, rows)])?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let file_name = format!("export_{millis}.xlsx");
        std::fs::create_dir_all(&self.uploads_dir)?;
        std::fs::write(self.uploads_dir.join(&file_name), bytes)?;
        Ok(file_name)
    }
}
