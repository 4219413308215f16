use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AnalysisError;

use super::unified::WorkbookFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// Where the bytes came from: a file path, or `<memory>` for in-memory input.
    pub source: PathBuf,
    /// Format used for decoding, if it could be determined.
    pub format: Option<WorkbookFormat>,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of decoded sheets.
    pub sheets: usize,
    /// Total number of rows across all sheets.
    pub rows: usize,
}

/// Observer interface for ingestion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait IngestionObserver: Send + Sync {
    /// Called when ingestion succeeds.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &AnalysisError) {}

    /// Called when an ingestion failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        eprintln!(
            "[ingest][ok] format={:?} source={} sheets={} rows={}",
            ctx.format,
            ctx.source.display(),
            stats.sheets,
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        eprintln!(
            "[ingest][{:?}] format={:?} source={} err={}",
            severity,
            ctx.format,
            ctx.source.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        eprintln!(
            "[ALERT][ingest][{:?}] format={:?} source={} err={}",
            severity,
            ctx.format,
            ctx.source.display(),
            error
        );
    }
}

/// Appends ingestion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.append_line(&format!(
            "{} ok format={:?} source={} sheets={} rows={}",
            unix_ts(),
            ctx.format,
            ctx.source.display(),
            stats.sheets,
            stats.rows
        ));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        self.append_line(&format!(
            "{} fail severity={:?} format={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.source.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &AnalysisError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} format={:?} source={} err={}",
            unix_ts(),
            severity,
            ctx.format,
            ctx.source.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{CompositeObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
    use crate::error::AnalysisError;

    #[derive(Default)]
    struct Counting {
        successes: Mutex<usize>,
        failures: Mutex<usize>,
    }

    impl IngestionObserver for Counting {
        fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {
            *self.successes.lock().unwrap() += 1;
        }

        fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &AnalysisError) {
            *self.failures.lock().unwrap() += 1;
        }
    }

    fn ctx() -> IngestionContext {
        IngestionContext {
            source: "<memory>".into(),
            format: None,
        }
    }

    #[test]
    fn composite_fans_out_and_default_alert_forwards_to_failure() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let a_dyn: Arc<dyn IngestionObserver> = a.clone();
        let b_dyn: Arc<dyn IngestionObserver> = b.clone();
        let composite = CompositeObserver::new(vec![a_dyn, b_dyn]);

        composite.on_success(&ctx(), IngestionStats { sheets: 1, rows: 3 });
        let err = AnalysisError::InvalidWorkbook {
            message: "boom".to_string(),
        };
        composite.on_alert(&ctx(), IngestionSeverity::Critical, &err);

        for o in [&a, &b] {
            assert_eq!(*o.successes.lock().unwrap(), 1);
            assert_eq!(*o.failures.lock().unwrap(), 1);
        }
    }

    #[test]
    fn severities_are_ordered() {
        assert!(IngestionSeverity::Info < IngestionSeverity::Warning);
        assert!(IngestionSeverity::Error < IngestionSeverity::Critical);
    }
}
