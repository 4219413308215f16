use std::sync::{Arc, Mutex};

use sheet_analytics::ingestion::{
    ingest_from_path, IngestionContext, IngestionObserver, IngestionOptions, IngestionSeverity, IngestionStats,
    WorkbookFormat,
};
use sheet_analytics::AnalysisError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &AnalysisError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &AnalysisError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options_with(obs: &Arc<RecordingObserver>, format: Option<WorkbookFormat>) -> IngestionOptions {
    let observer: Arc<dyn IngestionObserver> = obs.clone();
    IngestionOptions {
        format,
        observer: Some(observer),
        alert_at_or_above: IngestionSeverity::Critical,
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(&obs, Some(WorkbookFormat::Csv));

    // Missing file -> Io error -> Critical
    let _ = ingest_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Critical]);
    assert_eq!(alerts, vec![IngestionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(&obs, None);

    // Array of numbers -> not a row table -> Error severity -> no alert
    let _ = ingest_from_path("tests/fixtures/not_rows.json", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![IngestionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options_with(&obs, None);

    let wb = ingest_from_path("tests/fixtures/sales.json", &opts).unwrap();
    assert_eq!(wb.sheets.len(), 2);

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![IngestionStats { sheets: 2, rows: 5 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn lower_alert_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let mut opts = options_with(&obs, None);
    opts.alert_at_or_above = IngestionSeverity::Error;

    let _ = ingest_from_path("tests/fixtures/not_rows.json", &opts).unwrap_err();
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}
