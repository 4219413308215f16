use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sheet_analytics::ingestion::{ingest_bytes, ingest_from_path, IngestionOptions, WorkbookFormat};
use sheet_analytics::types::Value;

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sheet-analytics-unified-{nanos}.{ext}"))
}

#[test]
fn unified_ingest_csv_by_extension() {
    let wb = ingest_from_path("tests/fixtures/sales.csv", &IngestionOptions::default()).unwrap();
    assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
    assert_eq!(wb.first_sheet().unwrap().row_count(), 5);
}

#[test]
fn unified_ingest_json_by_extension() {
    let wb = ingest_from_path("tests/fixtures/sales.json", &IngestionOptions::default()).unwrap();
    assert_eq!(wb.sheet_names(), vec!["Q1", "Q2"]);
}

#[test]
fn unified_ingest_sniffs_unknown_extension() {
    let path = tmp_file("upload");
    std::fs::write(&path, "[{\"g\": \"A\", \"v\": 2}]").unwrap();

    let wb = ingest_from_path(&path, &IngestionOptions::default()).unwrap();
    assert_eq!(wb.first_sheet().unwrap().rows[0].get("v"), &Value::Number(2.0));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unified_ingest_format_override_wins_over_extension() {
    let path = tmp_file("json");
    std::fs::write(&path, "g,v\nA,1\n").unwrap();

    let opts = IngestionOptions {
        format: Some(WorkbookFormat::Csv),
        ..Default::default()
    };
    let wb = ingest_from_path(&path, &opts).unwrap();
    assert_eq!(wb.first_sheet().unwrap().columns(), vec!["g", "v"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_bytes_sniffs_csv_and_json() {
    let opts = IngestionOptions::default();

    let csv = ingest_bytes(b"g,v\nA,1\nB,2\n", &opts).unwrap();
    assert_eq!(csv.first_sheet().unwrap().row_count(), 2);

    let json = ingest_bytes(b"{\"g\": \"A\"}", &opts).unwrap();
    assert_eq!(json.first_sheet().unwrap().row_count(), 1);
}

#[cfg(not(feature = "excel"))]
#[test]
fn unified_ingest_excel_requires_feature() {
    let err = ingest_bytes(b"PK\x03\x04", &IngestionOptions::default()).unwrap_err();
    assert!(err.to_string().contains("excel ingestion not enabled"));
}
