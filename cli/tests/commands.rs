//! Command output over an in-memory table.

use cellcodec_cli::commands::{self, parse_values, ScanOptions};
use cellcodec_cli::CliError;
use cellcodec_commons::Value;
use cellcodec_core::{DecodedTable, TypedBytesCodec};
use cellcodec_store::{CellStore, MemoryStore, Put};
use std::sync::Arc;

fn table() -> DecodedTable {
    let store = MemoryStore::new();
    store.create_table("metrics").unwrap();
    for (row, label) in [("sensor-1", "north"), ("sensor-2", "south"), ("sensor-3", "east")] {
        store
            .put(
                "metrics",
                &Put::new(row.as_bytes().to_vec()).add_column_at(b"d", b"label", 100, label.as_bytes().to_vec()),
            )
            .unwrap();
    }

    let mut table = DecodedTable::new(Arc::new(store), "metrics");
    table
        .registry_mut()
        .set_field_codec(b"d", Some(&b"temp"[..]), Arc::new(TypedBytesCodec::default()));
    table
}

fn output(buf: Vec<u8>) -> Vec<String> {
    String::from_utf8(buf).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn test_get_prints_row_or_null() {
    let table = table();

    let mut out = Vec::new();
    commands::get(&table, "sensor-1", &mut out, false).unwrap();
    commands::get(&table, "missing", &mut out, false).unwrap();
    assert_eq!(output(out), vec![r#"["sensor-1",["d","label",100,"north"]]"#, "null"]);
}

#[test]
fn test_scan_range_and_limit() {
    let table = table();

    let mut out = Vec::new();
    let options = ScanOptions {
        start: Some("sensor-2".to_string()),
        stop: None,
        limit: None,
        batch: 1,
    };
    assert_eq!(commands::scan(&table, &options, &mut out, false).unwrap(), 2);
    let lines = output(out);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with(r#"["sensor-2""#));
    assert!(lines[1].starts_with(r#"["sensor-3""#));

    let mut out = Vec::new();
    let options = ScanOptions {
        limit: Some(2),
        batch: 10,
        ..ScanOptions::default()
    };
    assert_eq!(commands::scan(&table, &options, &mut out, false).unwrap(), 2);
    assert_eq!(output(out).len(), 2);
}

#[test]
fn test_count() {
    let table = table();
    let mut out = Vec::new();
    assert_eq!(commands::count(&table, 2, &mut out).unwrap(), 3);
    assert_eq!(output(out), vec!["3"]);
}

#[test]
fn test_parse_values() {
    assert_eq!(parse_values("north").unwrap(), vec![Value::from("north")]);
    assert_eq!(parse_values("\"42\"").unwrap(), vec![Value::from("42")]);
    assert_eq!(parse_values("42").unwrap(), vec![Value::Long(42)]);
    assert_eq!(
        parse_values("[1, 2.5]").unwrap(),
        vec![Value::Long(1), Value::Double(2.5)]
    );
    assert!(matches!(parse_values("null"), Err(CliError::ParseError(_))));
}

#[test]
fn test_put_then_get() {
    let table = table();
    commands::put(&table, "sensor-4", "d", "temp", "[21.5, 7]", Some(500)).unwrap();
    commands::put(&table, "sensor-4", "d", "label", "west", Some(500)).unwrap();

    let mut out = Vec::new();
    commands::get(&table, "sensor-4", &mut out, false).unwrap();
    assert_eq!(
        output(out),
        vec![r#"["sensor-4",["d","label",500,"west"],["d","temp",500,[21.5,7]]]"#]
    );
}

#[test]
fn test_put_rejected_by_codec() {
    let table = table();
    let err = commands::put(&table, "sensor-4", "d", "label", "42", Some(500)).unwrap_err();
    assert!(matches!(err, CliError::CodecError(_)));
}
