//! DecodedTable over the in-memory and RocksDB stores.

use cellcodec_commons::{TableConfig, Value};
use cellcodec_core::{
    CellCodecError, CodecCatalog, DecodedCell, DecodedTable, TypedBytesCodec, Transcoder,
};
use cellcodec_store::test_utils::TestDb;
use cellcodec_store::{CellStore, Get, MemoryStore, Put, Scan, StorageError};
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
}

fn typed(values: &[Value]) -> Vec<u8> {
    TypedBytesCodec::default().encode(values).unwrap()
}

fn seed(store: &dyn CellStore) {
    store
        .put(
            "metrics",
            &Put::new(b"sensor-1".to_vec())
                .add_column_at(b"d", b"label", 100, b"north".to_vec())
                .add_column_at(b"d", b"temp", 150, typed(&[Value::Double(21.5)])),
        )
        .unwrap();
    store
        .put(
            "metrics",
            &Put::new(b"sensor-2".to_vec())
                .add_column_at(b"d", b"label", 100, b"south".to_vec())
                .add_column_at(b"d", b"temp", 250, typed(&[Value::Int(19), Value::Int(20)])),
        )
        .unwrap();
    store
        .put(
            "metrics",
            &Put::new(b"sensor-3".to_vec()).add_column_at(b"d", b"label", 100, b"east\x00".to_vec()),
        )
        .unwrap();
}

fn memory_store() -> Arc<dyn CellStore> {
    let store = MemoryStore::new();
    store.create_table("metrics").unwrap();
    seed(&store);
    Arc::new(store)
}

fn metrics_table(store: Arc<dyn CellStore>) -> DecodedTable {
    let mut table = DecodedTable::new(store, "metrics");
    let registry = table.registry_mut();
    registry
        .set_versioned_field_codec(b"d", Some(&b"temp"[..]), 100, 200, Arc::new(TypedBytesCodec::single()))
        .unwrap();
    registry
        .set_versioned_field_codec(b"d", Some(&b"temp"[..]), 200, 300, Arc::new(TypedBytesCodec::default()))
        .unwrap();
    table
}

fn check_get_and_shapes(store: Arc<dyn CellStore>) {
    let mut table = metrics_table(store);
    table.set_include_family(false);
    table.set_include_qualifier(false);

    let row = table.get(b"sensor-1").unwrap().unwrap();
    assert_eq!(row.len(), 3);
    assert_eq!(
        row.to_values(),
        vec![
            Value::from("sensor-1"),
            Value::Vector(vec![Value::Long(100), Value::from("north")]),
            Value::Vector(vec![Value::Long(150), Value::Double(21.5)]),
        ]
    );

    let row = table.get(b"sensor-2").unwrap().unwrap();
    assert_eq!(
        row.cells()[1],
        DecodedCell::Tuple(vec![
            Value::Long(250),
            Value::Vector(vec![Value::Int(19), Value::Int(20)]),
        ])
    );

    table.set_include_key(false);
    table.set_include_timestamp(false);
    let row = table.get(b"sensor-3").unwrap().unwrap();
    assert_eq!(row.cells(), &[DecodedCell::Scalar(Value::from("east\\x00"))]);

    assert!(table.get(b"sensor-9").unwrap().is_none());
}

fn check_scan_sessions(store: Arc<dyn CellStore>) {
    let mut table = metrics_table(store);
    table.set_include_family(false);
    table.set_include_qualifier(false);
    table.set_include_timestamp(false);
    table.set_include_value(false);

    let mut session = table.open_scan(Scan::new()).unwrap();
    assert_eq!(session.current_row().unwrap(), Value::from(""));
    assert_eq!(session.current_count(), 0);

    let first = session.next_batch(Some(2)).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(session.current_count(), 2);
    assert_eq!(session.current_row().unwrap(), Value::from("sensor-2"));
    // Degenerate policy: key plus one empty tuple per cell
    assert_eq!(first[0].cells(), &[DecodedCell::Tuple(vec![]), DecodedCell::Tuple(vec![])]);

    let rest = session.next_batch(Some(2)).unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(session.current_row().unwrap(), Value::from("sensor-3"));
    assert!(session.next_batch(Some(2)).unwrap().is_empty());
    assert!(session.next_batch(None).unwrap().is_empty());
    assert_eq!(session.current_count(), 3);

    // A second session starts from scratch
    let mut other = table.open_scan(Scan::new().with_start_row(b"sensor-2".to_vec())).unwrap();
    assert_eq!(other.current_count(), 0);
    assert_eq!(other.next_batch(None).unwrap().len(), 2);
    drop(session);
    drop(other);

    let keys: Vec<Value> = table
        .open_scan(Scan::new().with_stop_row(b"sensor-2".to_vec()))
        .unwrap()
        .map(|row| row.unwrap().key().cloned().unwrap())
        .collect();
    assert_eq!(keys, vec![Value::from("sensor-1")]);
}

fn check_count(store: Arc<dyn CellStore>) {
    let table = metrics_table(store);
    assert_eq!(table.count(1).unwrap(), 3);
    assert_eq!(table.count(100).unwrap(), 3);
    assert_eq!(table.count(0).unwrap(), 3);
}

fn check_put_encoded(store: Arc<dyn CellStore>) {
    let mut table = metrics_table(store);
    table
        .put_encoded(b"sensor-4", b"d", b"temp", Some(120), &[Value::Float(3.5)])
        .unwrap();
    table
        .put_encoded(b"sensor-4", b"d", b"label", Some(120), &[Value::from("west")])
        .unwrap();

    let err = table
        .put_encoded(b"sensor-4", b"d", b"label", Some(120), &[Value::Long(1)])
        .unwrap_err();
    assert!(matches!(err, CellCodecError::Codec(_)));

    table.set_include_key(false);
    table.set_include_family(false);
    table.set_include_timestamp(false);
    let row = table.get(b"sensor-4").unwrap().unwrap();
    assert_eq!(
        row.to_values(),
        vec![
            Value::Vector(vec![Value::from("label"), Value::from("west")]),
            Value::Vector(vec![Value::from("temp"), Value::Float(3.5)]),
        ]
    );
    assert_eq!(table.count(10).unwrap(), 4);
}

#[test]
fn test_memory_get_and_row_shapes() {
    init_logging();
    check_get_and_shapes(memory_store());
}

#[test]
fn test_memory_scan_sessions() {
    init_logging();
    check_scan_sessions(memory_store());
}

#[test]
fn test_memory_count() {
    init_logging();
    check_count(memory_store());
}

#[test]
fn test_memory_put_encoded() {
    init_logging();
    check_put_encoded(memory_store());
}

#[test]
fn test_rocksdb_table() {
    init_logging();
    let test_db = TestDb::new(&["metrics"]).unwrap();
    let store: Arc<dyn CellStore> = Arc::new(test_db.store());
    seed(store.as_ref());

    check_get_and_shapes(store.clone());
    check_scan_sessions(store.clone());
    check_count(store.clone());
    check_put_encoded(store);
}

#[test]
fn test_empty_table() {
    init_logging();
    let store = Arc::new(MemoryStore::new());
    store.create_table("empty").unwrap();
    let table = DecodedTable::new(store, "empty");

    assert_eq!(table.count(10).unwrap(), 0);
    let mut session = table.open_scan(Scan::new()).unwrap();
    assert!(session.next_batch(Some(5)).unwrap().is_empty());
    assert!(session.next_batch(None).unwrap().is_empty());
    assert_eq!(session.current_count(), 0);
    assert_eq!(session.current_row().unwrap(), Value::from(""));
}

#[test]
fn test_get_with_request() {
    init_logging();
    let table = metrics_table(memory_store());
    let get = Get::new(b"sensor-1".to_vec()).with_time_range(cellcodec_store::TimeRange::new(120, 200).unwrap());
    let row = table.get_with(&get).unwrap().unwrap();
    assert_eq!(row.cells().len(), 1);

    let get = Get::new(b"sensor-1".to_vec()).with_family(b"other".to_vec());
    assert!(table.get_with(&get).unwrap().is_none());
}

#[test]
fn test_decode_error_fails_the_batch() {
    init_logging();
    let store = memory_store();
    store
        .put("metrics", &Put::new(b"sensor-0".to_vec()).add_column_at(b"d", b"temp", 150, vec![99u8]))
        .unwrap();
    let table = metrics_table(store);

    assert!(matches!(table.get(b"sensor-0"), Err(CellCodecError::Codec(_))));

    let mut session = table.open_scan(Scan::new()).unwrap();
    assert!(matches!(session.next_batch(Some(1)), Err(CellCodecError::Codec(_))));
    assert_eq!(session.current_count(), 1);
    assert_eq!(session.next_batch(Some(1)).unwrap().len(), 1);
}

#[test]
fn test_missing_table_is_a_store_error() {
    init_logging();
    let table = DecodedTable::new(Arc::new(MemoryStore::new()), "nope");
    assert!(matches!(
        table.get(b"r"),
        Err(CellCodecError::Store(StorageError::TableNotFound(_)))
    ));
    assert!(table.count(10).is_err());
    assert!(table.open_scan(Scan::new()).is_err());
}

#[test]
fn test_table_from_config() {
    init_logging();
    let mut config = TableConfig::new("metrics");
    config.include.family = false;
    config.include.qualifier = false;
    config.include.timestamp = false;
    config.fields.push(cellcodec_commons::FieldCodecConfig {
        family: "d".to_string(),
        qualifier: Some("temp".to_string()),
        codec: "typed_bytes_single".to_string(),
        start: Some(100),
        stop: Some(200),
    });

    let table = DecodedTable::from_config(memory_store(), &config, &CodecCatalog::new()).unwrap();
    let row = table.get(b"sensor-1").unwrap().unwrap();
    assert_eq!(
        row.to_values(),
        vec![Value::from("sensor-1"), Value::from("north"), Value::Double(21.5)]
    );
}
