use skusheetapp::model::{CheckStatus, Row};
use skusheetapp::store::backend::StorageBackend;
use skusheetapp::store::fs_backend::{FsBackend, ROWS_FILE};
use skusheetapp::store::RowStore;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_missing_snapshot_loads_as_none() {
    let (_dir, backend) = setup();
    assert!(backend.load_rows().unwrap().is_none());
    assert!(backend.saved_at().unwrap().is_none());
}

#[test]
fn test_save_and_load_round_trip() {
    let (_dir, backend) = setup();
    let mut row = Row::with_values([("商品名称", "杯子"), ("色", "红")]);
    row.check_status = CheckStatus::Verified;

    backend.save_rows(std::slice::from_ref(&row)).unwrap();
    let loaded = backend.load_rows().unwrap().unwrap();
    assert_eq!(loaded, vec![row]);
    assert!(backend.saved_at().unwrap().is_some());
}

#[test]
fn test_atomic_write_leaves_no_temp_files() {
    let (_dir, backend) = setup();
    backend.save_rows(&[Row::new()]).unwrap();
    backend.save_rows(&[Row::new(), Row::new()]).unwrap();

    let names: Vec<String> = fs::read_dir(backend.root())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![ROWS_FILE.to_string()]);
}

#[test]
fn test_snapshot_uses_column_names() {
    let (_dir, backend) = setup();
    backend
        .save_rows(&[Row::with_values([("商品名称", "杯子")])])
        .unwrap();
    let content = fs::read_to_string(backend.rows_path()).unwrap();
    assert!(content.contains("\"商品名称\": \"杯子\""));
    assert!(content.contains("\"check_status\": \"unverified\""));
}

#[test]
fn test_clear_removes_snapshot() {
    let (_dir, backend) = setup();
    backend.save_rows(&[Row::new()]).unwrap();
    backend.clear().unwrap();
    assert!(!backend.rows_path().exists());
    // clearing twice is fine
    backend.clear().unwrap();
}

#[test]
fn test_corrupt_snapshot_is_an_error() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.rows_path(), "{not json").unwrap();
    assert!(backend.load_rows().is_err());
    assert!(RowStore::open(backend).is_err());
}

#[test]
fn test_store_writes_through() {
    let (dir, backend) = setup();
    let mut store = RowStore::open(backend).unwrap();
    let ids = store
        .add(vec![Row::with_values([("商品名称", "A")])])
        .unwrap();
    store.set_status(&ids, CheckStatus::Verified).unwrap();

    let reopened = RowStore::open(FsBackend::new(dir.path().join("data"))).unwrap();
    assert_eq!(reopened.len(), 1);
    assert!(reopened.as_slice()[0].is_verified());
    assert_eq!(reopened.as_slice()[0].id, ids[0]);
}
