//! Unit tests for settings persistence.

use datagrid::data::DataError;
use datagrid::settings::GridSettings;
use tempfile::TempDir;

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("datagrid.json");

    let settings = GridSettings {
        data_column_width: 220,
        resize_debounce_ms: 120,
        ..GridSettings::default()
    };
    settings.save_to(&path).unwrap();

    let loaded = GridSettings::load_from(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = GridSettings::load_from(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(DataError::Io(_))));
}

#[test]
fn test_malformed_file_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(GridSettings::load_from(&path), Err(DataError::Json(_))));
}
