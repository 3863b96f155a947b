// Configuration loading tests against real files

use proofpress::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_config_can_be_loaded_from_file_path() {
    let file = write_config(
        r#"
server:
  address: "127.0.0.1"
  port: 9191
store:
  upload_url: "https://api.example.com/v1/image/upload"
  upload_preset: "unsigned_mockups"
placements:
  T-Shirt:
    x: 150
    y: 120
    width: 200
    height: 200
  Mug:
    x: 100
    y: 80
    width: 180
    height: 180
"#,
    );

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.server.address, "127.0.0.1");
    assert_eq!(config.server.port, 9191);
    assert!(config.validate().is_ok());

    let table = config.placement_table();
    assert_eq!(table.len(), 2);
    assert!(table.lookup("T-Shirt").is_some());
    assert!(table.lookup("Mug").is_some());
    assert!(table.lookup("Poster").is_none());
}

#[test]
fn test_missing_config_file_is_an_error() {
    let err = Config::from_file("/nonexistent/proofpress/config.yaml").unwrap_err();
    assert!(err.contains("Failed to read config file"));
}

#[test]
fn test_config_without_store_section_is_rejected() {
    let file = write_config(
        r#"
server:
  address: "127.0.0.1"
  port: 9191
"#,
    );

    assert!(Config::from_file(file.path()).is_err());
}

#[test]
fn test_invalid_config_surfaces_validation_error() {
    let file = write_config(
        r#"
store:
  upload_url: "https://api.example.com/v1/image/upload"
placements:
  Sticker:
    x: 5
    y: 5
    width: 100
    height: 0
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.contains("Sticker"));
}

#[test]
fn test_example_config_in_repository_is_valid() {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let config = Config::from_file(format!("{}/config.yaml", manifest_dir)).unwrap();
    assert!(config.validate().is_ok());

    // The shipped example covers the whole stock catalog
    let table = config.placement_table();
    assert_eq!(table.len(), 6);
}
