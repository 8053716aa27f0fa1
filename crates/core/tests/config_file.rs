//! Configuration file round-trips through a temporary directory.

use lobby_core::Config;
use tempfile::TempDir;

#[test]
fn test_save_and_load_from_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config {
        min_identity_len: 5,
        max_body_length: 256,
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_repairs_zero_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"min_identity_len":0,"max_body_length":0}"#).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_load_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(
        Config::load_from(&path),
        Err(lobby_core::Error::Serialization(_))
    ));
}

#[test]
fn test_file_cannot_loosen_name_rule() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"min_identity_len":1}"#).unwrap();

    assert_eq!(Config::load_from(&path).unwrap().min_identity_len, 3);
}
