/*!
 * Tests for application configuration functionality
 */

use tweetstore::app_config::{Config, LogLevel};
use tweetstore::Connector;

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.database.name, "tweets");
    assert_eq!(config.database.table, "statuses");
    assert_eq!(config.connector.driver, "sqlite");
    assert!(config.connector.username.is_empty());
    assert!(!config.connector.base_url.is_empty());
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Empty database name
    config.database.name = "  ".to_string();
    assert!(config.validate().is_err());
    config.database.name = "tweets".to_string();

    // Table name that is not a plain identifier
    config.database.table = "statuses; DROP TABLE x".to_string();
    assert!(config.validate().is_err());
    config.database.table = "statuses".to_string();

    // Unsupported driver
    config.connector.driver = "com.mysql.jdbc.Driver".to_string();
    assert!(config.validate().is_err());
    config.connector.driver = "sqlite3".to_string();
    assert!(config.validate().is_ok());

    // Missing base URL
    config.connector.base_url = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).expect("default config should be created");
    assert!(path.exists());
    assert_eq!(config, Config::default());

    let reloaded = Config::load(&path).expect("written config should load");
    assert_eq!(reloaded, config);
}

#[test]
fn test_load_withCustomFile_shouldReadValues() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{
            "database": { "name": "archive", "table": "tweets_2019" },
            "connector": { "driver": "sqlite", "base_url": "/tmp/data/", "username": "bot", "password": "secret" },
            "log_level": "warn"
        }"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.database.table, "tweets_2019");
    assert_eq!(config.connector.password, "secret");
    assert_eq!(config.log_level, LogLevel::Warn);

    let db = config.open_database();
    assert_eq!(db.url(), "/tmp/data/archive.db");
    assert_eq!(db.connector().user().username, "bot");
}

#[test]
fn test_load_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ nope").unwrap();

    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_prepareDatabase_withMissingDataDirectory_shouldCreateItAndOpen() {
    let dir = common::create_temp_dir().unwrap();
    let data_dir = dir.path().join("tweetstore");
    assert!(!data_dir.exists());

    let mut config = Config::default();
    config.connector.base_url = Connector::sqlite(&data_dir).base_url().to_string();

    let db = config.prepare_database().expect("database directory should be created");
    assert!(data_dir.is_dir());

    db.create_table("statuses");
    assert_eq!(db.list_tables(), vec!["statuses".to_string()]);
    assert_eq!(db.get_row_count("statuses"), 0);
}

#[test]
fn test_prepareDatabase_withUriBaseUrl_shouldLeaveFilesystemAlone() {
    let mut config = Config::default();
    config.connector.base_url = "file:/nonexistent-tweetstore-dir/".to_string();

    let db = config.prepare_database().unwrap();
    assert_eq!(db.url(), "file:/nonexistent-tweetstore-dir/tweets.db");
    assert!(!std::path::Path::new("/nonexistent-tweetstore-dir").exists());
}
