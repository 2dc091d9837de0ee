/*!
 * Common test utilities for the tweetstore test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tweetstore::{parse_statuses, Connector, SqlDatabase, Status};

/// Routes library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a SQLite-backed database handle living in `dir`
pub fn create_test_database(dir: &Path, name: &str) -> SqlDatabase {
    SqlDatabase::new(name, Connector::sqlite(dir))
}

/// Builds a plain status with the given id and text
pub fn sample_status(id: i64, text: &str) -> Status {
    let json = serde_json::json!({
        "id": id,
        "created_at": "Thu Jan 02 15:04:05 +0000 2020",
        "text": text,
        "user": { "screen_name": format!("user{}", id), "location": "Thessaloniki" },
        "source": "<a href=\"https://twitter.com\">Twitter Web Client</a>",
        "lang": "en",
        "favorite_count": 1,
        "retweet_count": 2,
        "entities": { "hashtags": [ { "text": "archive" } ] }
    });
    parse_statuses(&json.to_string())
        .expect("sample status should parse")
        .remove(0)
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}
