/*!
 * Tests for loading statuses from files and directories
 */

use tweetstore::status::load_statuses;
use tweetstore::StatusError;

use crate::common;

#[test]
fn test_loadStatuses_withJsonLinesResource_shouldReadAll() {
    let statuses = load_statuses(common::test_resource_path("statuses.jsonl")).unwrap();

    assert_eq!(statuses.len(), 3);
    assert!(statuses[1].is_retweet());
    assert_eq!(statuses[1].tweet_text(), statuses[0].tweet_text());
    assert_eq!(statuses[1].user.location, None);
}

#[test]
fn test_loadStatuses_withDirectory_shouldReadJsonFilesInOrder() {
    let dir = common::create_temp_dir().unwrap();
    let nested = dir.path().join("2020");
    std::fs::create_dir(&nested).unwrap();

    common::create_test_file(
        dir.path(),
        "a.json",
        r#"[{"id": 1, "created_at": "2020-01-01T00:00:00Z", "text": "one", "user": {"screen_name": "a"}}]"#,
    )
    .unwrap();
    common::create_test_file(
        &nested,
        "b.jsonl",
        r#"{"id": 2, "created_at": "2020-01-02T00:00:00Z", "text": "two", "user": {"screen_name": "b"}}"#,
    )
    .unwrap();
    common::create_test_file(dir.path(), "notes.txt", "not a status").unwrap();

    let statuses = load_statuses(dir.path()).unwrap();
    let ids: Vec<i64> = statuses.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_loadStatuses_withMissingPath_shouldReturnFileError() {
    let dir = common::create_temp_dir().unwrap();
    let result = load_statuses(dir.path().join("missing.json"));
    assert!(matches!(result, Err(StatusError::File(_))));
}
