/*!
 * End-to-end tests: load statuses, insert them, read columns back
 */

use tweetstore::status::load_statuses;

use crate::common;

#[test]
fn test_insertRecords_withSameIdTwice_shouldLeaveOneRow() {
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");
    db.create_table("statuses");

    assert_eq!(db.insert_records(&[common::sample_status(7, "first")], "statuses"), 1);
    assert_eq!(db.insert_records(&[common::sample_status(7, "second")], "statuses"), 0);

    assert_eq!(db.get_row_count("statuses"), 1);
    assert_eq!(db.get_column("text", "statuses"), vec!["first"]);
}

#[test]
fn test_getRowCount_afterUniqueInserts_shouldMatchCount() {
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");
    db.create_table("statuses");
    assert_eq!(db.get_row_count("statuses"), 0);

    let statuses: Vec<_> = (1..=25)
        .map(|id| common::sample_status(id, &format!("status number {}", id)))
        .collect();

    assert_eq!(db.try_insert_records(&statuses, "statuses").unwrap(), 25);
    assert_eq!(db.get_row_count("statuses"), 25);
}

#[test]
fn test_insertRecords_fromResource_shouldStoreSanitizedRows() {
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");
    db.create_table("statuses");

    let statuses = load_statuses(common::test_resource_path("statuses.jsonl")).unwrap();
    assert_eq!(db.insert_records(&statuses, "statuses"), 3);

    let texts = db.get_column("text", "statuses");
    assert_eq!(texts.len(), 3);
    assert!(texts.iter().all(|t| t.is_ascii()));
    assert_eq!(
        texts[0],
        "Sunrise over the Acropolis    #athens #travel https://t.co/xyz"
    );
    // Retweets keep the original text
    assert_eq!(texts[1], texts[0]);

    let edited = db.get_column("editedText", "statuses");
    assert_eq!(edited[0], "sunrise over the acropolis athens travel");

    assert_eq!(db.get_column("place", "statuses"), vec!["Ath na", "", ""]);
    assert_eq!(db.get_column("userPlace", "statuses")[1], "");
    assert!(db.get_column("userPlace", "statuses")[0].trim_start().starts_with(','));
    assert_eq!(db.get_column("source", "statuses")[2], "web");
    assert_eq!(db.get_column("geolocation", "statuses")[0], "37.9715,23.7257");
    assert_eq!(db.get_column("hashtags", "statuses"), vec!["athens travel", "athens", ""]);
    assert_eq!(
        db.get_column("createdAt", "statuses"),
        vec!["2019-04-01", "2019-04-01", "2019-04-02"]
    );
    assert_eq!(db.get_column("favoriteCount", "statuses"), vec!["12", "0", "0"]);
    assert_eq!(db.get_column("lang", "statuses"), vec!["en", "en", ""]);
}

#[test]
fn test_insertRecords_intoSeparateTables_shouldDeduplicatePerTable() {
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");
    db.create_table("a");
    db.create_table("b");

    let batch = vec![common::sample_status(1, "x"), common::sample_status(2, "y")];
    assert_eq!(db.insert_records(&batch, "a"), 2);
    assert_eq!(db.insert_records(&batch, "b"), 2);
    assert_eq!(db.get_row_count("a"), 2);
    assert_eq!(db.get_row_count("b"), 2);
}
