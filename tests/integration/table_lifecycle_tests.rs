/*!
 * Table lifecycle tests against an on-disk SQLite database
 */

use tweetstore::DatabaseError;

use crate::common;

#[test]
fn test_listTables_afterCreateAndDrop_shouldReflectChanges() {
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");

    assert!(db.list_tables().is_empty());

    db.create_table("t");
    db.create_table("archive_2019");
    assert_eq!(db.list_tables(), vec!["archive_2019".to_string(), "t".to_string()]);

    db.drop_table("t");
    let tables = db.list_tables();
    assert!(!tables.contains(&"t".to_string()));
    assert!(tables.contains(&"archive_2019".to_string()));
}

#[test]
fn test_handles_withSameNameAndConnector_shouldShareStoredState() {
    let dir = common::create_temp_dir().unwrap();
    let writer = common::create_test_database(dir.path(), "tweets");
    let reader = writer.clone();
    let other = common::create_test_database(dir.path(), "other");

    writer.create_table("statuses");

    assert_eq!(reader.list_tables(), vec!["statuses".to_string()]);
    assert!(other.list_tables().is_empty());
    assert!(dir.path().join("tweets.db").exists());
}

#[test]
fn test_dropTable_withMissingTable_shouldOnlyLog() {
    common::init_test_logging();
    let dir = common::create_temp_dir().unwrap();
    let db = common::create_test_database(dir.path(), "tweets");

    db.drop_table("never_created");
    assert!(matches!(
        db.try_drop_table("never_created"),
        Err(DatabaseError::Sql { .. })
    ));
    assert!(db.list_tables().is_empty());
}
