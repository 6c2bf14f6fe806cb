use sheettrack_core::db::migrations::{apply_migrations, latest_version};
use sheettrack_core::db::{open_db, open_db_in_memory};
use sheettrack_core::{RecordRepository, RepoError, SqliteRecordRepository};

#[test]
fn migrations_create_records_table() {
    let conn = open_db_in_memory().unwrap();

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'records'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn reapplying_migrations_is_a_noop() {
    let mut conn = open_db_in_memory().unwrap();
    apply_migrations(&mut conn).unwrap();
    apply_migrations(&mut conn).unwrap();
}

#[test]
fn open_db_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let mut repo = SqliteRecordRepository::try_new(&conn).unwrap();
        repo.write("some-key", "some-value").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    assert_eq!(repo.read("some-key").unwrap().as_deref(), Some("some-value"));
}

#[test]
fn write_upserts_and_delete_removes() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRecordRepository::try_new(&conn).unwrap();

    assert_eq!(repo.read("k").unwrap(), None);

    repo.write("k", "v1").unwrap();
    repo.write("k", "v2").unwrap();
    assert_eq!(repo.read("k").unwrap().as_deref(), Some("v2"));

    repo.delete("k").unwrap();
    assert_eq!(repo.read("k").unwrap(), None);

    // Deleting an absent key stays a no-op.
    repo.delete("k").unwrap();
}

#[test]
fn repository_rejects_unmigrated_connections() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteRecordRepository::try_new(&conn).unwrap_err();
    assert!(matches!(err, RepoError::UninitializedConnection { .. }));
}
