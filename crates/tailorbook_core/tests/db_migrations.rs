use rusqlite::Connection;
use tailorbook_core::db::migrations::latest_version;
use tailorbook_core::db::{open_db, open_db_in_memory, DbError, DEFAULT_BUSY_TIMEOUT};
use tailorbook_core::{RecordStore, StoreError};

#[test]
fn open_db_in_memory_creates_all_collections() {
    let conn = open_db_in_memory(DEFAULT_BUSY_TIMEOUT).unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "customers");
    assert_table_exists(&conn, "measurements");
    assert_table_exists(&conn, "delivery_logs");
}

#[test]
fn secondary_indexes_are_declared() {
    let conn = open_db_in_memory(DEFAULT_BUSY_TIMEOUT).unwrap();

    assert_eq!(
        indexed_columns(&conn, "customers"),
        vec!["name".to_string(), "updated_at".to_string()]
    );
    assert_eq!(
        indexed_columns(&conn, "measurements"),
        vec!["updated_at".to_string()]
    );
    assert_eq!(
        indexed_columns(&conn, "delivery_logs"),
        vec!["created_at".to_string(), "customer_id".to_string()]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.sqlite3");

    let first = open_db(&path, DEFAULT_BUSY_TIMEOUT).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path, DEFAULT_BUSY_TIMEOUT).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "customers");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path, DEFAULT_BUSY_TIMEOUT).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn record_store_reports_newer_schema_as_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let result = RecordStore::open_file(&path);
    assert!(matches!(
        result,
        Err(StoreError::StorageUnavailable(
            DbError::UnsupportedSchemaVersion { .. }
        ))
    ));
}

#[test]
fn record_store_reports_unopenable_path_as_storage_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("shop.sqlite3");

    let result = RecordStore::open_file(&path);
    assert!(matches!(result, Err(StoreError::StorageUnavailable(_))));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn indexed_columns(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT ii.name
             FROM sqlite_master m, pragma_index_info(m.name) ii
             WHERE m.type = 'index'
               AND m.tbl_name = ?1
               AND m.sql IS NOT NULL
             ORDER BY ii.name;",
        )
        .unwrap();
    stmt.query_map([table_name], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}
