use rusqlite::Connection;
use shopcart_core::db::migrations::{current_schema_version, latest_version};
use shopcart_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_strict_cart_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_schema_version(&conn).unwrap(), latest_version());
    assert_eq!(
        column_not_null(&conn),
        vec![
            ("id".to_string(), false),
            ("item".to_string(), true),
            ("price".to_string(), true),
        ]
    );
    assert_eq!(version_rows(&conn), 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shopping_cart.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO cart (item, price) VALUES ('Apple', 1.2);", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(current_schema_version(&conn_second).unwrap(), latest_version());
    assert_eq!(version_rows(&conn_second), 1);
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM cart;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn open_db_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("cart.db");

    open_db(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn legacy_table_is_migrated_preserving_rows_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cart (id INTEGER PRIMARY KEY, item TEXT, price REAL);
         INSERT INTO cart (id, item, price) VALUES (3, 'Apple', 1.2);
         INSERT INTO cart (id, item, price) VALUES (7, 'Bread', 2.5);",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(current_schema_version(&conn).unwrap(), 1);
    assert!(column_not_null(&conn)
        .iter()
        .filter(|(name, _)| name != "id")
        .all(|(_, not_null)| *not_null));

    let rows: Vec<(i64, String, f64)> = conn
        .prepare("SELECT id, item, price FROM cart ORDER BY id;")
        .unwrap()
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        rows,
        vec![(3, "Apple".to_string(), 1.2), (7, "Bread".to_string(), 2.5)]
    );
}

#[test]
fn legacy_rows_with_nulls_are_dropped_by_migration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy-nulls.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE cart (id INTEGER PRIMARY KEY, item TEXT, price REAL);
         INSERT INTO cart (item, price) VALUES ('Apple', 1.2);
         INSERT INTO cart (item, price) VALUES (NULL, 3.0);
         INSERT INTO cart (item, price) VALUES ('Milk', NULL);",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let names: Vec<String> = conn
        .prepare("SELECT item FROM cart;")
        .unwrap()
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(names, vec!["Apple".to_string()]);
}

#[test]
fn null_inserts_fail_after_migration() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute("INSERT INTO cart (item, price) VALUES (NULL, 1.0);", [])
        .unwrap_err();
    assert!(err.to_string().contains("NOT NULL"));
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER);
         INSERT INTO schema_version (version) VALUES (999);",
    )
    .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
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

fn column_not_null(conn: &Connection) -> Vec<(String, bool)> {
    conn.prepare("PRAGMA table_info(cart);")
        .unwrap()
        .query_map([], |row| {
            Ok((row.get::<_, String>("name")?, row.get::<_, i64>("notnull")? == 1))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn version_rows(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM schema_version;", [], |row| row.get(0))
        .unwrap()
}
