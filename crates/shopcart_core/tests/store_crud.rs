use rusqlite::Connection;
use shopcart_core::db::open_db_in_memory;
use shopcart_core::{CartStore, Item, RepoError, SqliteCartStore};

#[test]
fn insert_returns_sequential_ids_and_list_keeps_row_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();

    assert_eq!(store.insert("Apple", 1.2).unwrap(), 1);
    assert_eq!(store.insert("Bread", 2.5).unwrap(), 2);

    assert_eq!(
        store.list_all().unwrap(),
        vec![Item::new(1, "Apple", 1.2), Item::new(2, "Bread", 2.5)]
    );
}

#[test]
fn delete_by_name_removes_every_matching_row() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();
    store.insert("Apple", 1.0).unwrap();
    store.insert("Milk", 0.9).unwrap();
    store.insert("Apple", 1.5).unwrap();

    assert_eq!(store.delete_by_name("Apple").unwrap(), 2);
    assert_eq!(store.delete_by_name("Apple").unwrap(), 0);

    let names: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(names, vec!["Milk".to_string()]);
}

#[test]
fn update_changes_name_price_or_both() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();
    let id = store.insert("Apple", 1.2).unwrap();

    assert_eq!(store.update("Apple", Some("Orange"), Some(2.0)).unwrap(), 1);
    assert_eq!(store.list_all().unwrap(), vec![Item::new(id, "Orange", 2.0)]);

    assert_eq!(store.update("Orange", Some("Pear"), None).unwrap(), 1);
    assert_eq!(store.list_all().unwrap(), vec![Item::new(id, "Pear", 2.0)]);

    assert_eq!(store.update("Pear", None, Some(0.0)).unwrap(), 1);
    assert_eq!(store.list_all().unwrap(), vec![Item::new(id, "Pear", 0.0)]);
}

#[test]
fn update_without_changes_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();
    store.insert("Apple", 1.2).unwrap();

    assert_eq!(store.update("Apple", None, None).unwrap(), 0);
    assert_eq!(store.list_all().unwrap(), vec![Item::new(1, "Apple", 1.2)]);
}

#[test]
fn update_unknown_name_changes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();

    assert_eq!(store.update("Ghost", Some("Spirit"), None).unwrap(), 0);
}

#[test]
fn store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteCartStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn store_rejects_connection_without_cart_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER);
         INSERT INTO schema_version (version) VALUES (1);",
    )
    .unwrap();

    assert!(matches!(
        SqliteCartStore::try_new(&conn),
        Err(RepoError::MissingRequiredTable("cart"))
    ));
}

#[test]
fn store_rejects_cart_table_missing_price_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE schema_version (version INTEGER);
         INSERT INTO schema_version (version) VALUES (1);
         CREATE TABLE cart (id INTEGER PRIMARY KEY, item TEXT NOT NULL);",
    )
    .unwrap();

    assert!(matches!(
        SqliteCartStore::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "cart",
            column: "price"
        })
    ));
}

#[test]
fn persistence_errors_propagate() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteCartStore::try_new(&conn).unwrap();
    conn.execute_batch("DROP TABLE cart;").unwrap();

    assert!(matches!(store.insert("Apple", 1.0), Err(RepoError::Db(_))));
    assert!(matches!(store.list_all(), Err(RepoError::Db(_))));
}
