use shopcart_core::db::open_db_in_memory;
use shopcart_core::{AuditSink, Cart, Item, MemoryAuditSink, SqliteCartStore};
use std::fs;

#[test]
fn shopping_list_and_json_exports_reflect_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let mut cart = Cart::open(SqliteCartStore::try_new(&conn).unwrap()).unwrap();
    cart.add("Apple", 1.2).unwrap();
    cart.add("Bread", 2.0).unwrap();

    let list_path = dir.path().join("shopping_list.txt");
    assert!(cart.export_shopping_list(&list_path));
    assert_eq!(
        fs::read_to_string(&list_path).unwrap(),
        "Apple, 1.2\nBread, 2.0\n"
    );

    let json_path = dir.path().join("cart.json");
    assert!(cart.export_json(&json_path));
    let decoded: Vec<Item> = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(decoded, cart.items());
}

#[test]
fn audit_log_export_writes_recorded_lines() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let audit = MemoryAuditSink::new();
    let mut cart = Cart::load(SqliteCartStore::try_new(&conn).unwrap(), &audit).unwrap();
    cart.add("Apple", 1.2).unwrap();
    cart.remove("Apple").unwrap();

    let path = dir.path().join("logs.txt");
    assert!(cart.export_audit_log(&path));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "INFO Item Apple with ID 1 and price 1.20 $ added to the cart.\n\
         INFO Item Apple removed from the cart."
    );
}

#[test]
fn export_failures_are_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_in_memory().unwrap();
    let audit = MemoryAuditSink::new();
    let cart = Cart::load(SqliteCartStore::try_new(&conn).unwrap(), &audit).unwrap();

    let missing = dir.path().join("no-such-dir").join("cart.json");
    assert!(!cart.export_json(&missing));
    assert!(!cart.export_shopping_list(&missing));
    assert!(!missing.exists());

    let lines = audit.recorded();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("ERROR Failed to export shopping cart to"));
    assert!(lines[1].starts_with("ERROR Failed to export shopping list to"));
}
