//! Unit tests for the key-value stores, run against both implementations.

use linkstash::database::{Database, KeyValueStore, MemoryStore, SqliteStore};
use rstest::rstest;
use tempfile::TempDir;

fn sqlite() -> Box<dyn KeyValueStore> {
    Box::new(SqliteStore::new(Database::open_in_memory().unwrap()))
}

fn memory() -> Box<dyn KeyValueStore> {
    Box::new(MemoryStore::new())
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_set_get_remove(#[case] mut store: Box<dyn KeyValueStore>) {
    assert!(store.get_item("texts").unwrap().is_none());

    store.set_item("texts", "[]").unwrap();
    assert_eq!(store.get_item("texts").unwrap().as_deref(), Some("[]"));

    store.set_item("texts", "[\"a\"]").unwrap();
    assert_eq!(store.get_item("texts").unwrap().as_deref(), Some("[\"a\"]"));

    store.remove_item("texts").unwrap();
    assert!(store.get_item("texts").unwrap().is_none());
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_entries_lists_each_key_once(#[case] mut store: Box<dyn KeyValueStore>) {
    store.set_item("b", "2").unwrap();
    store.set_item("a", "1").unwrap();
    store.set_item("a", "11").unwrap();

    let entries = store.entries().unwrap();
    assert_eq!(
        entries,
        vec![
            ("a".to_string(), "11".to_string()),
            ("b".to_string(), "2".to_string()),
        ]
    );
}

#[rstest]
#[case::sqlite(sqlite())]
#[case::memory(memory())]
fn test_remove_missing_key_is_ok(#[case] mut store: Box<dyn KeyValueStore>) {
    assert!(store.remove_item("nothing").is_ok());
}

#[test]
fn test_sqlite_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kv.db");

    {
        let mut store = SqliteStore::new(Database::open(&path).unwrap());
        store.set_item("texts", "[1,2,3]").unwrap();
    }

    let store = SqliteStore::new(Database::open(&path).unwrap());
    assert_eq!(store.get_item("texts").unwrap().as_deref(), Some("[1,2,3]"));
}
