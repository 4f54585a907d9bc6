//! LinkStash database layer.
//!
//! Provides SQLite connection management, schema migrations and the
//! key-value stores the item list is persisted in.
//!
//! # Usage
//!
//! ```no_run
//! use linkstash::database::{Database, KeyValueStore, SqliteStore};
//!
//! let db = Database::open("linkstash.db").expect("failed to open database");
//! let mut store = SqliteStore::new(db);
//! store.set_item("texts", "[]").expect("write failed");
//! ```

pub mod connection;
pub mod kv_store;
pub mod migrations;

pub use connection::Database;
pub use kv_store::{KeyValueStore, MemoryStore, SqliteStore};
