//! LinkStash, a minimal save-a-link/note stash.
//!
//! Items are kept in a local key-value storage area, optionally enriched
//! with a title and favicon from a link preview service.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
