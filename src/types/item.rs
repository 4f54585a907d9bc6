use serde::{Deserialize, Serialize};

/// One saved link or note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub favicon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<i64>,
}

/// A persisted list entry as it may appear on disk.
///
/// Early versions stored a bare array of strings under the same key.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredEntry {
    Item(Item),
    Legacy(String),
}

/// Current UNIX time in milliseconds.
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Picks an id for a new item: the timestamp, bumped past `max_existing`
/// when two items land in the same millisecond.
pub fn next_item_id(max_existing: Option<i64>, now_ms: i64) -> i64 {
    match max_existing {
        Some(max) if now_ms <= max => max + 1,
        _ => now_ms,
    }
}
