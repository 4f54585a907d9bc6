//! Storage Adapter for LinkStash.
//!
//! Reads and writes the whole item list as one JSON array under a single
//! key of the storage area. Every save rewrites the full list.

use tracing::{debug, warn};

use crate::database::KeyValueStore;
use crate::services::quota_estimator;
use crate::types::config::CorruptDataPolicy;
use crate::types::errors::StorageError;
use crate::types::item::{next_item_id, now_millis, Item, StoredEntry};
use crate::types::quota::ASSUMED_CAPACITY_BYTES;

/// Key the item list is stored under.
pub const LIST_KEY: &str = "texts";

/// Trait defining list persistence operations.
pub trait StorageAdapterTrait {
    fn load(&self) -> Result<Vec<Item>, StorageError>;
    fn save(&mut self, items: &[Item]) -> Result<(), StorageError>;
}

/// Persists the item list into a key-value store.
pub struct StorageAdapter<S: KeyValueStore> {
    store: S,
    on_corrupt: CorruptDataPolicy,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    pub fn new(store: S, on_corrupt: CorruptDataPolicy) -> Self {
        Self { store, on_corrupt }
    }

    /// Returns the underlying store, e.g. for quota estimation.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the persisted list and reports how many legacy string entries
    /// were turned into items.
    ///
    /// Upgraded items get fresh ids, so callers should write the list back
    /// when the count is non-zero.
    pub fn load_upgrading(&self) -> Result<(Vec<Item>, usize), StorageError> {
        let raw = match self.store.get_item(LIST_KEY)? {
            Some(raw) => raw,
            None => return Ok((Vec::new(), 0)),
        };

        match serde_json::from_str::<Vec<StoredEntry>>(&raw) {
            Ok(entries) => Ok(Self::upgrade(entries)),
            Err(e) => match self.on_corrupt {
                CorruptDataPolicy::Reset => {
                    warn!(key = LIST_KEY, error = %e, "stored list is corrupt, starting empty");
                    Ok((Vec::new(), 0))
                }
                CorruptDataPolicy::Propagate => Err(StorageError::Corrupt(e.to_string())),
            },
        }
    }

    fn upgrade(entries: Vec<StoredEntry>) -> (Vec<Item>, usize) {
        let mut max_id = entries
            .iter()
            .filter_map(|e| match e {
                StoredEntry::Item(item) => Some(item.id),
                StoredEntry::Legacy(_) => None,
            })
            .max();
        let now = now_millis();
        let mut upgraded = 0;

        let items = entries
            .into_iter()
            .map(|entry| match entry {
                StoredEntry::Item(item) => item,
                StoredEntry::Legacy(text) => {
                    let id = next_item_id(max_id, now);
                    max_id = Some(id);
                    upgraded += 1;
                    Item {
                        id,
                        text,
                        title: String::new(),
                        favicon_url: String::new(),
                        created_time: None,
                    }
                }
            })
            .collect();
        (items, upgraded)
    }
}

impl<S: KeyValueStore> StorageAdapterTrait for StorageAdapter<S> {
    /// Loads the persisted list.
    ///
    /// A missing key yields an empty list. Unparseable content is handled
    /// according to the configured [`CorruptDataPolicy`].
    fn load(&self) -> Result<Vec<Item>, StorageError> {
        self.load_upgrading().map(|(items, _)| items)
    }

    /// Serializes and writes the full list.
    ///
    /// A write is refused only when it would both exceed the assumed
    /// capacity and grow current usage; shrinking writes always go through.
    fn save(&mut self, items: &[Item]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(items).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let needed = quota_estimator::projected_usage(&self.store, LIST_KEY, &json)?;
        if needed > ASSUMED_CAPACITY_BYTES && needed > quota_estimator::used_bytes(&self.store)? {
            return Err(StorageError::QuotaExceeded {
                needed,
                capacity: ASSUMED_CAPACITY_BYTES,
            });
        }

        self.store.set_item(LIST_KEY, &json)?;
        debug!(items = items.len(), bytes = needed, "list saved");
        Ok(())
    }
}
