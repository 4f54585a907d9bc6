//! Shared, serialized access to a [`ListController`].
//!
//! All mutations go through one lock, so two overlapping adds cannot both
//! start from the same snapshot of the list. The preview fetch of an add
//! runs before the lock is taken; only the append-and-persist step is
//! serialized.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::list_controller::ListController;
use crate::database::KeyValueStore;
use crate::services::preview_fetcher::PreviewSource;
use crate::types::errors::ListError;
use crate::types::item::Item;
use crate::types::quota::QuotaEstimate;

pub struct ListHandle<S: KeyValueStore, P: PreviewSource + 'static> {
    inner: Arc<Mutex<ListController<S, P>>>,
}

impl<S: KeyValueStore, P: PreviewSource + 'static> Clone for ListHandle<S, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore, P: PreviewSource + 'static> ListHandle<S, P> {
    pub fn new(controller: ListController<S, P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn load_initial(&self) -> Result<(), ListError> {
        self.inner.lock().await.load_initial()
    }

    /// Saves `text` as a new item. Empty text is a no-op.
    pub async fn add(&self, text: &str) -> Result<Option<Item>, ListError> {
        if text.is_empty() {
            return Ok(None);
        }
        let task = self.inner.lock().await.preview_task(text);
        let preview = task.await;
        self.inner.lock().await.insert(text, preview)
    }

    pub async fn remove(&self, id: i64) -> Result<bool, ListError> {
        self.inner.lock().await.remove(id)
    }

    pub async fn items(&self) -> Vec<Item> {
        self.inner.lock().await.items().to_vec()
    }

    pub async fn quota(&self) -> QuotaEstimate {
        self.inner.lock().await.quota()
    }

    /// Locks the controller for direct access.
    pub async fn lock(&self) -> MutexGuard<'_, ListController<S, P>> {
        self.inner.lock().await
    }
}
