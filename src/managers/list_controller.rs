//! List Controller for LinkStash.
//!
//! Owns the in-memory item list and the current input text. Every mutation
//! builds the next list, writes it through the storage adapter, and only
//! then replaces the in-memory list, so memory and storage stay in step even
//! when a write is refused.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::database::KeyValueStore;
use crate::services::preview_fetcher::PreviewSource;
use crate::services::quota_estimator;
use crate::services::storage_adapter::{StorageAdapter, StorageAdapterTrait};
use crate::services::url_validator::is_valid_url;
use crate::types::config::PreviewPolicy;
use crate::types::errors::{ListError, PreviewError};
use crate::types::item::{next_item_id, now_millis, Item};
use crate::types::preview::{Preview, PreviewOutcome};
use crate::types::quota::QuotaEstimate;

/// In-memory item list kept in sync with a storage area.
pub struct ListController<S: KeyValueStore, P: PreviewSource + 'static> {
    adapter: StorageAdapter<S>,
    fetcher: Arc<P>,
    policy: PreviewPolicy,
    items: Vec<Item>,
    input: String,
    quota: QuotaEstimate,
}

impl<S: KeyValueStore, P: PreviewSource + 'static> ListController<S, P> {
    /// Creates a controller with an empty list. Call [`load_initial`](Self::load_initial)
    /// to hydrate it from storage.
    pub fn new(adapter: StorageAdapter<S>, fetcher: Arc<P>, policy: PreviewPolicy) -> Self {
        let quota = quota_estimator::estimate(adapter.store());
        Self {
            adapter,
            fetcher,
            policy,
            items: Vec::new(),
            input: String::new(),
            quota,
        }
    }

    /// Replaces the in-memory list with the persisted one and recomputes quota.
    ///
    /// Legacy entries are written back with their new ids right away so
    /// the ids stay stable across loads.
    pub fn load_initial(&mut self) -> Result<(), ListError> {
        let (items, upgraded) = self.adapter.load_upgrading()?;
        if upgraded > 0 {
            self.adapter.save(&items)?;
            info!(upgraded, "legacy entries upgraded");
        }
        self.items = items;
        self.refresh_quota();
        info!(items = self.items.len(), "list loaded");
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn quota(&self) -> QuotaEstimate {
        self.quota
    }

    pub fn adapter(&self) -> &StorageAdapter<S> {
        &self.adapter
    }

    /// Whether `text` would trigger a preview request under the current policy.
    pub fn wants_preview(&self, text: &str) -> bool {
        match self.policy {
            PreviewPolicy::Always => true,
            PreviewPolicy::UrlOnly => is_valid_url(text),
            PreviewPolicy::Never => false,
        }
    }

    /// Returns a detached future resolving to the preview for `text`.
    ///
    /// The future borrows nothing from the controller, so callers can await
    /// it without holding a lock on the list.
    pub fn preview_task(&self, text: &str) -> impl Future<Output = Preview> + Send + 'static {
        let fetcher = if self.wants_preview(text) {
            Some(Arc::clone(&self.fetcher))
        } else {
            None
        };
        let text = text.to_string();

        async move {
            let outcome = match fetcher {
                Some(fetcher) => fetcher.fetch(&text).await,
                None => PreviewOutcome::Defaulted(PreviewError::Skipped),
            };
            log_outcome(&text, &outcome);
            outcome.into_preview()
        }
    }

    /// Saves `text` as a new item.
    ///
    /// Empty text is a no-op and returns `Ok(None)`; the text is not
    /// trimmed. Preview failures never fail the add.
    pub async fn add(&mut self, text: &str) -> Result<Option<Item>, ListError> {
        if text.is_empty() {
            return Ok(None);
        }
        let preview = self.preview_task(text).await;
        self.insert(text, preview)
    }

    /// Saves the current input text as a new item.
    pub async fn submit(&mut self) -> Result<Option<Item>, ListError> {
        let text = self.input.clone();
        self.add(&text).await
    }

    /// Appends an item built from `text` and an already resolved preview,
    /// persists, clears the input and recomputes quota.
    pub fn insert(&mut self, text: &str, preview: Preview) -> Result<Option<Item>, ListError> {
        if text.is_empty() {
            return Ok(None);
        }

        let now = now_millis();
        let max_id = self.items.iter().map(|i| i.id).max();
        let item = Item {
            id: next_item_id(max_id, now),
            text: text.to_string(),
            title: preview.title,
            favicon_url: preview.favicon_url,
            created_time: Some(now),
        };

        let mut next = self.items.clone();
        next.push(item.clone());
        self.adapter.save(&next)?;

        self.items = next;
        self.input.clear();
        self.refresh_quota();
        info!(id = item.id, has_title = !item.title.is_empty(), "item added");
        Ok(Some(item))
    }

    /// Removes the item with `id`.
    ///
    /// Returns `Ok(false)` without touching storage when no such item exists.
    pub fn remove(&mut self, id: i64) -> Result<bool, ListError> {
        if !self.items.iter().any(|i| i.id == id) {
            debug!(id, "remove ignored, no such item");
            return Ok(false);
        }

        let next: Vec<Item> = self.items.iter().filter(|i| i.id != id).cloned().collect();
        self.adapter.save(&next)?;

        self.items = next;
        self.refresh_quota();
        info!(id, "item removed");
        Ok(true)
    }

    /// Recomputes and stores the quota estimate.
    pub fn refresh_quota(&mut self) -> QuotaEstimate {
        self.quota = quota_estimator::estimate(self.adapter.store());
        debug!(
            used = self.quota.used_bytes,
            remaining_percent = self.quota.remaining_percent,
            "quota recomputed"
        );
        self.quota
    }
}

fn log_outcome(text: &str, outcome: &PreviewOutcome) {
    match outcome {
        PreviewOutcome::Fetched(_) => {}
        PreviewOutcome::Defaulted(PreviewError::Skipped | PreviewError::MissingApiKey) => {
            debug!(%text, "no preview requested");
        }
        PreviewOutcome::Defaulted(e) => {
            warn!(%text, error = %e, "preview failed, saving without metadata");
        }
    }
}
