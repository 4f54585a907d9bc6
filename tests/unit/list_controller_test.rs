//! Unit tests for the ListController: add, remove, initial load and quota
//! bookkeeping, using stub preview sources and in-memory storage.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use linkstash::database::{Database, KeyValueStore, MemoryStore, SqliteStore};
use linkstash::managers::list_controller::ListController;
use linkstash::services::preview_fetcher::PreviewSource;
use linkstash::services::quota_estimator;
use linkstash::services::storage_adapter::{StorageAdapter, StorageAdapterTrait, LIST_KEY};
use linkstash::types::config::{CorruptDataPolicy, PreviewPolicy};
use linkstash::types::errors::{ListError, PreviewError, StorageError};
use linkstash::types::preview::{Preview, PreviewOutcome};
use linkstash::types::quota::ASSUMED_CAPACITY_BYTES;

/// Preview source that answers every request the same way and counts calls.
struct StubPreview {
    preview: Option<Preview>,
    calls: AtomicUsize,
}

impl StubPreview {
    fn fetched(title: &str, image: &str) -> Arc<Self> {
        Arc::new(Self {
            preview: Some(Preview {
                title: title.to_string(),
                favicon_url: image.to_string(),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(Self {
            preview: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreviewSource for StubPreview {
    async fn fetch(&self, _url: &str) -> PreviewOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.preview {
            Some(p) => PreviewOutcome::Fetched(p.clone()),
            None => PreviewOutcome::Defaulted(PreviewError::Network("offline".to_string())),
        }
    }
}

fn controller(
    source: Arc<StubPreview>,
    policy: PreviewPolicy,
) -> ListController<MemoryStore, StubPreview> {
    let adapter = StorageAdapter::new(MemoryStore::new(), CorruptDataPolicy::Reset);
    ListController::new(adapter, source, policy)
}

fn stored_json(ctl: &ListController<MemoryStore, StubPreview>) -> serde_json::Value {
    let raw = ctl.adapter().store().get_item(LIST_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[tokio::test]
async fn test_add_without_network_saves_empty_preview() {
    let source = StubPreview::offline();
    let mut ctl = controller(source.clone(), PreviewPolicy::Always);

    let item = ctl.add("hello").await.unwrap().expect("item should be created");

    assert_eq!(item.text, "hello");
    assert_eq!(item.title, "");
    assert_eq!(item.favicon_url, "");
    assert!(item.id > 0);
    assert_eq!(item.created_time, Some(item.id));
    assert_eq!(source.calls(), 1);

    let json = stored_json(&ctl);
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["text"], "hello");
    assert_eq!(arr[0]["title"], "");
    assert_eq!(arr[0]["faviconUrl"], "");
    assert_eq!(arr[0]["id"], item.id);
}

#[tokio::test]
async fn test_add_url_carries_preview_fields() {
    let source = StubPreview::fetched("Example", "https://example.com/fav.png");
    let mut ctl = controller(source, PreviewPolicy::Always);

    let item = ctl.add("https://example.com").await.unwrap().unwrap();

    assert_eq!(item.title, "Example");
    assert_eq!(item.favicon_url, "https://example.com/fav.png");
    assert_eq!(ctl.items(), &[item]);
}

#[tokio::test]
async fn test_add_empty_text_is_noop() {
    let source = StubPreview::offline();
    let mut ctl = controller(source.clone(), PreviewPolicy::Always);
    ctl.set_input("");

    assert!(ctl.add("").await.unwrap().is_none());
    assert!(ctl.submit().await.unwrap().is_none());

    assert!(ctl.items().is_empty());
    assert_eq!(source.calls(), 0);
    assert!(ctl.adapter().store().get_item(LIST_KEY).unwrap().is_none());
}

#[tokio::test]
async fn test_whitespace_is_not_trimmed() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    let item = ctl.add("  ").await.unwrap().expect("whitespace is saved as-is");
    assert_eq!(item.text, "  ");
}

#[tokio::test]
async fn test_submit_uses_and_clears_input() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    ctl.set_input("remember the milk");
    assert_eq!(ctl.input(), "remember the milk");

    let item = ctl.submit().await.unwrap().unwrap();

    assert_eq!(item.text, "remember the milk");
    assert_eq!(ctl.input(), "");
}

#[tokio::test]
async fn test_add_clears_input() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    ctl.set_input("draft");
    ctl.add("something else").await.unwrap();
    assert_eq!(ctl.input(), "");
}

#[tokio::test]
async fn test_items_keep_insertion_order_and_unique_ids() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    for text in ["one", "two", "three", "four"] {
        ctl.add(text).await.unwrap();
    }

    let texts: Vec<&str> = ctl.items().iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three", "four"]);

    let ids: Vec<i64> = ctl.items().iter().map(|i| i.id).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids must be unique: {:?}", ids);
}

#[tokio::test]
async fn test_url_only_policy_skips_plain_text() {
    let source = StubPreview::fetched("Title", "img");
    let mut ctl = controller(source.clone(), PreviewPolicy::UrlOnly);

    let note = ctl.add("just a note").await.unwrap().unwrap();
    assert_eq!(note.title, "");
    assert_eq!(source.calls(), 0);

    let link = ctl.add("www.rust-lang.org").await.unwrap().unwrap();
    assert_eq!(link.title, "Title");
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_always_policy_fetches_plain_text_too() {
    let source = StubPreview::fetched("Title", "img");
    let mut ctl = controller(source.clone(), PreviewPolicy::Always);
    assert!(ctl.wants_preview("just a note"));

    ctl.add("just a note").await.unwrap();
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_never_policy_does_not_fetch() {
    let source = StubPreview::fetched("Title", "img");
    let mut ctl = controller(source.clone(), PreviewPolicy::Never);

    let item = ctl.add("https://example.com").await.unwrap().unwrap();
    assert_eq!(item.title, "");
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_remove_existing_item() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    let a = ctl.add("a").await.unwrap().unwrap();
    let b = ctl.add("b").await.unwrap().unwrap();
    let c = ctl.add("c").await.unwrap().unwrap();

    assert!(ctl.remove(b.id).unwrap());

    assert_eq!(ctl.items(), &[a.clone(), c.clone()]);
    assert_eq!(ctl.adapter().load().unwrap(), vec![a, c]);
}

#[tokio::test]
async fn test_remove_missing_id_is_noop() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    ctl.add("a").await.unwrap();
    let before = ctl.items().to_vec();
    let stored_before = ctl.adapter().store().get_item(LIST_KEY).unwrap();

    assert!(!ctl.remove(42).unwrap());

    assert_eq!(ctl.items(), before.as_slice());
    assert_eq!(ctl.adapter().store().get_item(LIST_KEY).unwrap(), stored_before);
}

#[tokio::test]
async fn test_remove_on_empty_list_is_noop() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    assert!(!ctl.remove(1).unwrap());
    assert!(ctl.items().is_empty());
}

#[tokio::test]
async fn test_quota_tracks_mutations() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    assert_eq!(ctl.quota().used_bytes, 0);

    let item = ctl.add("hello").await.unwrap().unwrap();
    let raw = ctl.adapter().store().get_item(LIST_KEY).unwrap().unwrap();
    assert_eq!(ctl.quota().used_bytes, raw.len() as i64 * 2);
    assert_eq!(ctl.quota(), quota_estimator::estimate(ctl.adapter().store()));

    ctl.remove(item.id).unwrap();
    // "[]" is all that is left
    assert_eq!(ctl.quota().used_bytes, 4);
}

#[test]
fn test_load_initial_hydrates_and_computes_quota() {
    let mut store = SqliteStore::new(Database::open_in_memory().unwrap());
    store
        .set_item(LIST_KEY, r#"[{"id":1,"text":"a","title":"","faviconUrl":""}]"#)
        .unwrap();
    let adapter = StorageAdapter::new(store, CorruptDataPolicy::Reset);
    let mut ctl = ListController::new(adapter, StubPreview::offline(), PreviewPolicy::Never);
    assert!(ctl.items().is_empty());

    ctl.load_initial().unwrap();

    assert_eq!(ctl.items().len(), 1);
    assert_eq!(ctl.items()[0].text, "a");
    assert!(ctl.quota().used_bytes > 0);
}

#[test]
fn test_load_initial_propagates_corrupt_data_when_configured() {
    let mut store = MemoryStore::new();
    store.set_item(LIST_KEY, "not json").unwrap();
    let adapter = StorageAdapter::new(store, CorruptDataPolicy::Propagate);
    let mut ctl = ListController::new(adapter, StubPreview::offline(), PreviewPolicy::Never);

    assert!(matches!(
        ctl.load_initial(),
        Err(ListError::Storage(StorageError::Corrupt(_)))
    ));
}

#[tokio::test]
async fn test_failed_save_leaves_memory_and_storage_unchanged() {
    let mut ctl = controller(StubPreview::offline(), PreviewPolicy::Never);
    ctl.add("small").await.unwrap();
    ctl.set_input("draft");
    let items_before = ctl.items().to_vec();
    let stored_before = ctl.adapter().store().get_item(LIST_KEY).unwrap();

    let huge = "x".repeat((ASSUMED_CAPACITY_BYTES / 2) as usize);
    let result = ctl.add(&huge).await;

    assert!(matches!(
        result,
        Err(ListError::Storage(StorageError::QuotaExceeded { .. }))
    ));
    assert_eq!(ctl.items(), items_before.as_slice());
    assert_eq!(ctl.adapter().store().get_item(LIST_KEY).unwrap(), stored_before);
    assert_eq!(ctl.input(), "draft", "input is kept when the save fails");
}

#[test]
fn test_remove_succeeds_when_store_is_over_capacity() {
    let mut store = MemoryStore::new();
    store
        .set_item(
            LIST_KEY,
            r#"[{"id":1,"text":"a","title":"","faviconUrl":""},{"id":2,"text":"b","title":"","faviconUrl":""}]"#,
        )
        .unwrap();
    let filler = "o".repeat((ASSUMED_CAPACITY_BYTES / 2) as usize + 10);
    store.set_item("other-app", &filler).unwrap();
    let adapter = StorageAdapter::new(store, CorruptDataPolicy::Reset);
    let mut ctl = ListController::new(adapter, StubPreview::offline(), PreviewPolicy::Never);
    ctl.load_initial().unwrap();
    assert!(ctl.quota().remaining_bytes < 0);

    assert!(ctl.remove(1).unwrap());

    let ids: Vec<i64> = ctl.adapter().load().unwrap().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_legacy_ids_are_stable_across_loads() {
    let mut db_store = SqliteStore::new(Database::open_in_memory().unwrap());
    db_store.set_item(LIST_KEY, r#"["first","second"]"#).unwrap();
    let adapter = StorageAdapter::new(db_store, CorruptDataPolicy::Reset);
    let mut ctl = ListController::new(adapter, StubPreview::offline(), PreviewPolicy::Never);

    ctl.load_initial().unwrap();
    let first_ids: Vec<i64> = ctl.items().iter().map(|i| i.id).collect();
    std::thread::sleep(std::time::Duration::from_millis(5));
    ctl.load_initial().unwrap();
    let second_ids: Vec<i64> = ctl.items().iter().map(|i| i.id).collect();
    assert_eq!(first_ids, second_ids);

    let raw = ctl.adapter().store().get_item(LIST_KEY).unwrap().unwrap();
    assert!(raw.starts_with("[{"), "upgraded list is written back: {}", raw);

    assert!(ctl.remove(first_ids[0]).unwrap());
    let texts: Vec<String> = ctl.adapter().load().unwrap().into_iter().map(|i| i.text).collect();
    assert_eq!(texts, vec!["second".to_string()]);
}
