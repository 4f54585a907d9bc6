// LinkStash services
// Services provide the building blocks the list controller is assembled from:
// persistence, quota estimation, link previews, URL checks and configuration.

pub mod config_engine;
pub mod preview_fetcher;
pub mod quota_estimator;
pub mod storage_adapter;
pub mod url_validator;
