//! Preview Fetcher for LinkStash.
//!
//! Asks a third-party link preview service for the title and image of a
//! saved entry. One request per entry, no retries: any failure produces
//! [`PreviewOutcome::Defaulted`], which callers collapse to empty metadata.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::types::config::PreviewConfig;
use crate::types::errors::PreviewError;
use crate::types::preview::{Preview, PreviewOutcome};

/// Source of link previews.
#[async_trait]
pub trait PreviewSource: Send + Sync {
    async fn fetch(&self, url: &str) -> PreviewOutcome;
}

/// Body returned by the preview service; other fields are ignored.
#[derive(Debug, Deserialize)]
struct PreviewResponse {
    title: String,
    image: String,
}

/// HTTP client for the link preview service.
pub struct PreviewFetcher {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl PreviewFetcher {
    /// Builds a fetcher from configuration.
    ///
    /// # Errors
    /// Returns `PreviewError::Network` if the HTTP client cannot be built.
    pub fn new(config: &PreviewConfig) -> Result<Self, PreviewError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| PreviewError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn request(&self, url: &str) -> Result<Preview, PreviewError> {
        let key = self.api_key.as_deref().ok_or(PreviewError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("key", key), ("q", url)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let parsed: PreviewResponse =
            serde_json::from_str(&body).map_err(|e| PreviewError::Decode(e.to_string()))?;

        Ok(Preview {
            title: parsed.title,
            favicon_url: parsed.image,
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> PreviewError {
    if e.is_timeout() {
        PreviewError::Timeout
    } else {
        PreviewError::Network(e.to_string())
    }
}

#[async_trait]
impl PreviewSource for PreviewFetcher {
    async fn fetch(&self, url: &str) -> PreviewOutcome {
        match self.request(url).await {
            Ok(preview) => {
                debug!(%url, title = %preview.title, "preview fetched");
                PreviewOutcome::Fetched(preview)
            }
            Err(e) => PreviewOutcome::Defaulted(e),
        }
    }
}
