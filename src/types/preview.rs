use serde::{Deserialize, Serialize};

use super::errors::PreviewError;

/// Link metadata shown next to a saved item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub title: String,
    pub favicon_url: String,
}

/// Result of a single preview attempt.
///
/// `Defaulted` carries the reason the preview came back empty so callers can
/// log it; it is never an error for the caller.
#[derive(Debug)]
pub enum PreviewOutcome {
    Fetched(Preview),
    Defaulted(PreviewError),
}

impl PreviewOutcome {
    pub fn is_fetched(&self) -> bool {
        matches!(self, PreviewOutcome::Fetched(_))
    }

    /// Collapses the outcome to a preview, empty on failure.
    pub fn into_preview(self) -> Preview {
        match self {
            PreviewOutcome::Fetched(preview) => preview,
            PreviewOutcome::Defaulted(_) => Preview::default(),
        }
    }
}
