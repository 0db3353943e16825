//! Helpers to build a ViewerContext from the preference store

use crate::traits::PreferenceStore;
use crate::types::{FeedRequest, ViewerContext};
use anyhow::{Context, Result};

/// Load the viewer's stored preferences and pair them with a request
pub async fn build_viewer_context(
    store: &dyn PreferenceStore,
    viewer_id: &str,
    request: FeedRequest,
) -> Result<ViewerContext> {
    let preferences = store
        .load(viewer_id)
        .await
        .with_context(|| format!("Failed to load preferences for viewer {}", viewer_id))?;

    Ok(ViewerContext::new(viewer_id)
        .with_preferences(preferences)
        .with_request(request))
}
