//! # Feed Session
//!
//! One viewer's view of the feed: their preferences, the current selection
//! and the likes they have given during the session.
//!
//! Loads are split in two so callers can run the fetch elsewhere:
//! `begin_load` hands out a ticket and `complete_load` installs the result.
//! Every ticket carries a generation number and only the newest ticket can
//! install its result, so a slow load that finishes after a newer one is
//! dropped instead of overwriting it.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::{Category, PreferenceSet, VideoId, ViewerId};
use sources::{viewer_context::build_viewer_context, Candidate, FeedRequest, PreferenceStore, ViewerContext};
use tracing::{debug, info, warn};

use crate::selection::FeedSelection;
use crate::selector::{into_selection, FeedSelector};

/// A load that has been started but not yet installed
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    context: ViewerContext,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Preferences and request as they were when the load started
    pub fn context(&self) -> &ViewerContext {
        &self.context
    }
}

pub struct FeedSession {
    viewer_id: ViewerId,
    selector: FeedSelector,
    preference_store: Arc<dyn PreferenceStore>,
    preferences: PreferenceSet,
    request: FeedRequest,
    selection: FeedSelection,
    liked: HashSet<VideoId>,
    latest_generation: u64,
}

impl FeedSession {
    /// Open a session. A preference store failure is logged and the
    /// session starts from default preferences.
    pub async fn open(
        viewer_id: impl Into<ViewerId>,
        selector: FeedSelector,
        preference_store: Arc<dyn PreferenceStore>,
    ) -> Self {
        let viewer_id = viewer_id.into();
        let preferences = match build_viewer_context(preference_store.as_ref(), &viewer_id, FeedRequest::default()).await {
            Ok(context) => context.preferences,
            Err(e) => {
                warn!("Using default preferences for viewer {}: {:#}", viewer_id, e);
                PreferenceSet::default()
            }
        };
        info!("Opened session for viewer {} ({})", viewer_id, preferences.summary());

        Self {
            viewer_id,
            selector,
            preference_store,
            preferences,
            request: FeedRequest::default(),
            selection: FeedSelection::default(),
            liked: HashSet::new(),
            latest_generation: 0,
        }
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    pub fn request(&self) -> FeedRequest {
        self.request
    }

    pub fn selection(&self) -> &FeedSelection {
        &self.selection
    }

    /// Cursor navigation goes through here
    pub fn selection_mut(&mut self) -> &mut FeedSelection {
        &mut self.selection
    }

    pub fn selector(&self) -> &FeedSelector {
        &self.selector
    }

    /// Start a load for `request`. Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self, request: FeedRequest) -> LoadTicket {
        self.latest_generation += 1;
        self.request = request;
        debug!(
            "Issued load generation {} for viewer {}",
            self.latest_generation, self.viewer_id
        );
        LoadTicket {
            generation: self.latest_generation,
            context: ViewerContext::new(self.viewer_id.clone())
                .with_preferences(self.preferences.clone())
                .with_request(request),
        }
    }

    /// Install the result of a load. Returns false, changing nothing, when
    /// a newer load has been started since `ticket` was issued.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Candidate>>) -> bool {
        if ticket.generation != self.latest_generation {
            debug!(
                "Dropping stale load generation {} (latest is {})",
                ticket.generation, self.latest_generation
            );
            return false;
        }
        self.selection = into_selection(result, &ticket.context);
        true
    }

    /// Load `request` and install the result
    pub async fn reload(&mut self, request: FeedRequest) -> &FeedSelection {
        let ticket = self.begin_load(request);
        let result = self.selector.select(ticket.context()).await;
        self.complete_load(ticket, result);
        &self.selection
    }

    /// Reload with the current request
    pub async fn refresh(&mut self) -> &FeedSelection {
        self.reload(self.request).await
    }

    /// Flip a preferred category and save. Returns whether it is now preferred.
    /// The current selection is left alone until the next load.
    pub async fn toggle_preferred(&mut self, category: Category) -> Result<bool> {
        self.update_preferences(|prefs| prefs.toggle_preferred(category)).await
    }

    /// Flip a blocked category and save. Returns whether it is now blocked.
    pub async fn toggle_blocked(&mut self, category: Category) -> Result<bool> {
        self.update_preferences(|prefs| prefs.toggle_blocked(category)).await
    }

    pub async fn toggle_parental_mode(&mut self) -> Result<bool> {
        self.update_preferences(PreferenceSet::toggle_parental_mode).await
    }

    pub fn is_liked(&self, video_id: &str) -> bool {
        self.liked.contains(video_id)
    }

    /// Like or unlike a video, returning its new like count. The count in
    /// the current selection is updated to match the catalog.
    ///
    /// Only a change of state touches the counter: liking an already liked
    /// video, or unliking one this viewer never liked, returns the current
    /// count unchanged.
    pub async fn toggle_like(&mut self, video_id: &str, liked: bool) -> Result<u64> {
        let likes = if liked == self.is_liked(video_id) {
            debug!("Video {} already in like state {}", video_id, liked);
            self.selector.like_count(video_id).await?
        } else {
            self.selector.toggle_like(video_id, liked).await?
        };
        if liked {
            self.liked.insert(video_id.to_string());
        } else {
            self.liked.remove(video_id);
        }
        self.selection.update_likes(video_id, likes);
        Ok(likes)
    }

    /// Flip the like on the video under the cursor. Returns `None` on an
    /// empty feed.
    pub async fn toggle_like_current(&mut self) -> Result<Option<(bool, u64)>> {
        let Some(video_id) = self.selection.current().map(|item| item.video.id.clone()) else {
            return Ok(None);
        };
        let liked = !self.is_liked(&video_id);
        let likes = self.toggle_like(&video_id, liked).await?;
        Ok(Some((liked, likes)))
    }

    /// Apply `change` to a copy of the preferences and keep it only once
    /// the store has accepted it
    async fn update_preferences<T>(&mut self, change: impl FnOnce(&mut PreferenceSet) -> T) -> Result<T> {
        let mut updated = self.preferences.clone();
        let outcome = change(&mut updated);
        self.preference_store
            .save(&self.viewer_id, &updated)
            .await
            .with_context(|| format!("Failed to save preferences for viewer {}", self.viewer_id))?;
        info!("Saved preferences for viewer {}: {}", self.viewer_id, updated.summary());
        self.preferences = updated;
        Ok(outcome)
    }
}
