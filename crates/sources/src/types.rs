//! Shared types for candidate generation.

use catalog::{Category, PreferenceSet, VideoRecord, ViewerId};
use std::fmt;
use std::str::FromStr;

/// How the feed is ordered when no explicit category is requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeedMode {
    /// Preferred categories first, as blocks in preference order
    #[default]
    Recommended,
    /// Whole catalog, newest first
    Recent,
    /// Whole catalog, randomly permuted
    Shuffle,
}

impl FeedMode {
    pub const ALL: [FeedMode; 3] = [FeedMode::Recommended, FeedMode::Recent, FeedMode::Shuffle];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedMode::Recommended => "recommended",
            FeedMode::Recent => "recent",
            FeedMode::Shuffle => "shuffle",
        }
    }
}

impl fmt::Display for FeedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "recommended" | "for-you" | "for_you" => Ok(FeedMode::Recommended),
            "recent" => Ok(FeedMode::Recent),
            "shuffle" => Ok(FeedMode::Shuffle),
            other => Err(format!(
                "unknown feed mode '{}' (expected recommended, recent or shuffle)",
                other
            )),
        }
    }
}

/// What the viewer asked to see
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedRequest {
    /// Overrides all preference-based selection when set
    pub explicit_category: Option<Category>,
    pub mode: FeedMode,
}

impl FeedRequest {
    pub fn new(mode: FeedMode) -> Self {
        Self {
            explicit_category: None,
            mode,
        }
    }

    pub fn for_category(category: Category) -> Self {
        Self {
            explicit_category: Some(category),
            mode: FeedMode::default(),
        }
    }
}

/// Which source produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateSource {
    /// Requested category browse
    Category(Category),
    /// One of the viewer's preferred categories
    Preferred(Category),
    /// Catalog-wide recency listing
    Recent,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateSource::Category(c) => write!(f, "browsing {}", c.label()),
            CandidateSource::Preferred(c) => write!(f, "you prefer {}", c.label()),
            CandidateSource::Recent => f.write_str("recently added"),
        }
    }
}

/// A video that may end up in the feed, tagged with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub video: VideoRecord,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(video: VideoRecord, source: CandidateSource) -> Self {
        Self { video, source }
    }

    pub fn video_id(&self) -> &str {
        &self.video.id
    }

    pub fn category(&self) -> Category {
        self.video.category
    }
}

/// Everything a selection pass needs to know about the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerContext {
    pub viewer_id: ViewerId,
    pub preferences: PreferenceSet,
    pub request: FeedRequest,
}

impl ViewerContext {
    /// Context with default preferences and the default request
    pub fn new(viewer_id: impl Into<ViewerId>) -> Self {
        Self {
            viewer_id: viewer_id.into(),
            preferences: PreferenceSet::default(),
            request: FeedRequest::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: PreferenceSet) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_request(mut self, request: FeedRequest) -> Self {
        self.request = request;
        self
    }

    /// Shuffle only applies to mode-driven browsing, never to a category browse
    pub fn shuffles(&self) -> bool {
        self.request.mode == FeedMode::Shuffle && self.request.explicit_category.is_none()
    }
}
