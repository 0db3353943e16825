//! The feed as the viewer sees it: an ordered list with a cursor.

use catalog::VideoRecord;
use sources::{Candidate, CandidateSource, ViewerContext};

/// One entry in the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub video: VideoRecord,
    pub source: CandidateSource,
    /// Short reason shown next to the video
    pub explanation: String,
}

impl FeedItem {
    fn from_candidate(candidate: Candidate, shuffled: bool) -> Self {
        let explanation = match candidate.source {
            CandidateSource::Category(category) => format!("Browsing {}", category.label()),
            CandidateSource::Preferred(category) => format!("Because you prefer {}", category.label()),
            CandidateSource::Recent if shuffled => "Shuffled from recent uploads".to_string(),
            CandidateSource::Recent => "Recently added".to_string(),
        };
        Self {
            video: candidate.video,
            source: candidate.source,
            explanation,
        }
    }
}

/// Result of one load. An empty selection is a normal state; a failed load
/// is also empty but carries the error message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSelection {
    items: Vec<FeedItem>,
    current_index: usize,
    error: Option<String>,
}

impl FeedSelection {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            current_index: 0,
            error: None,
        }
    }

    pub fn from_candidates(candidates: Vec<Candidate>, context: &ViewerContext) -> Self {
        let shuffled = context.shuffles();
        Self::new(
            candidates
                .into_iter()
                .map(|candidate| FeedItem::from_candidate(candidate, shuffled))
                .collect(),
        )
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            current_index: 0,
            error: Some(error.into()),
        }
    }

    /// Advance the cursor. Returns false, leaving the cursor alone, at the last item.
    pub fn next(&mut self) -> bool {
        if self.current_index + 1 < self.items.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Step back. Returns false at the first item.
    pub fn previous(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor, clamped to the last item
    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index.min(self.items.len().saturating_sub(1));
    }

    pub fn current(&self) -> Option<&FeedItem> {
        self.items.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Mirror a like count returned by the catalog into the local copy
    pub(crate) fn update_likes(&mut self, video_id: &str, likes: u64) {
        for item in self.items.iter_mut().filter(|item| item.video.id == video_id) {
            item.video.likes = likes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Category;
    use chrono::Utc;
    use sources::{FeedMode, FeedRequest};

    fn candidate(id: &str, source: CandidateSource) -> Candidate {
        Candidate::new(
            VideoRecord {
                id: id.to_string(),
                title: format!("Video {}", id),
                description: String::new(),
                video_url: format!("https://cdn.example.com/{}.mp4", id),
                thumbnail_url: None,
                category: Category::Travel,
                duration_secs: 30,
                views: 0,
                likes: 3,
                age_appropriate: true,
                created_by: "creator".to_string(),
                tags: vec![],
                created_at: Utc::now(),
            },
            source,
        )
    }

    fn selection(n: usize) -> FeedSelection {
        let candidates = (0..n)
            .map(|i| candidate(&i.to_string(), CandidateSource::Recent))
            .collect();
        FeedSelection::from_candidates(candidates, &ViewerContext::new("viewer"))
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut feed = selection(3);
        assert!(!feed.previous());
        assert_eq!(feed.current_index(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut feed = selection(3);
        assert!(feed.next());
        assert!(feed.next());
        assert_eq!(feed.current_index(), 2);
        assert!(!feed.next());
        assert_eq!(feed.current_index(), 2);
        assert_eq!(feed.current().unwrap().video.id, "2");
    }

    #[test]
    fn test_navigation_on_empty_feed() {
        let mut feed = selection(0);
        assert!(!feed.next());
        assert!(!feed.previous());
        feed.jump_to(4);
        assert_eq!(feed.current_index(), 0);
        assert!(feed.current().is_none());
        assert!(!feed.has_error());
    }

    #[test]
    fn test_jump_to_clamps() {
        let mut feed = selection(5);
        feed.jump_to(3);
        assert_eq!(feed.current_index(), 3);
        feed.jump_to(99);
        assert_eq!(feed.current_index(), 4);
    }

    #[test]
    fn test_explanations() {
        let shuffle = ViewerContext::new("viewer").with_request(FeedRequest::new(FeedMode::Shuffle));
        let feed = FeedSelection::from_candidates(
            vec![
                candidate("a", CandidateSource::Preferred(Category::ArtCreativity)),
                candidate("b", CandidateSource::Recent),
            ],
            &shuffle,
        );
        assert_eq!(feed.items()[0].explanation, "Because you prefer Art & Creativity");
        assert_eq!(feed.items()[1].explanation, "Shuffled from recent uploads");
    }

    #[test]
    fn test_failed_selection() {
        let feed = FeedSelection::failed("catalog offline");
        assert!(feed.is_empty());
        assert!(feed.has_error());
        assert_eq!(feed.error(), Some("catalog offline"));
    }

    #[test]
    fn test_update_likes_touches_only_likes() {
        let mut feed = selection(2);
        let before = feed.items()[0].clone();
        feed.update_likes("0", 9);
        assert_eq!(feed.items()[0].video.likes, 9);
        assert_eq!(feed.items()[0].video.title, before.video.title);
        assert_eq!(feed.items()[1].video.likes, 3);
    }
}
