// ABOUTME: Page tree models shared by the resolver and its hosts.
// ABOUTME: Page is a tagged union of overview (container) and video (leaf) pages.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Identifier of the adapter that produces every page in this crate.
pub const PRODUCER_ID: &str = "myspass";

/// Display title of the adapter (and of the root page).
pub const PRODUCER_TITLE: &str = "MySpass";

/// A named container of child pages: the root, letter groups, shows, seasons, result pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPage {
    pub uri: String,
    pub title: String,
    pub producer: String,
    pub pages: Vec<Page>,
}

impl OverviewPage {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            producer: PRODUCER_ID.to_string(),
            pages: Vec::new(),
        }
    }

    /// Returns a childless copy carrying the same identity.
    pub fn identity(&self) -> Self {
        Self {
            uri: self.uri.clone(),
            title: self.title.clone(),
            producer: self.producer.clone(),
            pages: Vec::new(),
        }
    }
}

/// A playable episode or clip.
///
/// Before resolution only `uri`, `title` and `producer` are meaningful.
/// `duration` is `-1` while unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoPage {
    pub uri: String,
    pub title: String,
    pub producer: String,
    pub description: String,
    pub show: Option<String>,
    pub thumbnail: Option<String>,
    pub video_uri: Option<String>,
    pub duration: i32,
    pub published: Option<DateTime<Local>>,
}

impl VideoPage {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            producer: PRODUCER_ID.to_string(),
            description: String::new(),
            show: None,
            thumbnail: None,
            video_uri: None,
            duration: -1,
            published: None,
        }
    }
}

/// A node of the catalog tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Overview(OverviewPage),
    Video(VideoPage),
}

impl Page {
    pub fn uri(&self) -> &str {
        match self {
            Page::Overview(p) => &p.uri,
            Page::Video(p) => &p.uri,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Overview(p) => &p.title,
            Page::Video(p) => &p.title,
        }
    }

    pub fn producer(&self) -> &str {
        match self {
            Page::Overview(p) => &p.producer,
            Page::Video(p) => &p.producer,
        }
    }

    pub fn as_overview(&self) -> Option<&OverviewPage> {
        match self {
            Page::Overview(p) => Some(p),
            Page::Video(_) => None,
        }
    }

    pub fn as_video(&self) -> Option<&VideoPage> {
        match self {
            Page::Video(p) => Some(p),
            Page::Overview(_) => None,
        }
    }
}

impl From<OverviewPage> for Page {
    fn from(page: OverviewPage) -> Self {
        Page::Overview(page)
    }
}

impl From<VideoPage> for Page {
    fn from(page: VideoPage) -> Self {
        Page::Video(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_video_is_unresolved() {
        let video = VideoPage::new("https://example.com/v--/1/", "Episode");
        assert_eq!(video.duration, -1);
        assert!(video.description.is_empty());
        assert!(video.video_uri.is_none());
        assert!(video.published.is_none());
        assert_eq!(video.producer, PRODUCER_ID);
    }

    #[test]
    fn test_page_serializes_with_kind_tag() {
        let page = Page::from(OverviewPage::new("letter/A", "A"));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["kind"], "overview");
        assert_eq!(json["uri"], "letter/A");

        let back: Page = serde_json::from_value(json).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_identity_drops_children() {
        let mut show = OverviewPage::new("https://example.com/tvshows/x/", "X");
        show.pages.push(VideoPage::new("https://example.com/v", "V").into());
        let bare = show.identity();
        assert!(bare.pages.is_empty());
        assert_eq!(bare.uri, show.uri);
    }
}
