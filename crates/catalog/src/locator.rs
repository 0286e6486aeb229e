// ABOUTME: Synthetic locators used as tree keys and the routing decision for resolve().
// ABOUTME: Synthetic locators are never fetched; Route picks the parser for a page.

use url::Url;

use crate::models::Page;
use crate::options::AJAX_PATH;

/// Locator of the catalog root.
pub const ROOT_URI: &str = "vchpage://localhost/myspass";

const LETTER_PREFIX: &str = "letter/";
const SEASON_PREFIX: &str = "season/";

/// Action name the legacy AJAX endpoint uses for season episode lists.
const SEASON_ACTION: &str = "getEpisodeListFromSeason";

/// Path segments that mark a show page.
const SHOW_MARKERS: &[&str] = &["tvshows", "webshows"];

pub fn letter_uri(letter: &str) -> String {
    format!("{}{}", LETTER_PREFIX, letter)
}

pub fn season_group_uri(group: &str) -> String {
    format!("{}{}", SEASON_PREFIX, group)
}

pub fn season_uri(group: &str, season: &str) -> String {
    format!("{}{}/{}", SEASON_PREFIX, group, season)
}

/// True for letter and season-group locators.
pub fn is_grouping(uri: &str) -> bool {
    uri.starts_with(LETTER_PREFIX) || uri.starts_with(SEASON_PREFIX)
}

/// Which resolution strategy applies to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Leaf page; fetch its XML metadata.
    Video,
    /// Letter or season group; already complete when created.
    Grouping,
    /// The catalog root; rediscover the show index.
    Root,
    /// A show page; build its season tree.
    Show,
    /// A season (or season result page) served by the AJAX endpoint.
    SeasonPage,
    Unsupported,
}

impl Route {
    pub fn classify(page: &Page) -> Route {
        if let Page::Video(_) = page {
            return Route::Video;
        }

        let uri = page.uri();
        if is_grouping(uri) {
            Route::Grouping
        } else if uri == ROOT_URI {
            Route::Root
        } else if SHOW_MARKERS.iter().any(|m| uri.contains(m)) {
            Route::Show
        } else if is_season_endpoint(uri) {
            Route::SeasonPage
        } else {
            Route::Unsupported
        }
    }
}

fn is_season_endpoint(uri: &str) -> bool {
    if uri.contains(SEASON_ACTION) {
        return true;
    }
    Url::parse(uri)
        .map(|u| u.path() == AJAX_PATH)
        .unwrap_or(false)
}
