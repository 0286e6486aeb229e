// ABOUTME: The Catalog resolver: builds the root page and dispatches resolve() to the matching parser.
// ABOUTME: Holds the immutable site configuration and the fetcher used for every request.

use std::collections::HashMap;

use tracing::{debug, error};
use url::Url;

use crate::error::CatalogError;
use crate::index::parse_index;
use crate::locator::{Route, ROOT_URI};
use crate::models::{OverviewPage, Page, PRODUCER_ID, PRODUCER_TITLE};
use crate::options::{CatalogBuilder, Options};
use crate::resource::{Fetcher, HttpFetcher};
use crate::show::{parse_season, parse_show};
use crate::video::parse_video;

/// Entry point for catalog discovery.
///
/// Holds no state between calls: every `root()` and `resolve()` fetches
/// what it needs and returns freshly built pages.
#[derive(Debug, Clone)]
pub struct Catalog<F = HttpFetcher> {
    opts: Options,
    base: Url,
    fetcher: F,
}

impl Catalog<HttpFetcher> {
    /// Create a CatalogBuilder for fluent configuration.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }
}

impl<F: Fetcher> Catalog<F> {
    pub fn new(opts: Options, fetcher: F) -> Result<Self, CatalogError> {
        let base = opts.base()?;
        Ok(Self {
            opts,
            base,
            fetcher,
        })
    }

    /// Identifier stamped on every page this catalog produces.
    pub fn id(&self) -> &'static str {
        PRODUCER_ID
    }

    pub fn title(&self) -> &'static str {
        PRODUCER_TITLE
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the root page from the alphabetical show index.
    ///
    /// Never fails: fetch and parse errors are logged and yield a root with
    /// fewer (or no) children.
    pub fn root(&self) -> OverviewPage {
        let mut root = OverviewPage::new(ROOT_URI, PRODUCER_TITLE);

        let index = match self.base.join(&self.opts.index_path) {
            Ok(url) => url,
            Err(e) => {
                error!(path = %self.opts.index_path, error = %e, "couldn't build show index URL");
                return root;
            }
        };

        match self.fetch(index.as_str()) {
            Ok(html) => root.pages = parse_index(&html, &self.base),
            Err(e) => error!(uri = %index, error = %e, "couldn't parse overview page"),
        }

        debug!(shows = root.pages.len(), "built root");
        root
    }

    /// Resolves a page previously produced by this catalog.
    ///
    /// Returns a new page with the same identity: overview pages with their
    /// children, video pages with their metadata.
    pub fn resolve(&self, page: &Page) -> Result<Page, CatalogError> {
        let route = Route::classify(page);
        debug!(uri = %page.uri(), ?route, "resolving page");

        match (route, page) {
            (Route::Video, Page::Video(video)) => parse_video(self, video).map(Page::from),
            (Route::Grouping, _) => Ok(page.clone()),
            (Route::Root, _) => Ok(self.root().into()),
            (Route::Show, Page::Overview(show)) => parse_show(self, show).map(Page::from),
            (Route::SeasonPage, Page::Overview(season)) => {
                parse_season(self, season).map(Page::from)
            }
            _ => Err(CatalogError::UnsupportedNode(page.uri().to_string())),
        }
    }

    pub(crate) fn fetch(&self, url: &str) -> Result<String, CatalogError> {
        self.fetch_with(url, &HashMap::new())
    }

    pub(crate) fn fetch_with(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<String, CatalogError> {
        debug!(%url, "fetching");
        self.fetcher.get(url, headers, &self.opts.charset)
    }
}
