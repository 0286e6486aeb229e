// ABOUTME: Configuration options for the catalog including site locations and the HTTP header preset.
// ABOUTME: CatalogBuilder provides a fluent API for constructing Catalog instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::resource::{Fetcher, HttpFetcher};

/// Site root used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "http://www.myspass.de";

/// Alphabetical show index, relative to the base URL.
pub const DEFAULT_INDEX_PATH: &str = "/myspass/ganze-folgen/";

/// Endpoint serving season episode lists to script-driven requests.
pub const AJAX_PATH: &str = "/myspass/includes/php/ajax.php";

/// Endpoint serving per-video XML metadata.
pub const METADATA_PATH: &str = "/myspass/includes/apps/video/getvideometadataxml.php";

/// User-Agent of the browser header preset.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Configuration options for the catalog.
#[derive(Debug, Clone)]
pub struct Options {
    pub base_url: String,
    pub charset: String,
    pub index_path: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub http_client: Option<reqwest::blocking::Client>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            charset: "utf-8".to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: BROWSER_USER_AGENT.to_string(),
            headers: browser_headers(),
            http_client: None,
        }
    }
}

impl Options {
    /// Parses the configured base URL.
    pub fn base(&self) -> Result<Url, CatalogError> {
        Url::parse(&self.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", self.base_url, e)))
    }
}

/// Headers a desktop browser sends with a page request.
fn browser_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert(
        "Accept".to_string(),
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".to_string(),
    );
    headers.insert(
        "Accept-Language".to_string(),
        "de-DE,de;q=0.8,en-US;q=0.5,en;q=0.3".to_string(),
    );
    headers
}

/// Builder for constructing Catalog instances with custom configuration.
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    opts: Options,
}

impl CatalogBuilder {
    /// Create a new CatalogBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Point the catalog at another site root (e.g. a fixture server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.opts.base_url = base_url.into();
        self
    }

    /// Set the fallback character set for response bodies.
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.opts.charset = charset.into();
        self
    }

    /// Set the path of the alphabetical show index.
    pub fn index_path(mut self, path: impl Into<String>) -> Self {
        self.opts.index_path = path.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Build a Catalog fetching over HTTP.
    pub fn build(self) -> Result<Catalog<HttpFetcher>, CatalogError> {
        let fetcher = HttpFetcher::new(&self.opts)?;
        Catalog::new(self.opts, fetcher)
    }

    /// Build a Catalog on top of a custom fetcher.
    pub fn build_with<F: Fetcher>(self, fetcher: F) -> Result<Catalog<F>, CatalogError> {
        Catalog::new(self.opts, fetcher)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
