// ABOUTME: Error types for catalog discovery and resolution.
// ABOUTME: Provides CatalogError covering transport, navigation, identifier, and payload failures.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while discovering or resolving catalog pages.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The remote resource could not be fetched (network error, non-2xx status, unreadable body).
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// A locator or link could not be turned into an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No resolution strategy is known for this page.
    #[error("unsupported page: {0}")]
    UnsupportedNode(String),

    /// The video URI carries no numeric identifier.
    #[error("no video id found in URI: {0}")]
    IdentifierNotFound(String),

    /// A required element is missing from the metadata document.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The metadata document is not well-formed XML.
    #[error("failed to parse XML: {0}")]
    Xml(String),

    /// The season envelope is not valid JSON or lacks its HTML payload.
    #[error("failed to parse JSON: {0}")]
    Json(String),
}

impl CatalogError {
    /// Creates a Fetch error for the given URL.
    pub fn fetch(url: impl Into<String>, err: impl fmt::Display) -> Self {
        CatalogError::Fetch {
            url: url.into(),
            message: err.to_string(),
        }
    }

    /// Creates an Xml error from an underlying quick-xml error.
    pub fn xml(err: impl fmt::Display) -> Self {
        CatalogError::Xml(err.to_string())
    }

    /// Creates a Json error with a custom message.
    pub fn json(msg: impl fmt::Display) -> Self {
        CatalogError::Json(msg.to_string())
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        matches!(self, CatalogError::Fetch { .. })
    }
}
