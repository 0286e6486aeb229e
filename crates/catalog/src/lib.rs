// ABOUTME: Main library entry point for the MySpass catalog adapter.
// ABOUTME: Re-exports the public API: Catalog, CatalogBuilder, Page models, Fetcher, and CatalogError.

//! MySpass catalog - discovers shows, seasons and videos by scraping the site.
//!
//! The catalog is a lazily resolved page tree. [`Catalog::root`] lists the
//! shows; [`Catalog::resolve`] expands any page it produced into seasons,
//! episodes, or playable video metadata.
//!
//! # Example
//!
//! ```no_run
//! use myspass_catalog::{Catalog, CatalogError, Page};
//!
//! fn main() -> Result<(), CatalogError> {
//!     let catalog = Catalog::builder().build()?;
//!     let root = catalog.root();
//!     if let Some(show) = root.pages.first() {
//!         let show = catalog.resolve(show)?;
//!         println!("{} has {} entries", show.title(), show.as_overview().map_or(0, |s| s.pages.len()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod duration_parse;
pub mod error;
pub mod index;
pub mod locator;
pub mod models;
pub mod options;
pub mod resource;
mod select;
pub mod show;
pub mod time_parse;
pub mod video;

pub use crate::catalog::Catalog;
pub use crate::duration_parse::parse_duration_seconds;
pub use crate::error::CatalogError;
pub use crate::locator::{Route, ROOT_URI};
pub use crate::models::{OverviewPage, Page, VideoPage, PRODUCER_ID, PRODUCER_TITLE};
pub use crate::options::{CatalogBuilder, Options};
pub use crate::resource::{Fetcher, HttpFetcher};
pub use crate::time_parse::parse_broadcast;
pub use crate::video::video_id;
