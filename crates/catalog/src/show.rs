// ABOUTME: Show and season page parsing for the simple, legacy (AJAX season list) and modern (slider) layouts.
// ABOUTME: Builds season trees, pagination pages, and episode leaves from fetched markup.

//! Show and season parsing.
//!
//! A show page is classified by its markup before anything else is read:
//!
//! - **Modern** pages carry `div.episodeSection` blocks with a season
//!   `select`. Every season option is fetched eagerly; the endpoint answers
//!   with a JSON envelope whose `slider` field is an HTML fragment of items.
//! - **Legacy** pages carry a season/episode header link. The same URL is
//!   requested again as a script-driven request, which returns the season
//!   list. The last two list entries are paging toggles, not seasons.
//! - **Simple** pages list their episodes directly in a table.

use std::collections::{HashMap, HashSet};

use scraper::{ElementRef, Html};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::Catalog;
use crate::error::CatalogError;
use crate::locator::{season_group_uri, season_uri};
use crate::models::{OverviewPage, Page, VideoPage};
use crate::options::AJAX_PATH;
use crate::resource::Fetcher;
use crate::select::{attr, element_text, resolve_url, select_first, SELECTORS};

/// Trailing season list entries that are paging controls.
const SEASON_LIST_CONTROLS: usize = 2;

/// Markup dialect of a show page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowLayout {
    Simple,
    Legacy,
    Modern,
}

impl ShowLayout {
    pub fn detect(doc: &Html) -> ShowLayout {
        let has_section_selector = doc
            .select(&SELECTORS.episode_section)
            .any(|section| section.select(&SELECTORS.season_select).next().is_some());

        if has_section_selector {
            ShowLayout::Modern
        } else if select_first(doc, &SELECTORS.season_probe).is_some() {
            ShowLayout::Legacy
        } else {
            ShowLayout::Simple
        }
    }
}

/// Kind of a modern episode section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    FullEpisodes,
    Clips,
}

impl SectionKind {
    fn from_category(category: &str) -> Option<Self> {
        match category {
            "full_episode" => Some(SectionKind::FullEpisodes),
            "clip" => Some(SectionKind::Clips),
            _ => None,
        }
    }

    fn title(self) -> &'static str {
        match self {
            SectionKind::FullEpisodes => "Ganze Folgen",
            SectionKind::Clips => "Clips",
        }
    }
}

/// A modern section with its season options resolved to fetchable URLs.
#[derive(Debug, Clone, PartialEq)]
struct SeasonSection {
    kind: SectionKind,
    seasons: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct SliderEnvelope {
    slider: String,
}

/// Builds the season tree (or episode list) of a show.
pub(crate) fn parse_show<F: Fetcher>(
    catalog: &Catalog<F>,
    show: &OverviewPage,
) -> Result<OverviewPage, CatalogError> {
    let html = catalog.fetch(&show.uri)?;
    let layout = ShowLayout::detect(&Html::parse_document(&html));
    debug!(uri = %show.uri, ?layout, "parsing show");

    let mut page = show.identity();
    page.pages = match layout {
        ShowLayout::Modern => modern_show(catalog, &html)?,
        ShowLayout::Legacy => {
            let mut headers = HashMap::new();
            headers.insert("X-Requested-With".to_string(), "XMLHttpRequest".to_string());
            let body = match catalog.fetch_with(&show.uri, &headers) {
                Ok(body) => body,
                Err(e) => {
                    warn!(uri = %show.uri, error = %e, "season list request failed, using full page");
                    html
                }
            };
            match legacy_seasons(&body, catalog.base())? {
                Some(seasons) => seasons,
                None => episode_table(&body, catalog.base()),
            }
        }
        ShowLayout::Simple => episode_table(&html, catalog.base()),
    };
    Ok(page)
}

/// Fills a season (or season result page) with its episodes.
///
/// Seasons that were paginated on creation already hold their result pages
/// and are returned as they are, without a request.
pub(crate) fn parse_season<F: Fetcher>(
    catalog: &Catalog<F>,
    season: &OverviewPage,
) -> Result<OverviewPage, CatalogError> {
    if !season.pages.is_empty() {
        return Ok(season.clone());
    }

    let html = catalog.fetch(&season.uri)?;
    let mut page = season.identity();
    page.pages = episode_table(&html, catalog.base());
    Ok(page)
}

fn modern_show<F: Fetcher>(catalog: &Catalog<F>, html: &str) -> Result<Vec<Page>, CatalogError> {
    let sections = season_sections(&Html::parse_document(html), catalog.base());

    let mut groups = Vec::new();
    for section in sections {
        let group_title = section.kind.title();
        let mut group = OverviewPage::new(season_group_uri(group_title), group_title);
        let labels = section.seasons.iter().map(|(label, _)| label.as_str());
        let locators = season_locators(group_title, labels);
        for ((label, url), locator) in section.seasons.into_iter().zip(locators) {
            let body = catalog.fetch(&url)?;
            let mut season = OverviewPage::new(locator, label);
            season.pages = parse_slider(&body, catalog.base())?;
            debug!(season = %season.title, episodes = season.pages.len(), "added season");
            group.pages.push(season.into());
        }
        groups.push(group.into());
    }
    Ok(groups)
}

/// Season locators of one group. A repeated label gets a ` (n)` suffix.
fn season_locators<'a>(group: &str, labels: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut used = HashSet::new();
    labels
        .map(|label| {
            let mut locator = season_uri(group, label);
            let mut n = 1;
            while !used.insert(locator.clone()) {
                n += 1;
                locator = season_uri(group, &format!("{} ({})", label, n));
            }
            locator
        })
        .collect()
}

/// Reads the modern episode sections that have a usable season selector.
fn season_sections(doc: &Html, base: &Url) -> Vec<SeasonSection> {
    doc.select(&SELECTORS.episode_section)
        .filter_map(|section| {
            let category = attr(&section, "data-category")?;
            let Some(kind) = SectionKind::from_category(&category) else {
                debug!(%category, "ignored section");
                return None;
            };
            let seasons = section_seasons(&section, base);
            if seasons.is_empty() {
                debug!(section = kind.title(), "no season selector, skipped section");
                return None;
            }
            Some(SeasonSection { kind, seasons })
        })
        .collect()
}

fn section_seasons(section: &ElementRef, base: &Url) -> Vec<(String, String)> {
    let Some(select) = section.select(&SELECTORS.season_select).next() else {
        return Vec::new();
    };
    let Some(endpoint) = attr(&select, "data-remote-endpoint") else {
        return Vec::new();
    };

    select
        .select(&SELECTORS.season_option)
        .filter_map(|option| {
            let args = option.value().attr("data-remote-args").unwrap_or_default();
            let url = resolve_url(&format!("{}{}", endpoint, args.trim()), base)?;
            Some((element_text(&option), url))
        })
        .collect()
}

/// Parses a season envelope into video leaves.
fn parse_slider(json: &str, base: &Url) -> Result<Vec<Page>, CatalogError> {
    let envelope: SliderEnvelope = serde_json::from_str(json.trim()).map_err(CatalogError::json)?;
    let fragment = Html::parse_fragment(&envelope.slider);

    Ok(fragment
        .select(&SELECTORS.slider_item)
        .filter_map(|item| {
            let link = item.select(&SELECTORS.link).next()?;
            let uri = resolve_url(&attr(&link, "href")?, base)?;
            let title = link
                .select(&SELECTORS.image_alt)
                .next()
                .and_then(|img| attr(&img, "alt"))
                .unwrap_or_else(|| element_text(&link));
            Some(VideoPage::new(uri, title).into())
        })
        .collect())
}

/// Builds the seasons of a legacy show from the season list.
/// Returns None when the page has no season list.
fn legacy_seasons(html: &str, base: &Url) -> Result<Option<Vec<Page>>, CatalogError> {
    let doc = Html::parse_document(html);
    let Some(list) = select_first(&doc, &SELECTORS.season_list) else {
        return Ok(None);
    };

    let entries: Vec<ElementRef> = list.select(&SELECTORS.season_entry).collect();
    let count = entries.len().saturating_sub(SEASON_LIST_CONTROLS);

    let mut seasons = Vec::with_capacity(count);
    for li in &entries[..count] {
        let title = li
            .select(&SELECTORS.anchor)
            .next()
            .map(|a| element_text(&a))
            .unwrap_or_else(|| element_text(li));
        let token = li.value().attr("data-query").unwrap_or_default().trim();

        let mut season = OverviewPage::new(season_page_url(base, token, 0)?, title);
        if let Some(pages) = page_count(li) {
            for n in 0..=pages {
                season.pages.push(
                    OverviewPage::new(season_page_url(base, token, n)?, format!("Page {}", n + 1))
                        .into(),
                );
            }
        }
        debug!(season = %season.title, uri = %season.uri, "added season");
        seasons.push(season.into());
    }
    Ok(Some(seasons))
}

/// Declared page count of a season entry, if positive.
fn page_count(li: &ElementRef) -> Option<u32> {
    let raw = attr(li, "data-maxpages")?;
    match raw.parse::<u32>() {
        Ok(0) => None,
        Ok(n) => Some(n),
        Err(e) => {
            warn!(value = %raw, error = %e, "unparseable season page count");
            None
        }
    }
}

/// URL of one result page of a season on the AJAX endpoint.
fn season_page_url(base: &Url, token: &str, page: u32) -> Result<String, CatalogError> {
    let mut url = base
        .join(AJAX_PATH)
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", AJAX_PATH, e)))?;
    url.set_query(Some(&format!(
        "v=2&ajax=true&action={}&category=full_episode&id=&sortBy=episode_asc&pageNumber={}",
        token, page
    )));
    Ok(url.into())
}

/// Reads the episode rows of a listing table, in document order.
fn episode_table(html: &str, base: &Url) -> Vec<Page> {
    let doc = Html::parse_document(html);
    doc.select(&SELECTORS.episode_row)
        .filter_map(|row| {
            let link = row.select(&SELECTORS.episode_link).next()?;
            let uri = resolve_url(&attr(&link, "href")?, base)?;
            Some(VideoPage::new(uri, element_text(&link)).into())
        })
        .collect()
}
