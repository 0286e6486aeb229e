// ABOUTME: Pre-compiled CSS selectors for the site markup and small element helpers.
// ABOUTME: Lookups return Option so absent markup is a value, not an error.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Selectors for every markup dialect the catalog understands.
pub(crate) struct SiteSelectors {
    // show index, classic
    pub az_container: Selector,
    pub az_name: Selector,
    // show index, modern
    pub az_letter: Selector,
    pub az_teaser: Selector,
    // legacy show pages
    pub season_probe: Selector,
    pub season_list: Selector,
    pub season_entry: Selector,
    pub anchor: Selector,
    pub episode_row: Selector,
    pub episode_link: Selector,
    // modern show pages
    pub episode_section: Selector,
    pub season_select: Selector,
    pub season_option: Selector,
    pub slider_item: Selector,
    pub link: Selector,
    pub image_alt: Selector,
}

pub(crate) static SELECTORS: Lazy<SiteSelectors> = Lazy::new(|| SiteSelectors {
    az_container: Selector::parse("ul.showsAZ-container").unwrap(),
    az_name: Selector::parse("a.showsAZName").unwrap(),
    az_letter: Selector::parse("div.showsAZ-letter[data-letter]").unwrap(),
    az_teaser: Selector::parse("a.showsAZ-teaser[href]").unwrap(),
    season_probe: Selector::parse("th.season_episode a").unwrap(),
    season_list: Selector::parse("ul.episodeListSeasonList").unwrap(),
    season_entry: Selector::parse("li[data-query]").unwrap(),
    anchor: Selector::parse("a").unwrap(),
    episode_row: Selector::parse("tr.episodeListInformation").unwrap(),
    episode_link: Selector::parse("td.title a").unwrap(),
    episode_section: Selector::parse("div.episodeSection[data-category]").unwrap(),
    season_select: Selector::parse("select.seasonSelect").unwrap(),
    season_option: Selector::parse("option[data-remote-args]").unwrap(),
    slider_item: Selector::parse("div.bacs-item").unwrap(),
    link: Selector::parse("a[href]").unwrap(),
    image_alt: Selector::parse("img[alt]").unwrap(),
});

/// Collapses runs of whitespace into single spaces.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the first element matching `selector`, if any.
pub(crate) fn select_first<'a>(doc: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    doc.select(selector).next()
}

/// Inner text of an element with whitespace normalized.
pub(crate) fn element_text(el: &ElementRef) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

/// Trimmed, non-empty attribute value.
pub(crate) fn attr(el: &ElementRef, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Resolves a potentially relative link against the site base.
/// Returns None if the link is empty or cannot be joined.
pub(crate) fn resolve_url(href: &str, base: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    base.join(href).ok().map(|u| u.to_string())
}
