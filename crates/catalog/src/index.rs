// ABOUTME: Show index parsing for root discovery in the classic and modern site layouts.
// ABOUTME: Classic shows are sorted by title; modern shows are grouped per letter in site order.

use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

use crate::locator::letter_uri;
use crate::models::{OverviewPage, Page};
use crate::select::{attr, element_text, resolve_url, select_first, SELECTORS};

/// Layout of the alphabetical show index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexLayout {
    /// Category lists (`ul.showsAZ-container`), the first being "Top".
    Classic,
    /// Letter blocks with image teasers.
    Modern,
}

impl IndexLayout {
    pub fn detect(doc: &Html) -> IndexLayout {
        if select_first(doc, &SELECTORS.az_letter).is_some() {
            IndexLayout::Modern
        } else {
            IndexLayout::Classic
        }
    }
}

/// Parses the show index into the root's children.
pub fn parse_index(html: &str, base: &Url) -> Vec<Page> {
    let doc = Html::parse_document(html);
    match IndexLayout::detect(&doc) {
        IndexLayout::Classic => classic_shows(&doc, base),
        IndexLayout::Modern => modern_letters(&doc, base),
    }
}

fn classic_shows(doc: &Html, base: &Url) -> Vec<Page> {
    let mut shows: Vec<Page> = doc
        .select(&SELECTORS.az_container)
        .skip(1)
        .flat_map(|category| category.select(&SELECTORS.az_name))
        .filter_map(|link| {
            let title = element_text(&link);
            let uri = resolve_url(&attr(&link, "href")?, base)?;
            debug!(%title, %uri, "added show");
            Some(OverviewPage::new(uri, title).into())
        })
        .collect();

    shows.sort_by(|a, b| a.title().cmp(b.title()));
    shows
}

fn modern_letters(doc: &Html, base: &Url) -> Vec<Page> {
    doc.select(&SELECTORS.az_letter)
        .filter_map(|block| {
            let letter = attr(&block, "data-letter")?;
            let mut group = OverviewPage::new(letter_uri(&letter), letter);
            group.pages = block
                .select(&SELECTORS.az_teaser)
                .filter_map(|link| teaser_show(&link, base))
                .collect();

            if group.pages.is_empty() {
                debug!(letter = %group.title, "skipped empty letter");
                return None;
            }
            Some(group.into())
        })
        .collect()
}

fn teaser_show(link: &ElementRef, base: &Url) -> Option<Page> {
    let title = link
        .select(&SELECTORS.image_alt)
        .next()
        .and_then(|img| attr(&img, "alt"))
        .or_else(|| Some(element_text(link)).filter(|t| !t.is_empty()))?;
    let uri = resolve_url(&attr(link, "href")?, base)?;
    debug!(%title, %uri, "added show");
    Some(OverviewPage::new(uri, title).into())
}
