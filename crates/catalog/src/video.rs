// ABOUTME: Video metadata resolution through the XML metadata endpoint.
// ABOUTME: Extracts the numeric video id, reads first-occurrence XML fields, and builds a resolved VideoPage.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use regex::Regex;
use tracing::warn;
use url::Url;

use crate::catalog::Catalog;
use crate::duration_parse::parse_duration_seconds;
use crate::error::CatalogError;
use crate::models::VideoPage;
use crate::options::METADATA_PATH;
use crate::resource::Fetcher;
use crate::time_parse::parse_broadcast;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"--/(\d+)/").unwrap());

/// Elements read from the metadata document.
const METADATA_TAGS: &[&str] = &[
    "format",
    "title",
    "description",
    "imagePreview",
    "url_flv",
    "duration",
    "broadcast_date",
    "broadcast_time",
];

/// Extracts the numeric id from a video permalink (`.../Some-Title--/12345/`).
pub fn video_id(uri: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(uri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolves a video page into its playable metadata.
pub(crate) fn parse_video<F: Fetcher>(
    catalog: &Catalog<F>,
    video: &VideoPage,
) -> Result<VideoPage, CatalogError> {
    let id = video_id(&video.uri)
        .ok_or_else(|| CatalogError::IdentifierNotFound(video.uri.clone()))?;

    let url = metadata_url(catalog.base(), id)?;
    let xml = catalog.fetch(&url)?;
    let fields = read_fields(xml.trim())?;
    build_video(video, &fields)
}

fn metadata_url(base: &Url, id: &str) -> Result<String, CatalogError> {
    let mut url = base
        .join(METADATA_PATH)
        .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", METADATA_PATH, e)))?;
    url.set_query(Some(&format!("id={}", id)));
    Ok(url.into())
}

/// Reads the text of the first occurrence of each metadata element.
///
/// Text of nested elements is included. CDATA sections are taken verbatim
/// and entity references are resolved.
fn read_fields(xml: &str) -> Result<HashMap<String, String>, CatalogError> {
    let mut reader = Reader::from_str(xml);
    let mut fields = HashMap::new();

    // (element, nesting depth, collected text)
    let mut current: Option<(String, usize, String)> = None;

    loop {
        match reader.read_event().map_err(CatalogError::xml)? {
            Event::Start(e) => match current.as_mut() {
                Some((_, depth, _)) => *depth += 1,
                None => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if METADATA_TAGS.contains(&name.as_str()) && !fields.contains_key(&name) {
                        current = Some((name, 1, String::new()));
                    }
                }
            },
            Event::Empty(e) => {
                if current.is_none() {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    if METADATA_TAGS.contains(&name.as_str()) {
                        fields.entry(name).or_insert_with(String::new);
                    }
                }
            }
            Event::End(_) => {
                let closed = match current.as_mut() {
                    Some((_, depth, _)) => {
                        *depth -= 1;
                        *depth == 0
                    }
                    None => false,
                };
                if closed {
                    if let Some((name, _, text)) = current.take() {
                        fields.insert(name, text.trim().to_string());
                    }
                }
            }
            Event::Text(e) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&e.decode().map_err(CatalogError::xml)?);
                }
            }
            Event::CData(e) => {
                if let Some((_, _, text)) = current.as_mut() {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::GeneralRef(e) => {
                if let Some((_, _, text)) = current.as_mut() {
                    if let Some(ch) = e.resolve_char_ref().map_err(CatalogError::xml)? {
                        text.push(ch);
                    } else {
                        let name = e.decode().map_err(CatalogError::xml)?;
                        let resolved = resolve_predefined_entity(&name).ok_or_else(|| {
                            CatalogError::Xml(format!("unknown entity &{};", name))
                        })?;
                        text.push_str(resolved);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(fields)
}

/// Builds the resolved page from metadata fields.
///
/// `title`, `description`, `imagePreview` and `url_flv` are required. Duration
/// and broadcast time degrade to -1 and None.
fn build_video(video: &VideoPage, fields: &HashMap<String, String>) -> Result<VideoPage, CatalogError> {
    let required = |tag: &str| {
        fields
            .get(tag)
            .cloned()
            .ok_or_else(|| CatalogError::MissingField(tag.to_string()))
    };

    Ok(VideoPage {
        uri: video.uri.clone(),
        producer: video.producer.clone(),
        title: required("title")?,
        description: required("description")?,
        thumbnail: Some(required("imagePreview")?),
        video_uri: Some(required("url_flv")?),
        show: fields.get("format").filter(|s| !s.is_empty()).cloned(),
        duration: duration(&video.uri, fields),
        published: published(&video.uri, fields),
    })
}

fn duration(uri: &str, fields: &HashMap<String, String>) -> i32 {
    let raw = fields.get("duration").map(String::as_str).unwrap_or_default();
    parse_duration_seconds(raw).unwrap_or_else(|| {
        warn!(%uri, duration = %raw, "couldn't parse duration");
        -1
    })
}

fn published(uri: &str, fields: &HashMap<String, String>) -> Option<chrono::DateTime<chrono::Local>> {
    let date = fields.get("broadcast_date").map(String::as_str).unwrap_or_default();
    let time = fields.get("broadcast_time").map(String::as_str).unwrap_or_default();
    let parsed = parse_broadcast(date, time);
    if parsed.is_none() {
        warn!(%uri, %date, %time, "couldn't parse publish date");
    }
    parsed
}
