// ABOUTME: Resource fetching for catalog pages: the Fetcher seam and its blocking HTTP implementation.
// ABOUTME: Handles the browser header preset, per-request headers, status checks, and charset decoding.

use std::collections::HashMap;

use crate::error::CatalogError;
use crate::options::Options;

/// Retrieves a remote resource as decoded text.
///
/// `headers` are merged over the fetcher's own preset. `charset` is used when
/// the response does not declare one.
pub trait Fetcher {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        charset: &str,
    ) -> Result<String, CatalogError>;
}

/// Fetcher backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    headers: HashMap<String, String>,
}

impl HttpFetcher {
    pub fn new(opts: &Options) -> Result<Self, CatalogError> {
        let client = match &opts.http_client {
            Some(client) => client.clone(),
            None => reqwest::blocking::Client::builder()
                .user_agent(opts.user_agent.clone())
                .timeout(opts.timeout)
                .build()
                .map_err(|e| CatalogError::fetch(&opts.base_url, e))?,
        };

        Ok(Self {
            client,
            headers: opts.headers.clone(),
        })
    }
}

impl Fetcher for HttpFetcher {
    fn get(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        charset: &str,
    ) -> Result<String, CatalogError> {
        let mut merged = self.headers.clone();
        merged.extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut request = self.client.get(url);
        for (key, value) in &merged {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .send()
            .map_err(|e| CatalogError::fetch(url, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::fetch(
                url,
                format!("HTTP status {}", status.as_u16()),
            ));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_lowercase());

        let body = response
            .bytes()
            .map_err(|e| CatalogError::fetch(url, format!("failed to read body: {}", e)))?;

        Ok(decode_body(&body, content_type.as_deref(), charset))
    }
}

/// Decode body bytes using the response charset, then the configured one, then detection.
fn decode_body(body: &[u8], content_type: Option<&str>, charset: &str) -> String {
    let declared = content_type.and_then(extract_charset);
    for label in declared.iter().map(String::as_str).chain([charset]) {
        if let Some(encoding) = encoding_rs::Encoding::for_label(label.as_bytes()) {
            let (decoded, _, _) = encoding.decode(body);
            return decoded.into_owned();
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Charset parameter of a Content-Type value, lowercased and unquoted.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches(['"', '\'']).to_ascii_lowercase())
        .filter(|value| !value.is_empty())
}
