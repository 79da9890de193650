//! Page capture: URL -> (url, title, visible text).
//!
//! The capture counterpart of reading the active browser tab. Internal
//! browser schemes are refused up front as their own user-facing
//! condition; a page whose text cannot be extracted falls back to using
//! its title as the content, so a save never dies on a weird page.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// A captured page ready for the save flow.
#[derive(Debug, Clone)]
pub struct CapturedPage {
    pub url: String,
    pub title: String,
    pub text: String,
}

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap()
});

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reject URLs that cannot be captured.
///
/// Browser-internal schemes (`chrome://`, `edge://`, `about:`) and
/// anything else that is not http(s) get a distinct error, before any
/// network traffic.
///
/// # Errors
///
/// `Error::InvalidArgument` for unparseable URLs, `Error::UnsupportedScheme`
/// for non-http(s) schemes.
pub fn check_capturable(url: &str) -> Result<()> {
    let parsed = url::Url::parse(url)
        .map_err(|e| Error::InvalidArgument(format!("invalid URL '{url}': {e}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(Error::UnsupportedScheme {
            url: url.to_string(),
        }),
    }
}

/// Extract the first `<title>` element's text.
#[must_use]
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_RE
        .captures(html)
        .map(|c| decode_entities(c[1].trim()))
        .filter(|t| !t.is_empty())
}

/// Extract the visible text of a page.
///
/// Script and style contents are dropped, remaining tags stripped,
/// entities decoded, whitespace collapsed. Returns an empty string when
/// nothing survives.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let without_scripts = SCRIPT_STYLE_RE.replace_all(html, " ");
    let without_tags = TAG_RE.replace_all(&without_scripts, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RE.replace_all(decoded.trim(), " ").into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Fetch a page and extract title and visible text.
///
/// # Errors
///
/// `Error::UnsupportedScheme` for browser-internal URLs,
/// `Error::Capture` when the fetch fails or returns a non-success
/// status. Extraction itself never fails: a missing title falls back to
/// the URL, and empty text falls back to the title.
pub async fn capture(url: &str) -> Result<CapturedPage> {
    check_capturable(url)?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("linkstash/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());

    tracing::debug!(%url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Capture(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Capture(format!("HTTP {}", status.as_u16())));
    }

    let html = response
        .text()
        .await
        .map_err(|e| Error::Capture(e.to_string()))?;

    let title = extract_title(&html).unwrap_or_else(|| url.to_string());
    let mut text = visible_text(&html);
    if text.is_empty() {
        tracing::debug!(%url, "no visible text extracted, falling back to title");
        text = title.clone();
    }

    Ok(CapturedPage {
        url: url.to_string(),
        title,
        text,
    })
}
