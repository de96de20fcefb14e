//! Result extraction from DuckDuckGo's HTML endpoint
//!
//! The HTML endpoint is not a documented format and changes without notice.
//! The page is split into result blocks on a textual marker and each block
//! is matched independently; a block that no longer matches is skipped and
//! the rest still come through.
//!
//! Extraction never fails. Malformed input yields fewer results, possibly
//! none.

use crate::results::SearchResult;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use tracing::trace;
use url::Url;

/// Domain of the scraped backend; links into it are navigation, not results
pub const DUCKDUCKGO_DOMAIN: &str = "duckduckgo.com";

/// Start of every result block (`<div class="result results_links ...">`)
static BLOCK_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class="result\s"#).expect("static regex"));

/// Redirect carrier: `//duckduckgo.com/l/?uddg=<percent-encoded url>&rut=...`
static REDIRECT_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"uddg=([^&"]+)"#).expect("static regex"));

/// The result link; attributes in any order, inner markup allowed
static RESULT_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<a\b([^>]*\bclass="result__a"[^>]*)>(.*?)</a>"#).expect("static regex")
});

static HREF_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bhref="([^"]*)""#).expect("static regex"));

/// Description region, closed by the snippet link or its table cell
static SNIPPET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)(?:</a>|</td>)"#).expect("static regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(amp|lt|gt|quot|#39);").expect("static regex"));

/// Extract up to `max_results` results from a DuckDuckGo HTML page
pub fn extract(html: &str, max_results: usize) -> Vec<SearchResult> {
    Extractor::default().extract(html, max_results)
}

/// Block-wise result extractor bound to the backend's own domain
#[derive(Debug, Clone)]
pub struct Extractor {
    own_domain: String,
}

impl Extractor {
    pub fn new(own_domain: impl Into<String>) -> Self {
        Self {
            own_domain: own_domain.into().to_ascii_lowercase(),
        }
    }

    /// Results in document order, duplicates preserved
    pub fn extract(&self, html: &str, max_results: usize) -> Vec<SearchResult> {
        let mut results = Vec::new();

        for (index, block) in BLOCK_MARKER.split(html).enumerate().skip(1) {
            if results.len() >= max_results {
                break;
            }

            match self.extract_block(block) {
                Some(result) => results.push(result),
                None => trace!("Skipping result block {}", index),
            }
        }

        results
    }

    fn extract_block(&self, block: &str) -> Option<SearchResult> {
        let url = resolve_url(block)?;
        if url.is_empty() || url.starts_with('/') || self.is_own_domain(&url) {
            return None;
        }

        let title = RESULT_ANCHOR
            .captures(block)
            .map(|caps| clean_text(&caps[2]))
            .unwrap_or_default();
        if title.is_empty() {
            return None;
        }

        let content = SNIPPET
            .captures(block)
            .map(|caps| clean_snippet(&caps[1]))
            .unwrap_or_default();

        SearchResult::new(title, url, content)
    }

    fn is_own_domain(&self, url: &str) -> bool {
        let host = match Url::parse(url) {
            Ok(parsed) => parsed.host_str().map(|h| h.to_ascii_lowercase()),
            Err(_) => return false,
        };

        match host {
            Some(host) => {
                host == self.own_domain
                    || host
                        .strip_suffix(self.own_domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
            None => false,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DUCKDUCKGO_DOMAIN)
    }
}

/// Destination URL of a block; the redirect carrier wins over the direct href
fn resolve_url(block: &str) -> Option<String> {
    if let Some(caps) = REDIRECT_PARAM.captures(block) {
        let raw = &caps[1];
        let decoded = match urlencoding::decode(raw) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        };
        return Some(decoded);
    }

    RESULT_ANCHOR
        .captures(block)
        .and_then(|caps| {
            HREF_ATTR
                .captures(&caps[1])
                .map(|href| decode_entities(&href[1]).into_owned())
        })
}

/// Strip tags, collapse whitespace, trim
fn clean_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, "");
    collapse_whitespace(&stripped)
}

/// Strip tags, decode the common entities, collapse whitespace, trim
fn clean_snippet(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, "");
    let decoded = decode_entities(&stripped);
    collapse_whitespace(&decoded)
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Single pass, so `&amp;lt;` becomes `&lt;` rather than `<`
fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures| match &caps[1] {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        _ => "'",
    })
}
