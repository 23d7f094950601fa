use crate::error::ScrapeError;
use crate::records::{Record, ResultSet};
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// The record-anchor predicate: which links on the listing page count as
/// records. The policy lives here, as data, rather than as string literals
/// scattered through the extractors.
#[derive(Debug)]
pub struct RecordPattern {
    base: Url,
    href_regex: Regex,
}

impl RecordPattern {
    /// Create a pattern anchored at `base_url`. `href_pattern` is a regex
    /// matched against the resolved absolute URL.
    pub fn new(base_url: &str, href_pattern: &str) -> Result<Self, ScrapeError> {
        let base = Url::parse(base_url).map_err(|source| ScrapeError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        let href_regex = Regex::new(href_pattern)?;

        Ok(Self { base, href_regex })
    }

    /// The listing page this pattern is anchored at
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a raw href against the base, dropping fragments.
    /// Returns None for unparseable or non-http(s) targets.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        let mut resolved = self.base.join(href).ok()?;
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }
        resolved.set_fragment(None);
        Some(resolved)
    }

    /// Whether a resolved URL looks like a record detail page
    pub fn matches(&self, resolved: &Url) -> bool {
        self.href_regex.is_match(resolved.as_str())
    }
}

/// Parses a document and extracts every record anchor matching the pattern.
///
/// This is the single structural-extraction routine shared by the static and
/// dynamic extractors; the dynamic path just hands it a fully-scrolled
/// document. Malformed fragments are skipped record-by-record, never fatal.
pub fn extract_records(html: &str, pattern: &RecordPattern) -> ResultSet {
    let doc = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut results = ResultSet::new();
    for element in doc.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(resolved) = pattern.resolve(href) else {
            ::log::debug!("skipping unresolvable href: {}", href);
            continue;
        };

        if !pattern.matches(&resolved) {
            continue;
        }

        let text = element.text().collect::<Vec<_>>().join(" ");
        let Some(name) = record_name(&text, element.value().attr("title"), &resolved) else {
            ::log::debug!("skipping record with no usable name: {}", resolved);
            continue;
        };

        results.insert(Record::new(name, resolved.to_string()));
    }

    ::log::debug!("structural extraction found {} records", results.len());
    results
}

/// Name fallback chain: anchor text, then title attribute, then the last
/// path segment of the URL. Whitespace runs are collapsed.
fn record_name(text: &str, title: Option<&str>, url: &Url) -> Option<String> {
    let from_text = collapse_whitespace(text);
    if !from_text.is_empty() {
        return Some(from_text);
    }

    if let Some(title) = title {
        let from_title = collapse_whitespace(title);
        if !from_title.is_empty() {
            return Some(from_title);
        }
    }

    url.path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
