// src/parser/html.rs
// =============================================================================
// This module fetches a page and extracts its words and links.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Pages can come from two places:
// - http:// and https:// URLs are downloaded with reqwest
// - file:// URLs are read from disk (handy for crawling a local copy of a site)
//
// Rust concepts:
// - Result<T, E>: For operations that can fail
// - Iterators: For processing collections
// - Closures: Anonymous functions (|x| ...)
// =============================================================================

use std::collections::HashMap;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use url::Url;

use super::{PageContent, PageParser, ParseError};

// How long a single page download may take before we give up on it
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("web-crawler/", env!("CARGO_PKG_VERSION"));

/// Parses pages fetched over HTTP(S) or read from `file://` URLs.
pub struct HtmlPageParser {
    client: Client,
    ignored_words: Vec<Regex>,
}

impl HtmlPageParser {
    /// Builds a parser that drops every word fully matching one of
    /// `ignored_words`.
    pub fn new(ignored_words: Vec<Regex>) -> Result<Self, ParseError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            ignored_words,
        })
    }

    // Downloads or reads the raw HTML behind a URL
    fn fetch(&self, url: &Url) -> Result<String, ParseError> {
        match url.scheme() {
            "http" | "https" => {
                let response = self.client.get(url.as_str()).send()?;

                if !response.status().is_success() {
                    return Err(ParseError::Status {
                        url: url.to_string(),
                        status: response.status(),
                    });
                }

                Ok(response.text()?)
            }
            "file" => {
                let path = url.to_file_path().map_err(|()| ParseError::UnsupportedScheme {
                    url: url.to_string(),
                    scheme: "file".to_string(),
                })?;

                std::fs::read_to_string(&path).map_err(|source| ParseError::Io { path, source })
            }
            other => Err(ParseError::UnsupportedScheme {
                url: url.to_string(),
                scheme: other.to_string(),
            }),
        }
    }
}

impl PageParser for HtmlPageParser {
    fn parse(&self, url: &str) -> Result<PageContent, ParseError> {
        let base = Url::parse(url).map_err(|source| ParseError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let html = self.fetch(&base)?;
        Ok(parse_html(&html, &base, &self.ignored_words))
    }
}

// Turns an HTML document into word counts and outbound links
//
// Parameters:
//   html: the HTML content to parse
//   base: the URL of the page (for resolving relative links)
//   ignored_words: words matching any of these patterns are not counted
pub(crate) fn parse_html(html: &str, base: &Url, ignored_words: &[Regex]) -> PageContent {
    let document = Html::parse_document(html);

    PageContent {
        word_counts: count_words(&body_text(&document), ignored_words),
        links: extract_links(&document, base),
    }
}

// Collects the text of the <body> element, one space between text nodes
fn body_text(document: &Html) -> String {
    // Our selector is a constant and known to be valid
    let selector = Selector::parse("body").expect("'body' is a valid selector");

    let mut buffer = String::new();
    if let Some(body) = document.select(&selector).next() {
        for part in body.text() {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(trimmed);
            }
        }
    }
    buffer
}

// Counts how often each word appears in the text
//
// A word is lower-cased and reduced to its alphabetic characters, so
// "Rust," and "rust" are the same word. Empty results are skipped.
pub(crate) fn count_words(text: &str, ignored_words: &[Regex]) -> HashMap<String, u64> {
    let mut counts = HashMap::new();

    for raw in text.split_whitespace() {
        let word: String = raw
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect();

        if word.is_empty() || ignored_words.iter().any(|pattern| pattern.is_match(&word)) {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    counts
}

// Finds every <a href> in the document and resolves it to an absolute URL
fn extract_links(document: &Html, base: &Url) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("'a[href]' is a valid selector");

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(base, href))
        .filter(|url| is_crawlable_link(url))
        .collect()
}

// Resolves a possibly-relative URL to an absolute URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other#intro" -> Some("https://example.com/other")
//   href = "https://other.com" -> Some("https://other.com/")
//
// The fragment is dropped: "page#a" and "page#b" are the same page.
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    // join() handles both absolute and relative hrefs
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}

// We only follow links we know how to fetch
//
// Skipped: mailto:, tel:, javascript:, data:, ftp:, ...
fn is_crawlable_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("file://")
}
