// src/parser/mod.rs
// =============================================================================
// This module defines what the crawler needs from a "page parser".
//
// The crawl engine never fetches or parses HTML itself. It only asks a
// PageParser: "give me the words and the links on this URL".
//
// Submodules:
// - html: The real parser (HTTP/file fetching + HTML parsing)
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - Send + Sync: Lets a parser be shared between worker threads
// =============================================================================

mod html;

use std::collections::HashMap;
use std::path::PathBuf;

pub use html::HtmlPageParser;

/// Words and outbound links found on a single page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    /// How often each word appears on this page.
    pub word_counts: HashMap<String, u64>,
    /// Absolute URLs linked from this page, in document order.
    pub links: Vec<String>,
}

/// Everything that can go wrong while fetching or parsing one page.
///
/// These never abort a crawl: the engine logs them and treats the page as
/// visited but empty.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a URL into the words and links it contains.
///
/// Implementations may block on network I/O. The engine guarantees that it
/// calls `parse` at most once per URL per crawl.
pub trait PageParser: Send + Sync {
    fn parse(&self, url: &str) -> Result<PageContent, ParseError>;

    /// Short name used when reporting timings for this parser.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

// Strips the module path from a type name:
// "web_crawler::parser::html::HtmlPageParser" -> "HtmlPageParser"
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<HtmlPageParser>(), "HtmlPageParser");
        assert_eq!(short_type_name::<String>(), "String");
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::UnsupportedScheme {
            url: "ftp://example.com".to_string(),
            scheme: "ftp".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported URL scheme 'ftp' in ftp://example.com");

        let err = ParseError::Status {
            url: "https://example.com/missing".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found for https://example.com/missing");
    }
}
