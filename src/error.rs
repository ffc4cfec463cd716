// src/error.rs
// =============================================================================
// Error types shared by the fetch, extract, mode and output layers.
//
// Two kinds matter to the scraping logic:
// - connection failures (transport error or non-success HTTP status)
// - structural failures (an expected element is missing from the markup)
//
// Callers match on these to decide whether to skip one item or abort the
// whole mode. Everything else is plumbing (I/O, CSV, logging setup).
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    /// The HTTP request itself failed (DNS, TLS, reset connection, ...)
    #[error("connection error: {source} URL: {url}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("connection error: HTTP {status} URL: {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// An element we rely on is absent from the page
    #[error("tag not found: <{tag}> {filter}")]
    TagNotFound { tag: String, filter: String },

    /// A CSS selector we built could not be compiled
    #[error("invalid selector '{css}': {message}")]
    InvalidSelector { css: String, message: String },

    /// The sidebar group holding the version list is missing
    #[error("navigation marker not found: no list group contains '{marker}'")]
    NavigationMarkerNotFound { marker: String },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

impl ScraperError {
    /// True for failures caused by the network or the remote server
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            ScraperError::Connection { .. } | ScraperError::HttpStatus { .. }
        )
    }

    /// True when the markup did not contain what we expected
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ScraperError::TagNotFound { .. } | ScraperError::NavigationMarkerNotFound { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScraperError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_not_found_message_carries_tag_and_filter() {
        let err = ScraperError::TagNotFound {
            tag: "div".to_string(),
            filter: ".sphinxsidebarwrapper".to_string(),
        };
        assert_eq!(err.to_string(), "tag not found: <div> .sphinxsidebarwrapper");
        assert!(err.is_structural());
        assert!(!err.is_connection());
    }

    #[test]
    fn test_http_status_counts_as_connection_failure() {
        let err = ScraperError::HttpStatus {
            url: "https://example.com".to_string(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(err.is_connection());
        assert!(!err.is_structural());
    }

    #[test]
    fn test_marker_error_is_structural() {
        let err = ScraperError::NavigationMarkerNotFound {
            marker: "All versions".to_string(),
        };
        assert!(err.is_structural());
        assert!(err.to_string().contains("All versions"));
    }
}
