// src/config.rs
// =============================================================================
// Fixed locations the scraper works with: the two upstream sites and the
// local directories for downloads, results, logs and the response cache.
//
// Everything lives under one base directory (the current directory unless
// --base-dir is given). The site URLs default to the live sites; tests
// point them at a local mock server instead.
// =============================================================================

use std::path::PathBuf;

use url::Url;

use crate::error::{Result, ScraperError};

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_SITE_URL: &str = "https://peps.python.org/";

pub const WHATS_NEW_URL_PART: &str = "whatsnew/";
pub const DOWNLOAD_URL_PART: &str = "download.html";

pub const DOWNLOADS_DIR_NAME: &str = "downloads";
pub const RESULTS_DIR_NAME: &str = "results";
pub const LOG_DIR_NAME: &str = "logs";
pub const LOG_FILE_NAME: &str = "parser.log";
pub const CACHE_DIR_NAME: &str = ".cache";

/// Used in result file names: `<mode>_<timestamp>.csv`
pub const DATETIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// How many rotated log files to keep around
pub const MAX_LOG_FILES: usize = 5;

pub const USER_AGENT: &str = concat!("docs-scraper/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct Settings {
    /// Root of the versioned documentation (the "what's new" and download pages hang off it)
    pub docs_url: Url,
    /// Root of the PEP site, which hosts the numerical index
    pub peps_url: Url,
    /// Directory under which downloads/, results/, logs/ and .cache/ are created
    pub base_dir: PathBuf,
}

impl Settings {
    /// Builds settings from URL strings (the live sites, or a mock server in tests)
    pub fn new(docs_url: &str, peps_url: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            docs_url: parse_url(docs_url)?,
            peps_url: parse_url(peps_url)?,
            base_dir: base_dir.into(),
        })
    }

    pub fn whats_new_url(&self) -> Result<Url> {
        join_url(&self.docs_url, WHATS_NEW_URL_PART)
    }

    pub fn downloads_url(&self) -> Result<Url> {
        join_url(&self.docs_url, DOWNLOAD_URL_PART)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join(DOWNLOADS_DIR_NAME)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join(RESULTS_DIR_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join(LOG_DIR_NAME)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.base_dir.join(CACHE_DIR_NAME)
    }
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| ScraperError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Resolves `href` against `base` the way a browser would
pub fn join_url(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|source| ScraperError::InvalidUrl {
        url: href.to_string(),
        source,
    })
}
