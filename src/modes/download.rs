// src/modes/download.rs
// =============================================================================
// Downloads the PDF (A4 paper) documentation archive into downloads/.
//
// The downloads page links to several archives; we take the first link
// whose href ends in "pdf-a4.zip" and save it under its own file name.
// =============================================================================

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;
use url::Url;

use crate::config::{join_url, Settings};
use crate::error::{Result, ScraperError};
use crate::extract::{find_tag_where, parse_document};
use crate::fetch::CachedClient;

const ARCHIVE_FILTER: &str = r".+pdf-a4\.zip$";

// Only used if the archive URL somehow ends in '/'
const FALLBACK_ARCHIVE_NAME: &str = "docs-pdf-a4.zip";

fn archive_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ARCHIVE_FILTER).expect("archive pattern is valid"))
}

/// Absolute URL of the A4 PDF archive linked from the downloads page
pub fn find_archive_url(html: &str, page_url: &Url) -> Result<Url> {
    let document = parse_document(html);
    let link = find_tag_where(document.root_element(), "a", Some("[href]"), |a| {
        a.value()
            .attr("href")
            .is_some_and(|href| archive_pattern().is_match(href))
    })
    .map_err(|_| ScraperError::TagNotFound {
        tag: "a".to_string(),
        filter: format!("href ~ {}", ARCHIVE_FILTER),
    })?;

    // The predicate above only accepts links that have an href
    let href = link.value().attr("href").unwrap_or_default();
    join_url(page_url, href)
}

/// Last path segment of the URL, used as the local file name
pub fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_ARCHIVE_NAME)
        .to_string()
}

/// Finds, fetches and saves the archive; returns where it was written
pub async fn download(client: &CachedClient, settings: &Settings) -> Result<PathBuf> {
    let page_url = settings.downloads_url()?;
    let archive_url = find_archive_url(&client.get_text(&page_url).await?, &page_url)?;

    let downloads_dir = settings.downloads_dir();
    tokio::fs::create_dir_all(&downloads_dir)
        .await
        .map_err(|e| ScraperError::io(&downloads_dir, e))?;

    let archive_path = downloads_dir.join(archive_file_name(&archive_url));
    client.download_to_file(&archive_url, &archive_path).await?;

    info!("Archive downloaded and saved: {}", archive_path.display());
    Ok(archive_path)
}
