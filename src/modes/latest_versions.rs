// src/modes/latest_versions.rs
// =============================================================================
// Documentation link, version number and status for every Python release
// listed in the sidebar of the docs landing page.
//
// The sidebar holds several <ul> groups; the one we want contains the text
// "All versions". Without it there is nothing sensible to return, so the
// mode fails with NavigationMarkerNotFound.
// =============================================================================

use std::sync::OnceLock;

use regex::Regex;

use crate::config::Settings;
use crate::error::{Result, ScraperError};
use crate::extract::{find_tag, parse_document, select_all, text_of};
use crate::fetch::CachedClient;
use crate::output::ResultTable;

pub const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];
pub const MARKER: &str = "All versions";

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")
            .expect("version pattern is valid")
    })
}

/// Splits "Python 3.11 (stable)" into ("3.11", "stable")
///
/// Text that does not look like that is returned whole as the version.
pub fn parse_version_text(text: &str) -> (String, String) {
    match version_pattern().captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

/// Builds the result table from the docs landing page
pub fn parse_sidebar(html: &str) -> Result<ResultTable> {
    let document = parse_document(html);
    let sidebar = find_tag(document.root_element(), "div", Some(".sphinxsidebarwrapper"))?;

    let group = select_all(sidebar, "ul")?
        .into_iter()
        .find(|ul| text_of(*ul).contains(MARKER))
        .ok_or_else(|| ScraperError::NavigationMarkerNotFound {
            marker: MARKER.to_string(),
        })?;

    let mut table = ResultTable::new(HEADER);
    for a in select_all(group, "a[href]")? {
        let href = a.value().attr("href").unwrap_or_default();
        let (version, status) = parse_version_text(&text_of(a));
        table.push_row([href.to_string(), version, status]);
    }

    Ok(table)
}

pub async fn latest_versions(client: &CachedClient, settings: &Settings) -> Result<ResultTable> {
    let body = client.get_text(&settings.docs_url).await?;
    parse_sidebar(&body)
}
