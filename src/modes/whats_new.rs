// src/modes/whats_new.rs
// =============================================================================
// "What's New" pages: one row per Python version with the page link, its
// title and the editor/author block.
//
// The landing page lists every version in a toctree; each entry links to a
// detail page. A detail page that cannot be loaded is skipped (and logged),
// a detail page that loads but lacks its <h1>/<dl> ends the mode.
// =============================================================================

use url::Url;

use super::{progress_bar, Step};
use crate::config::{join_url, Settings};
use crate::error::{Result, ScraperError};
use crate::extract::{find_tag, parse_document, select_all, text_of};
use crate::fetch::CachedClient;
use crate::output::ResultTable;

pub const HEADER: [&str; 3] = ["Article link", "Title", "Editor, author"];

const VERSION_LINKS: &str =
    r#"#what-s-new-in-python div.toctree-wrapper li.toctree-l1 a[href$=".html"]"#;
const CHANGELOG_HREF: &str = "changelog.html";

/// Absolute links to every per-version page listed on the landing page
pub fn version_links(html: &str, base: &Url) -> Result<Vec<Url>> {
    let document = parse_document(html);

    select_all(document.root_element(), VERSION_LINKS)?
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| *href != CHANGELOG_HREF)
        .map(|href| join_url(base, href))
        .collect()
}

/// Title and editor/author text of one version page
pub fn parse_version_page(html: &str) -> Result<(String, String)> {
    let document = parse_document(html);
    let root = document.root_element();

    let title = text_of(find_tag(root, "h1", None)?).trim().to_string();
    let editors = text_of(find_tag(root, "dl", None)?)
        .replace('\n', " ")
        .trim()
        .to_string();

    Ok((title, editors))
}

async fn fetch_entry(client: &CachedClient, url: &Url) -> Result<Step<[String; 3]>> {
    let body = match Step::catch(url.as_str(), client.get_text(url).await, ScraperError::is_connection)? {
        Step::Done(body) => body,
        Step::Skipped { url, reason } => return Ok(Step::Skipped { url, reason }),
    };

    let (title, editors) = parse_version_page(&body)?;
    Ok(Step::Done([url.to_string(), title, editors]))
}

pub async fn whats_new(client: &CachedClient, settings: &Settings) -> Result<ResultTable> {
    let landing_url = settings.whats_new_url()?;
    let links = version_links(&client.get_text(&landing_url).await?, &landing_url)?;

    let progress = progress_bar(links.len(), "What's New pages");
    let mut steps = Vec::with_capacity(links.len());
    for link in &links {
        steps.push(fetch_entry(client, link).await?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let mut table = ResultTable::new(HEADER);
    for row in steps.into_iter().filter_map(Step::into_done) {
        table.push_row(row);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::ResponseCache;
    use mockito::Server;
    use tempfile::TempDir;

    const LANDING: &str = r#"
        <section id="what-s-new-in-python">
          <div class="toctree-wrapper compound">
            <ul>
              <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a>
                <ul><li class="toctree-l2"><a href="3.12.html#summary">Summary</a></li></ul>
              </li>
              <li class="toctree-l1"><a class="reference internal" href="3.11.html">What's New In Python 3.11</a></li>
              <li class="toctree-l1"><a class="reference internal" href="changelog.html">Changelog</a></li>
            </ul>
          </div>
        </section>
    "#;

    fn version_page(version: &str, editor: &str) -> String {
        format!(
            "<html><body><h1>What's New In Python {version}</h1>\
             <dl class=\"field-list\">\n<dt>Editor</dt>\n<dd>{editor}</dd>\n</dl></body></html>"
        )
    }

    #[test]
    fn test_version_links_skip_changelog_and_nested_entries() {
        let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
        let links = version_links(LANDING, &base).unwrap();

        let links: Vec<&str> = links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://docs.python.org/3/whatsnew/3.12.html",
                "https://docs.python.org/3/whatsnew/3.11.html",
            ]
        );
    }

    #[test]
    fn test_parse_version_page_flattens_dl() {
        let (title, editors) = parse_version_page(&version_page("3.12", "Adam Turner")).unwrap();
        assert_eq!(title, "What's New In Python 3.12");
        assert_eq!(editors, "Editor Adam Turner");
    }

    #[test]
    fn test_parse_version_page_without_heading_fails() {
        let result = parse_version_page("<dl><dt>Editor</dt></dl>");
        assert!(matches!(result, Err(ScraperError::TagNotFound { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_page_is_skipped() {
        let mut server = Server::new_async().await;
        let _landing = server
            .mock("GET", "/3/whatsnew/")
            .with_status(200)
            .with_body(LANDING)
            .create_async()
            .await;
        let _ok = server
            .mock("GET", "/3/whatsnew/3.12.html")
            .with_status(200)
            .with_body(version_page("3.12", "Adam Turner"))
            .create_async()
            .await;
        let _gone = server
            .mock("GET", "/3/whatsnew/3.11.html")
            .with_status(404)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let cache = ResponseCache::open(temp.path().join("cache")).await.unwrap();
        let client = CachedClient::new(cache).unwrap();
        let settings = Settings::new(
            &format!("{}/3/", server.url()),
            "https://peps.python.org/",
            temp.path(),
        )
        .unwrap();

        let table = whats_new(&client, &settings).await.unwrap();

        assert_eq!(table.header(), HEADER);
        assert_eq!(table.len(), 1);
        assert!(table.rows()[0][0].ends_with("/3/whatsnew/3.12.html"));
        assert_eq!(table.rows()[0][1], "What's New In Python 3.12");
    }
}
