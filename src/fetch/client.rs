// src/fetch/client.rs
// =============================================================================
// HTTP access for every mode: a reqwest client with the response cache
// sitting underneath it.
//
// get_text():
// 1. Look the URL up in the cache, return the body on a hit
// 2. Otherwise GET it, decode the body as UTF-8 text
// 3. Store successful responses in the cache
//
// Transport errors and non-2xx statuses both come back as connection
// errors. There are no retries; the caller decides whether to skip the
// item or give up.
//
// download_to_file() streams a binary body to disk through a .part file
// and never touches the cache.
// =============================================================================

use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use url::Url;

use super::cache::ResponseCache;
use crate::config::USER_AGENT;
use crate::error::{Result, ScraperError};

pub struct CachedClient {
    client: Client,
    cache: ResponseCache,
}

impl CachedClient {
    pub fn new(cache: ResponseCache) -> Result<Self> {
        // No explicit timeout: we rely on reqwest's defaults
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ScraperError::ClientBuild)?;

        Ok(Self { client, cache })
    }

    /// Fetches a page and returns its body as text
    pub async fn get_text(&self, url: &Url) -> Result<String> {
        if let Some(body) = self.cache.get(url.as_str()).await {
            return Ok(body);
        }

        debug!("GET {}", url);
        let response = self.send(url).await?;

        // Always decode as UTF-8, whatever the server claims
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ScraperError::Connection {
                url: url.to_string(),
                source,
            })?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        self.cache.put(url.as_str(), &body).await?;
        Ok(body)
    }

    /// Streams the body at `url` into `path`, returning the number of bytes written
    ///
    /// The body goes to `<path>.part` first and is renamed once complete, so a
    /// failed download never leaves a truncated file under the final name.
    pub async fn download_to_file(&self, url: &Url, path: &Path) -> Result<u64> {
        info!("Downloading {}", url);
        let response = self.send(url).await?;

        let part = part_path(path);
        let written = match stream_to_file(response, url, &part).await {
            Ok(written) => written,
            Err(e) => {
                discard(&part).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&part, path).await {
            discard(&part).await;
            return Err(ScraperError::io(path, e));
        }

        debug!("Wrote {} bytes to {}", written, path.display());
        Ok(written)
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScraperError::Connection {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

async fn stream_to_file(response: reqwest::Response, url: &Url, path: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| ScraperError::io(path, e))?;

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| ScraperError::Connection {
            url: url.to_string(),
            source,
        })?;
        file.write_all(&chunk)
            .await
            .map_err(|e| ScraperError::io(path, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| ScraperError::io(path, e))?;
    Ok(written)
}

/// `archive.zip` -> `archive.zip.part`
fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

async fn discard(part: &Path) {
    if let Err(e) = tokio::fs::remove_file(part).await {
        warn!("Could not remove partial download {}: {}", part.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    async fn client_in(temp: &TempDir) -> CachedClient {
        let cache = ResponseCache::open(temp.path().join("cache")).await.unwrap();
        CachedClient::new(cache).unwrap()
    }

    #[tokio::test]
    async fn test_second_get_is_served_from_cache() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page.html")
            .with_status(200)
            .with_body("<h1>Page</h1>")
            .expect(1)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse(&format!("{}/page.html", server.url())).unwrap();

        assert_eq!(client.get_text(&url).await.unwrap(), "<h1>Page</h1>");
        assert_eq!(client.get_text(&url).await.unwrap(), "<h1>Page</h1>");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_connection_error_and_not_cached() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .expect(2)
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse(&format!("{}/missing", server.url())).unwrap();

        for _ in 0..2 {
            let err = client.get_text(&url).await.unwrap_err();
            assert!(err.is_connection());
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connection_error() {
        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse("http://invalid.localhost.test:9/").unwrap();

        let err = client.get_text(&url).await.unwrap_err();
        assert!(matches!(err, ScraperError::Connection { .. }));
    }

    #[tokio::test]
    async fn test_download_writes_body_to_file() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/archive.zip")
            .with_status(200)
            .with_body(vec![1u8, 2, 3, 4, 5])
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse(&format!("{}/archive.zip", server.url())).unwrap();
        let path = temp.path().join("archive.zip");

        let written = client.download_to_file(&url, &path).await.unwrap();

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(&path).unwrap(), vec![1u8, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_download_leaves_no_part_file() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/archive.zip")
            .with_status(200)
            .with_body("zipdata")
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse(&format!("{}/archive.zip", server.url())).unwrap();
        let path = temp.path().join("archive.zip");

        client.download_to_file(&url, &path).await.unwrap();

        assert!(path.exists());
        assert!(!part_path(&path).exists());
    }

    #[tokio::test]
    async fn test_failed_download_removes_partial_file() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/archive.zip")
            .with_status(200)
            .with_body("zipdata")
            .create_async()
            .await;

        let temp = TempDir::new().unwrap();
        let client = client_in(&temp).await;
        let url = Url::parse(&format!("{}/archive.zip", server.url())).unwrap();
        // A directory in the way makes the final rename fail after the body is written
        let path = temp.path().join("archive.zip");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let err = client.download_to_file(&url, &path).await.unwrap_err();

        assert!(matches!(err, ScraperError::Io { .. }));
        assert!(!part_path(&path).exists());
        assert!(path.join("keep").exists());
    }

    #[test]
    fn test_part_path_appends_suffix() {
        assert_eq!(
            part_path(Path::new("downloads/python-docs-pdf-a4.zip")),
            PathBuf::from("downloads/python-docs-pdf-a4.zip.part")
        );
    }
}
