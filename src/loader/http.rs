//! HTTP fetcher backed by reqwest.
//!
//! On native targets this is a regular rustls client; on wasm32 reqwest goes
//! through the browser's `fetch`, so the same code serves the page.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{FetchError, FetchedBody, Fetcher};

/// Fetches resources relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the site at `base` (usually the page URL).
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base).map_err(|source| FetchError::InvalidUrl {
            url: base.to_string(),
            source,
        })?;
        Ok(Self::with_client(Client::new(), base))
    }

    pub fn with_client(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolve a resource path against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        self.base.join(path).map_err(|source| FetchError::InvalidUrl {
            url: path.to_string(),
            source,
        })
    }
}

#[async_trait(?Send)]
impl Fetcher for HttpFetcher {
    async fn get(&self, path: &str) -> Result<FetchedBody, FetchError> {
        let url = self.resolve(path)?;
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(FetchedBody { status, body })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::loader::fetch_json;
    use crate::models::Project;

    /// Serve one canned HTTP response per connection, forever.
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/index.html", addr)
    }

    #[test]
    fn resolves_relative_paths_against_page() {
        let fetcher = HttpFetcher::new("https://example.com/portfolio/index.html").unwrap();
        assert_eq!(
            fetcher.resolve("data/projects.json").unwrap().as_str(),
            "https://example.com/portfolio/data/projects.json"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        let err = HttpFetcher::new("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn fetches_json_over_http() {
        let base = serve("200 OK", r#"[{"title":"A","stack":["X","Y"]}]"#).await;
        let fetcher = HttpFetcher::new(&base).unwrap();

        let projects: Option<Vec<Project>> = fetch_json(&fetcher, "data/projects.json").await;
        let projects = projects.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].stack.len(), 2);
    }

    #[tokio::test]
    async fn http_error_status_yields_none() {
        let base = serve("404 Not Found", "{}").await;
        let fetcher = HttpFetcher::new(&base).unwrap();

        let response = fetcher.get("data/projects.json").await.unwrap();
        assert_eq!(response.status, 404);

        let projects: Option<Vec<Project>> = fetch_json(&fetcher, "data/projects.json").await;
        assert!(projects.is_none());
    }
}
