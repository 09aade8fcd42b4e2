//! HTTP client for the TMDB `/movie/{id}` endpoint.

use crate::details::{MovieDetails, TmdbMovie};
use crate::{MetadataError, MetadataSource};
use async_trait::async_trait;
use data_loader::MovieId;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

/// Connection settings for `TmdbClient`
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// Without a key every lookup degrades to placeholders
    pub api_key: Option<String>,
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Number of successful lookups kept in memory
    pub cache_size: usize,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Some(Duration::from_secs(10)),
            cache_size: 256,
        }
    }
}

/// Metadata lookups against TMDB, memoised per movie id
///
/// Clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    cache: Arc<Mutex<LruCache<MovieId, MovieDetails>>>,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, MetadataError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let capacity = NonZeroUsize::new(config.cache_size).unwrap_or(NonZeroUsize::MIN);

        Ok(Self {
            http,
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch details for `id`, surfacing every failure
    ///
    /// Successful lookups are cached; failures are not, so a later call
    /// retries the network.
    pub async fn try_fetch(&self, id: MovieId) -> Result<MovieDetails, MetadataError> {
        let cached = self.cache.lock().await.get(&id).cloned();
        if let Some(details) = cached {
            debug!("Metadata cache hit for movie {}", id);
            return Ok(details);
        }

        let api_key = self.api_key.as_deref().ok_or(MetadataError::MissingApiKey)?;

        let response = self
            .http
            .get(format!("{}/movie/{}", self.base_url, id))
            .query(&[("api_key", api_key), ("language", "en-US")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                id,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let movie: TmdbMovie = serde_json::from_slice(&body)?;
        let details = MovieDetails::from_response(movie);

        self.cache.lock().await.put(id, details.clone());
        Ok(details)
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch(&self, id: MovieId) -> MovieDetails {
        match self.try_fetch(id).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Metadata lookup for movie {} failed, using placeholders: {}", id, e);
                MovieDetails::placeholder()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `body` with `status` to every connection; returns base URL and hit counter
    async fn spawn_stub_api(status: &'static str, body: &'static str) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0u8; 4096];
                    let _ = socket.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        (format!("http://{}", addr), hits)
    }

    fn client_for(base_url: String, api_key: Option<&str>) -> TmdbClient {
        TmdbClient::new(TmdbConfig {
            api_key: api_key.map(str::to_string),
            base_url,
            timeout: Some(Duration::from_secs(5)),
            cache_size: 8,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_and_cache() {
        let (base_url, hits) = spawn_stub_api(
            "200 OK",
            r#"{"poster_path": "/p.jpg", "overview": "Blue people.", "vote_average": 7.2, "popularity": 150.4}"#,
        )
        .await;
        let client = client_for(base_url, Some("test-key"));

        let first = client.try_fetch(19995).await.unwrap();
        assert_eq!(first.poster_url, "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(first.overview, "Blue people.");
        assert_eq!(first.rating, Some(7.2));

        let second = client.fetch(19995).await;
        assert_eq!(second, first);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_error_status_degrades() {
        let (base_url, _) = spawn_stub_api("404 Not Found", r#"{"status_code": 34}"#).await;
        let client = client_for(base_url, Some("test-key"));

        let err = client.try_fetch(1).await.unwrap_err();
        assert!(matches!(err, MetadataError::Status { id: 1, status: 404 }));
        assert_eq!(client.fetch(1).await, MovieDetails::placeholder());
    }

    #[tokio::test]
    async fn test_malformed_body_degrades() {
        let (base_url, _) = spawn_stub_api("200 OK", "<html>oops</html>").await;
        let client = client_for(base_url, Some("test-key"));

        assert!(matches!(client.try_fetch(2).await, Err(MetadataError::Decode(_))));
        assert_eq!(client.fetch(2).await, MovieDetails::placeholder());
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let (base_url, hits) = spawn_stub_api("500 Internal Server Error", "{}").await;
        let client = client_for(base_url, Some("test-key"));

        client.fetch(3).await;
        client.fetch(3).await;
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unreachable_api_degrades() {
        let client = client_for("http://127.0.0.1:9".to_string(), Some("test-key"));

        assert!(matches!(client.try_fetch(4).await, Err(MetadataError::Http(_))));
        assert_eq!(client.fetch(4).await, MovieDetails::placeholder());
    }

    #[tokio::test]
    async fn test_missing_api_key_degrades() {
        let client = client_for("http://127.0.0.1:9".to_string(), Some("  "));

        assert!(matches!(client.try_fetch(5).await, Err(MetadataError::MissingApiKey)));
        assert_eq!(client.fetch(5).await, MovieDetails::placeholder());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = client_for("https://api.themoviedb.org/3/".to_string(), None);
        assert_eq!(client.base_url(), "https://api.themoviedb.org/3");
    }
}
