//! Environment-driven configuration for the server and harness binary.

use metadata_client::TmdbConfig;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Local path of the similarity artifact
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,

    /// Where to download the artifact from if `artifact_path` is missing
    #[serde(default)]
    pub artifact_url: Option<String>,

    /// TMDB API key; without it metadata falls back to placeholders
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Per-request metadata timeout in seconds (0 disables it)
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Number of metadata responses kept in memory
    #[serde(default = "default_metadata_cache_size")]
    pub metadata_cache_size: usize,

    /// Recommendations returned when the caller does not ask for a count
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,

    /// Title the harness binary recommends for
    #[serde(default)]
    pub sample_title: Option<String>,
}

fn default_artifact_path() -> PathBuf {
    PathBuf::from("movie_dict.json")
}

fn default_tmdb_api_url() -> String {
    metadata_client::tmdb::DEFAULT_API_URL.to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    10
}

fn default_metadata_cache_size() -> usize {
    256
}

fn default_recommendation_limit() -> usize {
    recommender::DEFAULT_LIMIT
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Load configuration from explicit key/value pairs, named like the env vars
    pub fn from_pairs<I>(pairs: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(pairs)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Settings for the TMDB metadata client
    pub fn metadata_config(&self) -> TmdbConfig {
        TmdbConfig {
            api_key: self.tmdb_api_key.clone(),
            base_url: self.tmdb_api_url.clone(),
            timeout: (self.metadata_timeout_secs > 0)
                .then(|| Duration::from_secs(self.metadata_timeout_secs)),
            cache_size: self.metadata_cache_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_pairs(Vec::new()).unwrap();

        assert_eq!(config.artifact_path, PathBuf::from("movie_dict.json"));
        assert!(config.artifact_url.is_none());
        assert!(config.tmdb_api_key.is_none());
        assert_eq!(config.tmdb_api_url, "https://api.themoviedb.org/3");
        assert_eq!(config.recommendation_limit, 10);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_pairs(pairs(&[
            ("ARTIFACT_PATH", "/data/movies.json"),
            ("ARTIFACT_URL", "https://example.com/movies.json"),
            ("TMDB_API_KEY", "secret"),
            ("METADATA_TIMEOUT_SECS", "0"),
            ("RECOMMENDATION_LIMIT", "5"),
        ]))
        .unwrap();

        assert_eq!(config.artifact_path, PathBuf::from("/data/movies.json"));
        assert_eq!(config.artifact_url.as_deref(), Some("https://example.com/movies.json"));
        assert_eq!(config.recommendation_limit, 5);

        let metadata = config.metadata_config();
        assert_eq!(metadata.api_key.as_deref(), Some("secret"));
        assert!(metadata.timeout.is_none());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        assert!(Config::from_pairs(pairs(&[("RECOMMENDATION_LIMIT", "lots")])).is_err());
    }
}
