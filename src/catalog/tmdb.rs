//! TMDB catalog implementation (API v3).
//!
//! Two read-only endpoints are used:
//! - `GET /discover/movie` for the popular-titles suggestion list
//! - `GET /search/movie` for search-as-you-type
//!
//! Authentication is the v3 `api_key` query parameter. The key never appears in logs.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::catalog::{CatalogError, CatalogProvider, Movie, MoviePage};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// TMDB API provider.
pub struct TmdbProvider {
    api_key: Option<String>,
    base_url: String,
    language: String,
    client: reqwest::Client,
}

impl TmdbProvider {
    /// Creates a provider. A missing key is not an error here: every request
    /// will fail with `CatalogError::Config` instead, keeping the UI usable.
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: base_url.unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
            language: DEFAULT_LANGUAGE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => self.client = client,
            Err(e) => warn!("Failed to build HTTP client with timeout, keeping default: {}", e),
        }
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn fetch_page(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Movie>, CatalogError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CatalogError::Config(
                "TMDB API key not set (TMDB_API_KEY env var or ~/.reel/config.toml)".to_string(),
            )
        })?;

        let url = self.endpoint(path);
        debug!("TMDB request: GET {} ({} params)", url, params.len());

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .query(params)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.without_url().to_string()))?;

        let status = response.status();
        debug!("TMDB response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("TMDB API error: {} - {}", status.as_u16(), message);
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.without_url().to_string()))?;
        let page: MoviePage =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;

        info!("TMDB {} returned {} movies", path, page.results.len());
        Ok(page.results)
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn discover_popular(&self, page: u32) -> Result<Vec<Movie>, CatalogError> {
        let page = page.max(1).to_string();
        self.fetch_page(
            "discover/movie",
            &[
                ("language", self.language.as_str()),
                ("sort_by", "popularity.desc"),
                ("include_adult", "false"),
                ("include_video", "false"),
                ("page", page.as_str()),
            ],
        )
        .await
    }

    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        self.fetch_page("search/movie", &[("query", query)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let provider = TmdbProvider::new(None, Some("http://localhost:9999/3/".to_string()));
        assert_eq!(
            provider.endpoint("search/movie"),
            "http://localhost:9999/3/search/movie"
        );
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let provider = TmdbProvider::new(Some("   ".to_string()), None);
        assert!(provider.api_key.is_none());
        assert_eq!(provider.base_url, DEFAULT_TMDB_BASE_URL);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let provider = TmdbProvider::new(None, None);
        let result = provider.search_movies("Matrix").await;
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }
}
