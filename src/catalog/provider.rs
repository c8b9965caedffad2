use std::fmt;

use async_trait::async_trait;

use super::types::Movie;

/// Errors that can occur while talking to the movie catalog.
/// The UI collapses all of them into an empty list; the variants exist for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Catalog misconfigured (missing API key, bad URL).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success response.
    Api { status: u16, message: String },
    /// Failed to parse the catalog's response body.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Read-only access to a movie metadata catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns the name of the catalog.
    fn name(&self) -> &str;

    /// One page of movies sorted by popularity, most popular first.
    async fn discover_popular(&self, page: u32) -> Result<Vec<Movie>, CatalogError>;

    /// Movies matching `query` by title. The query is sent as given (untrimmed).
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;
}
