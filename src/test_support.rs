//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::{CatalogError, CatalogProvider, Movie};

/// An in-memory catalog returning canned data.
#[derive(Default)]
pub struct StaticCatalog {
    pub popular: Vec<Movie>,
    pub search: Vec<Movie>,
    pub error: Option<CatalogError>,
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    fn name(&self) -> &str {
        "static"
    }

    async fn discover_popular(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.popular.clone()),
        }
    }

    async fn search_movies(&self, _query: &str) -> Result<Vec<Movie>, CatalogError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.search.clone()),
        }
    }
}

/// Creates a test App backed by an empty catalog.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StaticCatalog::default()))
}

/// Shorthand for a movie with a title and optional poster.
pub fn movie(id: u64, title: &str, poster: Option<&str>) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_path: poster.map(str::to_string),
        ..Default::default()
    }
}

/// Flattens a rendered buffer into one string for `contains` assertions.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
