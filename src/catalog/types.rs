//! # Catalog Types
//!
//! Wire types for the TMDB v3 API, trimmed to the fields Reel displays.
//! Every field except `id` tolerates absence so a sparse record still parses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single movie as returned by the discover and search endpoints.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// True if the record carries a usable poster reference.
    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Parsed release date. TMDB sends `""` for unknown dates.
    pub fn release(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release().map(|d| d.year())
    }
}

/// A paged response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<Movie>,
}

/// Builds a CDN URL for a poster: `{base}/{size}/{path}`.
///
/// Tolerates trailing and leading slashes on every part.
pub fn poster_url(image_base_url: &str, size: &str, poster_path: &str) -> String {
    format!(
        "{}/{}/{}",
        image_base_url.trim_end_matches('/'),
        size.trim_matches('/'),
        poster_path.trim_start_matches('/')
    )
}
