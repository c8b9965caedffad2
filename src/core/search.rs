//! Search result filtering and suggestion extraction.

use crate::catalog::Movie;

/// Maximum number of popular titles offered as suggestions.
pub const SUGGESTION_LIMIT: usize = 6;

/// Keeps movies whose title contains `query` (case-insensitive) and which have a poster.
///
/// The raw query is used, whitespace included, so `"matrix "` does not match `"The Matrix"`.
pub fn filter_results(query: &str, movies: Vec<Movie>) -> Vec<Movie> {
    let needle = query.to_lowercase();
    movies
        .into_iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle) && movie.has_poster())
        .collect()
}

/// Takes the first `SUGGESTION_LIMIT` titles, in catalog order.
pub fn suggestion_titles(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .take(SUGGESTION_LIMIT)
        .map(|movie| movie.title.clone())
        .collect()
}
