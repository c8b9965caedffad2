//! # Actions
//!
//! Everything that can happen in Reel becomes an `Action`.
//! User types a letter? That's `Action::QueryChanged(text)`.
//! The catalog answers? That's `Action::SearchCompleted { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns an `Effect` describing any I/O the adapter must perform.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Stale searches
//!
//! Every non-empty query change issues a new sequence number. A completion is
//! applied only if it carries the newest number, so a slow early request can
//! never overwrite the results of a later one.

use log::{debug, info, warn};

use crate::catalog::Movie;
use crate::core::nav::NavTarget;
use crate::core::search::filter_results;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Application started; load suggestions.
    Mount,
    SuggestionsLoaded(Vec<String>),
    SuggestionsFailed(String),
    OpenSearch,
    /// Search text edited. Carries the full new text.
    QueryChanged(String),
    ClearQuery,
    SuggestionPicked(String),
    SearchCompleted {
        seq: u64,
        query: String,
        movies: Vec<Movie>,
    },
    SearchFailed {
        seq: u64,
        error: String,
    },
    OpenMovie(Movie),
    CloseMovie,
    /// Closes the detail overlay if open, otherwise the search panel.
    Escape,
    Navigate(NavTarget),
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    FetchSuggestions,
    /// Run a catalog search. `query` is the raw, untrimmed text.
    Search { seq: u64, query: String },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Mount => Effect::FetchSuggestions,
        Action::SuggestionsLoaded(titles) => {
            info!("Loaded {} suggestions", titles.len());
            app.suggestions = titles;
            Effect::None
        }
        Action::SuggestionsFailed(error) => {
            warn!("Error fetching suggestions: {}", error);
            app.suggestions.clear();
            Effect::None
        }
        Action::OpenSearch => {
            app.search_open = true;
            Effect::None
        }
        Action::QueryChanged(text) => set_query(app, text),
        Action::ClearQuery => {
            app.query.clear();
            app.results.clear();
            // Invalidate anything still in flight
            app.latest_search += 1;
            Effect::None
        }
        Action::SuggestionPicked(title) => {
            app.results.clear();
            set_query(app, title)
        }
        Action::SearchCompleted { seq, query, movies } => {
            if seq != app.latest_search {
                debug!(
                    "Discarding stale search #{} for {:?} (latest is #{})",
                    seq, query, app.latest_search
                );
                return Effect::None;
            }
            let received = movies.len();
            app.results = filter_results(&query, movies);
            debug!(
                "Search #{} for {:?}: {} received, {} kept",
                seq,
                query,
                received,
                app.results.len()
            );
            Effect::None
        }
        Action::SearchFailed { seq, error } => {
            if seq != app.latest_search {
                debug!("Ignoring failure of stale search #{}: {}", seq, error);
                return Effect::None;
            }
            warn!("Error searching movies: {}", error);
            app.results.clear();
            Effect::None
        }
        Action::OpenMovie(movie) => {
            info!("Opening details for {:?} (id={})", movie.title, movie.id);
            app.selected_movie = Some(movie);
            Effect::None
        }
        Action::CloseMovie => {
            app.selected_movie = None;
            Effect::None
        }
        Action::Escape => {
            if app.selected_movie.is_some() {
                app.selected_movie = None;
            } else if app.search_open {
                app.search_open = false;
            }
            Effect::None
        }
        Action::Navigate(target) => {
            if let Some(menu) = target.menu() {
                app.active_menu = menu;
            }
            app.route = target.route();
            app.search_open = false;
            info!(
                "Navigated to {} (active menu: {})",
                app.route.path(),
                app.active_menu.key()
            );
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn set_query(app: &mut App, text: String) -> Effect {
    app.query = text;
    app.latest_search += 1;
    if app.query.trim().is_empty() {
        app.results.clear();
        return Effect::None;
    }
    Effect::Search {
        seq: app.latest_search,
        query: app.query.clone(),
    }
}
