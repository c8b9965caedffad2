//! # Application State
//!
//! Core business state for Reel. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<dyn CatalogProvider>  // movie metadata source
//! ├── query: String                      // search text
//! ├── results: Vec<Movie>                // filtered search results
//! ├── suggestions: Vec<String>           // popular titles, loaded once
//! ├── selected_movie: Option<Movie>      // detail overlay (None = closed)
//! ├── search_open: bool                  // search panel visibility
//! ├── active_menu: Menu                  // highlighted nav entry
//! ├── route: Route                       // current page
//! └── latest_search: u64                 // sequence number of newest search
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::catalog::{CatalogProvider, Movie};
use crate::core::config::ResolvedConfig;
use crate::core::nav::{Menu, Route};

pub struct App {
    pub catalog: Arc<dyn CatalogProvider>,
    pub query: String,
    pub results: Vec<Movie>,
    pub suggestions: Vec<String>,
    pub selected_movie: Option<Movie>,
    pub search_open: bool,
    pub active_menu: Menu,
    pub route: Route,
    /// Sequence number of the newest search issued. Completions carrying any
    /// other number are stale and dropped.
    pub latest_search: u64,
    pub image_base_url: String,
    pub poster_size: String,
}

impl App {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            query: String::new(),
            results: Vec::new(),
            suggestions: Vec::new(),
            selected_movie: None,
            search_open: false,
            active_menu: Menu::default(),
            route: Route::default(),
            latest_search: 0,
            image_base_url: crate::core::config::DEFAULT_IMAGE_BASE_URL.to_string(),
            poster_size: crate::core::config::DEFAULT_POSTER_SIZE.to_string(),
        }
    }

    pub fn from_config(catalog: Arc<dyn CatalogProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(catalog);
        app.active_menu = config.start_menu;
        app.route = config.start_menu.route();
        app.image_base_url = config.image_base_url.clone();
        app.poster_size = config.poster_size.clone();
        app
    }

    /// Suggestions and results are never shown together; an empty query shows suggestions.
    pub fn showing_suggestions(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn modal_open(&self) -> bool {
        self.selected_movie.is_some()
    }

    /// Background page scrolling is suppressed while any overlay is up.
    pub fn scroll_locked(&self) -> bool {
        self.modal_open() || self.search_open
    }

    pub fn poster_url(&self, movie: &Movie) -> Option<String> {
        movie
            .poster_path
            .as_deref()
            .filter(|_| movie.has_poster())
            .map(|path| crate::catalog::poster_url(&self.image_base_url, &self.poster_size, path))
    }
}
