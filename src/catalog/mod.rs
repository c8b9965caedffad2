pub mod provider;
pub mod tmdb;
pub mod types;

pub use provider::{CatalogError, CatalogProvider};
pub use tmdb::TmdbProvider;
pub use types::{Movie, MoviePage, poster_url};
