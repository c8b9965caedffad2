//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `IconView`: Canvas-drawn vector icons
//! - `NavBar`: Logo, menu entries, search and user icons
//! - `MovieModal`: Details overlay for the selected movie
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local presentation state and emit events:
//! - `SearchPanel`: Query input, suggestions and the result grid
//! - `Page`: Scrollable route body
//!
//! Stateful components keep a persistent `*State` in `TuiState` and are
//! wrapped in a transient render struct each frame.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── icons.rs         (Search, Close, Logo, User glyphs)
//! ├── nav_bar.rs       (Top navigation bar + hit testing)
//! ├── search_panel.rs  (Search overlay)
//! ├── movie_modal.rs   (Movie details overlay)
//! └── page.rs          (Route body)
//! ```

pub mod icons;
pub mod movie_modal;
pub mod nav_bar;
pub mod page;
pub mod search_panel;

pub use movie_modal::{ModalEvent, MovieModal};
pub use nav_bar::{NavBar, NavHit, NavLayout};
pub use page::{Page, PageState};
pub use search_panel::{SearchEvent, SearchPanel, SearchPanelState, SearchProps};
