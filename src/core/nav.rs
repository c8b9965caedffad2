//! # Navigation
//!
//! The top-level menu, the things a user can click in the nav bar,
//! and the client-side routes they lead to.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Highlighted top-level category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Menu {
    #[default]
    New,
    Popular,
    TopRated,
    NowPlaying,
}

impl Menu {
    pub const ALL: [Menu; 4] = [Menu::New, Menu::Popular, Menu::TopRated, Menu::NowPlaying];

    pub fn label(&self) -> &'static str {
        match self {
            Menu::New => "New",
            Menu::Popular => "Popular",
            Menu::TopRated => "Top Rated",
            Menu::NowPlaying => "Now Playing",
        }
    }

    /// Stable identifier, matching the category names used in routes.
    pub fn key(&self) -> &'static str {
        match self {
            Menu::New => "new",
            Menu::Popular => "popular",
            Menu::TopRated => "updated",
            Menu::NowPlaying => "now-playing",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Menu::New => Route::Home,
            Menu::Popular => Route::Popular,
            Menu::TopRated => Route::Updated,
            Menu::NowPlaying => Route::NowPlaying,
        }
    }
}

/// Client-side route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Popular,
    Updated,
    NowPlaying,
    User,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Popular => "/popular",
            Route::Updated => "/updated",
            Route::NowPlaying => "/now-playing",
            Route::User => "/user",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "New",
            Route::Popular => "Popular",
            Route::Updated => "Top Rated",
            Route::NowPlaying => "Now Playing",
            Route::User => "Profile",
        }
    }
}

/// Anything in the nav bar that triggers a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Logo,
    Menu(Menu),
    User,
}

impl NavTarget {
    pub fn route(&self) -> Route {
        match self {
            NavTarget::Logo => Route::Home,
            NavTarget::Menu(menu) => menu.route(),
            NavTarget::User => Route::User,
        }
    }

    /// The menu entry to highlight, if this target changes it.
    /// The logo and the user icon navigate without touching the highlight.
    pub fn menu(&self) -> Option<Menu> {
        match self {
            NavTarget::Menu(menu) => Some(*menu),
            NavTarget::Logo | NavTarget::User => None,
        }
    }
}
