//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core `Action` values, and
//! executes the `Effect`s the reducer returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Events go to the topmost surface first:
//!
//! 1. Ctrl+C and Esc are global (`Action::Quit`, `Action::Escape`).
//! 2. Movie overlay open: only its close keys and clicks are live.
//! 3. Search panel open: keys edit the query and move through the lists.
//! 4. Otherwise: single-key navigation shortcuts and page scrolling.
//!
//! Mouse clicks on the nav bar work whenever the overlay is closed.
//!
//! ## Catalog Requests
//!
//! Requests run as tokio tasks and report back through an `mpsc` channel
//! drained once per loop iteration. A new search aborts the previous one;
//! the reducer additionally drops any completion that is not the newest.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;
use tokio::task::{AbortHandle, JoinHandle};

use crate::catalog::{CatalogProvider, TmdbProvider};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::nav::{Menu, NavTarget};
use crate::core::search::suggestion_titles;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::movie_modal::{modal_click, modal_key};
use crate::tui::components::{NavHit, NavLayout, PageState, SearchEvent, SearchPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::{ScreenLayout, search_props};

const IDLE_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search: SearchPanelState,
    pub page: PageState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search: SearchPanelState::new(),
            page: PageState::default(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            SetCursorStyle::SteadyBar,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Build the catalog from a resolved config.
pub fn build_catalog(config: &ResolvedConfig) -> Arc<dyn CatalogProvider> {
    Arc::new(
        TmdbProvider::new(config.api_key.clone(), Some(config.base_url.clone()))
            .with_language(config.language.clone())
            .with_timeout(Duration::from_secs(config.request_timeout_secs)),
    )
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = build_catalog(&config);
    let mut app = App::from_config(catalog, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut active_search: Option<AbortHandle> = None;

    let mut should_quit = dispatch(&mut app, Action::Mount, &tx, &mut active_search);
    let mut needs_redraw = true;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = handle_event(&app, &mut tui, &event, area) {
                debug!("Event {:?} -> {:?}", event, action);
                if dispatch(&mut app, action, &tx, &mut active_search) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Handle background task actions (catalog responses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatch(&mut app, action, &tx, &mut active_search) {
                should_quit = true;
            }
        }
    }

    if let Some(handle) = active_search.take() {
        handle.abort();
    }
    ratatui::restore();
    info!("Reel shutting down");
    Ok(())
}

/// Run an action through the reducer and execute its effect. Returns true on quit.
fn dispatch(
    app: &mut App,
    action: Action,
    tx: &mpsc::Sender<Action>,
    active_search: &mut Option<AbortHandle>,
) -> bool {
    match update(app, action) {
        Effect::Quit => return true,
        Effect::FetchSuggestions => {
            spawn_suggestions(app.catalog.clone(), tx.clone());
        }
        Effect::Search { seq, query } => {
            if let Some(handle) = active_search.take() {
                handle.abort();
            }
            let handle = spawn_search(app.catalog.clone(), seq, query, tx.clone());
            *active_search = Some(handle.abort_handle());
        }
        Effect::None => {}
    }
    false
}

/// Translate a terminal event into at most one core action.
fn handle_event(app: &App, tui: &mut TuiState, event: &TuiEvent, area: Rect) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Escape => return Some(Action::Escape),
        TuiEvent::Resize => return None,
        TuiEvent::MouseClick(column, row) => return handle_click(app, tui, *column, *row, area),
        _ => {}
    }

    if app.modal_open() {
        return modal_key(event).map(|_| Action::CloseMovie);
    }

    if app.search_open {
        return tui
            .search
            .handle_event(event, &search_props(app))
            .map(search_action);
    }

    match event {
        TuiEvent::InputChar('/') | TuiEvent::InputChar('s') => Some(open_search(tui)),
        TuiEvent::InputChar(c @ '1'..='4') => {
            let index = (*c as usize) - ('1' as usize);
            Some(Action::Navigate(NavTarget::Menu(Menu::ALL[index])))
        }
        TuiEvent::InputChar('h') => Some(Action::Navigate(NavTarget::Logo)),
        TuiEvent::InputChar('u') => Some(Action::Navigate(NavTarget::User)),
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.page.handle_event(event);
            None
        }
        _ => None,
    }
}

fn handle_click(app: &App, tui: &mut TuiState, column: u16, row: u16, area: Rect) -> Option<Action> {
    if app.modal_open() {
        return modal_click(column, row, area).map(|_| Action::CloseMovie);
    }

    let layout = ScreenLayout::new(area);
    if let Some(hit) = NavLayout::new(layout.nav).hit(column, row) {
        return Some(match hit {
            NavHit::Navigate(target) => Action::Navigate(target),
            NavHit::OpenSearch if app.search_open => return None,
            NavHit::OpenSearch => open_search(tui),
        });
    }

    if app.search_open {
        return tui
            .search
            .handle_click(column, row, layout.search_panel(), &search_props(app))
            .map(search_action);
    }
    None
}

fn open_search(tui: &mut TuiState) -> Action {
    tui.search = SearchPanelState::new();
    Action::OpenSearch
}

fn search_action(event: SearchEvent) -> Action {
    match event {
        SearchEvent::QueryChanged(query) => Action::QueryChanged(query),
        SearchEvent::Clear => Action::ClearQuery,
        SearchEvent::PickSuggestion(title) => Action::SuggestionPicked(title),
        SearchEvent::OpenMovie(movie) => Action::OpenMovie(movie),
    }
}

fn spawn_suggestions(catalog: Arc<dyn CatalogProvider>, tx: mpsc::Sender<Action>) -> JoinHandle<()> {
    info!("Fetching suggestions from {}", catalog.name());
    tokio::spawn(async move {
        let action = match catalog.discover_popular(1).await {
            Ok(movies) => Action::SuggestionsLoaded(suggestion_titles(&movies)),
            Err(e) => Action::SuggestionsFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver suggestions: receiver dropped");
        }
    })
}

fn spawn_search(
    catalog: Arc<dyn CatalogProvider>,
    seq: u64,
    query: String,
    tx: mpsc::Sender<Action>,
) -> JoinHandle<()> {
    info!("Spawning search #{} for {:?}", seq, query);
    tokio::spawn(async move {
        let action = match catalog.search_movies(&query).await {
            Ok(movies) => Action::SearchCompleted { seq, query, movies },
            Err(e) => Action::SearchFailed {
                seq,
                error: e.to_string(),
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver search #{}: receiver dropped", seq);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogError, Movie};
    use crate::core::nav::Route;
    use crate::test_support::{StaticCatalog, movie, test_app};

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 30,
    };

    /// Searches for "slow" never complete; any other query answers at once.
    struct SlowQueryCatalog;

    #[async_trait::async_trait]
    impl CatalogProvider for SlowQueryCatalog {
        fn name(&self) -> &str {
            "slow"
        }

        async fn discover_popular(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
            Ok(Vec::new())
        }

        async fn search_movies(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
            if query == "slow" {
                std::future::pending::<()>().await;
            }
            Ok(vec![movie(1, query, Some("/p.jpg"))])
        }
    }

    fn press(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
        let action = handle_event(app, tui, &event, AREA)?;
        update(app, action.clone());
        Some(action)
    }

    #[test]
    fn test_shortcuts_when_closed() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            press(&mut app, &mut tui, TuiEvent::InputChar('3')),
            Some(Action::Navigate(NavTarget::Menu(Menu::TopRated)))
        );
        assert_eq!(app.route, Route::Updated);
        assert_eq!(
            press(&mut app, &mut tui, TuiEvent::InputChar('u')),
            Some(Action::Navigate(NavTarget::User))
        );
        assert_eq!(press(&mut app, &mut tui, TuiEvent::InputChar('/')), Some(Action::OpenSearch));
        assert!(app.search_open);
    }

    #[test]
    fn test_typing_in_open_search_edits_query() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, TuiEvent::InputChar('s'));
        // 'q' and digits are text while searching
        press(&mut app, &mut tui, TuiEvent::InputChar('q'));
        press(&mut app, &mut tui, TuiEvent::InputChar('1'));
        assert_eq!(app.query, "q1");
        assert!(app.search_open);
    }

    #[test]
    fn test_escape_closes_modal_then_search() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        press(&mut app, &mut tui, TuiEvent::InputChar('/'));
        update(&mut app, Action::OpenMovie(movie(1, "Heat", Some("/h.jpg"))));

        press(&mut app, &mut tui, TuiEvent::Escape);
        assert!(!app.modal_open());
        assert!(app.search_open);
        press(&mut app, &mut tui, TuiEvent::Escape);
        assert!(!app.search_open);
    }

    #[test]
    fn test_modal_swallows_other_keys() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::OpenMovie(movie(1, "Heat", Some("/h.jpg"))));
        assert_eq!(press(&mut app, &mut tui, TuiEvent::InputChar('2')), None);
        assert_eq!(app.route, Route::Home);
        assert_eq!(press(&mut app, &mut tui, TuiEvent::Submit), Some(Action::CloseMovie));
        assert!(!app.modal_open());
    }

    #[test]
    fn test_click_menu_item_closes_search() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::OpenSearch);

        let layout = ScreenLayout::new(AREA);
        let nav = NavLayout::new(layout.nav);
        let (_, popular) = nav.menu[1];
        press(&mut app, &mut tui, TuiEvent::MouseClick(popular.x, popular.y));
        assert_eq!(app.active_menu, Menu::Popular);
        assert_eq!(app.route, Route::Popular);
        assert!(!app.search_open);
    }

    #[test]
    fn test_click_search_icon_opens_search() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let nav = NavLayout::new(ScreenLayout::new(AREA).nav);
        let action = press(
            &mut app,
            &mut tui,
            TuiEvent::MouseClick(nav.search.x + 1, nav.search.y + 1),
        );
        assert_eq!(action, Some(Action::OpenSearch));
        assert!(app.search_open);
    }

    #[test]
    fn test_page_scroll_locked_while_search_open() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.page.content_height = 50;
        press(&mut app, &mut tui, TuiEvent::ScrollDown);
        assert_eq!(tui.page.scroll, 3);

        update(&mut app, Action::OpenSearch);
        press(&mut app, &mut tui, TuiEvent::ScrollDown);
        assert_eq!(tui.page.scroll, 3);
    }

    #[tokio::test]
    async fn test_spawn_suggestions_takes_six_titles() {
        let catalog = StaticCatalog {
            popular: (0..10).map(|i| movie(i, &format!("Movie {i}"), None)).collect(),
            ..Default::default()
        };
        let (tx, rx) = mpsc::channel();
        spawn_suggestions(Arc::new(catalog), tx).await.unwrap();

        match rx.try_recv().unwrap() {
            Action::SuggestionsLoaded(titles) => assert_eq!(titles.len(), 6),
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_suggestions_failure_yields_empty_list() {
        let catalog = StaticCatalog {
            error: Some(CatalogError::Network("connection refused".to_string())),
            ..Default::default()
        };
        let (tx, rx) = mpsc::channel();
        spawn_suggestions(Arc::new(catalog), tx).await.unwrap();

        let mut app = test_app();
        app.suggestions = vec!["stale".to_string()];
        update(&mut app, rx.try_recv().unwrap());
        assert!(app.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_search_carries_sequence_number() {
        let catalog = StaticCatalog {
            search: vec![movie(603, "The Matrix", Some("/abc.jpg"))],
            ..Default::default()
        };
        let (tx, rx) = mpsc::channel();
        spawn_search(Arc::new(catalog), 7, "Matrix".to_string(), tx)
            .await
            .unwrap();

        match rx.try_recv().unwrap() {
            Action::SearchCompleted { seq, query, movies } => {
                assert_eq!(seq, 7);
                assert_eq!(query, "Matrix");
                assert_eq!(movies.len(), 1);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dispatch_search_end_to_end() {
        let catalog = StaticCatalog {
            search: vec![
                movie(603, "The Matrix", Some("/abc.jpg")),
                movie(604, "Matrix Reloaded", None),
            ],
            ..Default::default()
        };
        let mut app = App::new(Arc::new(catalog));
        let (tx, rx) = mpsc::channel();
        let mut active = None;

        assert!(!dispatch(
            &mut app,
            Action::QueryChanged("Matrix".to_string()),
            &tx,
            &mut active
        ));
        assert!(active.is_some());

        let action = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        dispatch(&mut app, action, &tx, &mut active);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].title, "The Matrix");
    }

    #[tokio::test]
    async fn test_new_search_aborts_previous_task() {
        let mut app = App::new(Arc::new(SlowQueryCatalog));
        let (tx, rx) = mpsc::channel();
        let mut active = None;

        dispatch(&mut app, Action::QueryChanged("slow".to_string()), &tx, &mut active);
        let first = active.clone().unwrap();
        dispatch(&mut app, Action::QueryChanged("fast".to_string()), &tx, &mut active);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !first.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        let action = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        assert!(matches!(action, Action::SearchCompleted { seq: 2, .. }));
        dispatch(&mut app, action, &tx, &mut active);
        assert_eq!(app.results.len(), 1);
        assert_eq!(app.results[0].title, "fast");
    }
}
