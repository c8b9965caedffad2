use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::nav_bar::NAV_BAR_HEIGHT;
use crate::tui::components::{MovieModal, NavBar, Page, SearchPanel, SearchProps};

/// Screen regions: nav bar, page body, one-line status footer.
pub struct ScreenLayout {
    pub nav: Rect,
    pub body: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min};
        let [nav, body, footer] =
            Layout::vertical([Length(NAV_BAR_HEIGHT), Min(0), Length(1)]).areas(area);
        Self { nav, body, footer }
    }

    /// The search panel drops down over the page body.
    pub fn search_panel(&self) -> Rect {
        self.body
    }
}

pub fn search_props(app: &App) -> SearchProps<'_> {
    SearchProps {
        query: &app.query,
        suggestions: &app.suggestions,
        results: &app.results,
        showing_suggestions: app.showing_suggestions(),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let layout = ScreenLayout::new(frame.area());

    NavBar::new(app.active_menu, app.search_open).render(frame, layout.nav);

    tui.page.scroll_locked = app.scroll_locked();
    Page::new(app.route, &mut tui.page).render(frame, layout.body);

    if app.search_open {
        SearchPanel::new(&mut tui.search, search_props(app)).render(frame, layout.search_panel());
    }

    if let Some(movie) = &app.selected_movie {
        MovieModal::new(movie, app.poster_url(movie)).render(frame, frame.area());
    }

    let footer = format!(
        " {} | {} suggestions | {}",
        app.route.path(),
        app.suggestions.len(),
        app.catalog.name()
    );
    frame.render_widget(
        Span::styled(footer, Style::default().fg(Color::DarkGray)),
        layout.footer,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{buffer_text, movie, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_draw_ui_closed() {
        let app = test_app();
        let text = render(&app);
        assert!(text.contains("Top Rated"));
        assert!(text.contains("Open search"));
        assert!(!text.contains("Search Suggestions"));
    }

    #[test]
    fn test_draw_ui_with_search_open() {
        let mut app = test_app();
        update(&mut app, Action::SuggestionsLoaded(vec!["Heat".to_string()]));
        update(&mut app, Action::OpenSearch);
        let text = render(&app);
        assert!(text.contains("Search Suggestions"));
        assert!(text.contains("Heat"));
    }

    #[test]
    fn test_draw_ui_with_modal() {
        let mut app = test_app();
        update(&mut app, Action::OpenMovie(movie(603, "The Matrix", Some("/abc.jpg"))));
        let text = render(&app);
        assert!(text.contains("The Matrix"));
        assert!(text.contains("w200/abc.jpg"));
    }

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.nav.height, NAV_BAR_HEIGHT);
        assert_eq!(layout.body.y, NAV_BAR_HEIGHT);
        assert_eq!(layout.footer.y, 29);
    }
}
