//! # Search Panel Component
//!
//! Overlay under the nav bar with the query input, a clear button, and either
//! the suggestion list (empty query) or the result grid (non-empty query).
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SearchPanelState` lives in `TuiState` (focus, selection, grid scroll)
//! - `SearchPanel` is created each frame with borrowed state and props
//!
//! The query itself is core state. The panel never edits it directly; it
//! emits `SearchEvent::QueryChanged` with the new text.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::catalog::Movie;
use crate::tui::component::Component;
use crate::tui::components::icons::{Icon, IconProps, IconView};
use crate::tui::event::TuiEvent;

pub const CARD_WIDTH: u16 = 26;
pub const CARD_HEIGHT: u16 = 4;
const INPUT_HEIGHT: u16 = 3;
const CLEAR_WIDTH: u16 = 3;
const PLACEHOLDER: &str = "Search...";
const SUGGESTIONS_TITLE: &str = "Search Suggestions";

/// Data the panel displays, borrowed from core state each frame.
#[derive(Clone, Copy)]
pub struct SearchProps<'a> {
    pub query: &'a str,
    pub suggestions: &'a [String],
    pub results: &'a [Movie],
    pub showing_suggestions: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    QueryChanged(String),
    Clear,
    PickSuggestion(String),
    OpenMovie(Movie),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Suggestions,
    Results,
}

/// Persistent state for the search panel.
#[derive(Debug, Default)]
pub struct SearchPanelState {
    pub focus: Focus,
    pub selected: usize,
    /// First visible grid row.
    pub scroll_row: usize,
    /// Grid columns from the last render, used for Up/Down movement.
    pub columns: usize,
}

impl SearchPanelState {
    pub fn new() -> Self {
        Self {
            columns: 1,
            ..Default::default()
        }
    }

    /// Drop focus from a list that is no longer shown and clamp the selection.
    pub fn sync(&mut self, props: &SearchProps) {
        let len = match self.focus {
            Focus::Input => return,
            Focus::Suggestions if props.showing_suggestions => props.suggestions.len(),
            Focus::Results if !props.showing_suggestions => props.results.len(),
            _ => 0,
        };
        if len == 0 {
            self.focus_input();
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.selected = 0;
        self.scroll_row = 0;
    }

    fn focus_list(&mut self, props: &SearchProps) {
        if props.showing_suggestions && !props.suggestions.is_empty() {
            self.focus = Focus::Suggestions;
            self.selected = 0;
        } else if !props.showing_suggestions && !props.results.is_empty() {
            self.focus = Focus::Results;
            self.selected = 0;
            self.scroll_row = 0;
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, props: &SearchProps) -> Option<SearchEvent> {
        self.sync(props);
        match self.focus {
            Focus::Input => self.handle_input(event, props),
            Focus::Suggestions => match event {
                TuiEvent::CursorUp if self.selected == 0 => {
                    self.focus_input();
                    None
                }
                TuiEvent::CursorUp => {
                    self.selected -= 1;
                    None
                }
                TuiEvent::CursorDown => {
                    self.selected = (self.selected + 1).min(props.suggestions.len() - 1);
                    None
                }
                TuiEvent::Submit => {
                    let title = props.suggestions.get(self.selected)?.clone();
                    self.focus_input();
                    Some(SearchEvent::PickSuggestion(title))
                }
                _ => self.back_to_input(event, props),
            },
            Focus::Results => {
                let columns = self.columns.max(1);
                let last = props.results.len() - 1;
                match event {
                    TuiEvent::CursorLeft => {
                        self.selected = self.selected.saturating_sub(1);
                        None
                    }
                    TuiEvent::CursorRight => {
                        self.selected = (self.selected + 1).min(last);
                        None
                    }
                    TuiEvent::CursorUp if self.selected < columns => {
                        self.focus_input();
                        None
                    }
                    TuiEvent::CursorUp => {
                        self.selected -= columns;
                        None
                    }
                    TuiEvent::CursorDown => {
                        self.selected = (self.selected + columns).min(last);
                        None
                    }
                    TuiEvent::Submit => props
                        .results
                        .get(self.selected)
                        .map(|movie| SearchEvent::OpenMovie(movie.clone())),
                    _ => self.back_to_input(event, props),
                }
            }
        }
    }

    /// Typing while a list is focused goes back to the input.
    fn back_to_input(&mut self, event: &TuiEvent, props: &SearchProps) -> Option<SearchEvent> {
        match event {
            TuiEvent::Tab | TuiEvent::BackTab => {
                self.focus_input();
                None
            }
            TuiEvent::InputChar(_)
            | TuiEvent::Paste(_)
            | TuiEvent::Backspace
            | TuiEvent::ClearInput => {
                self.focus_input();
                self.handle_input(event, props)
            }
            _ => None,
        }
    }

    fn handle_input(&mut self, event: &TuiEvent, props: &SearchProps) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut query = props.query.to_string();
                query.push(*c);
                Some(SearchEvent::QueryChanged(query))
            }
            TuiEvent::Paste(text) => {
                // Single-line input
                let pasted: String = text.chars().filter(|c| !c.is_control()).collect();
                if pasted.is_empty() {
                    return None;
                }
                Some(SearchEvent::QueryChanged(format!("{}{}", props.query, pasted)))
            }
            TuiEvent::Backspace => {
                let mut query = props.query.to_string();
                query.pop()?;
                Some(SearchEvent::QueryChanged(query))
            }
            TuiEvent::ClearInput if !props.query.is_empty() => Some(SearchEvent::Clear),
            TuiEvent::CursorDown | TuiEvent::Tab | TuiEvent::Submit => {
                self.focus_list(props);
                None
            }
            _ => None,
        }
    }

    /// Resolve a mouse click inside the panel.
    pub fn handle_click(
        &mut self,
        column: u16,
        row: u16,
        area: Rect,
        props: &SearchProps,
    ) -> Option<SearchEvent> {
        let layout = SearchLayout::new(area);
        let position = Position::new(column, row);

        if !props.query.is_empty() && layout.clear.contains(position) {
            self.focus_input();
            return Some(SearchEvent::Clear);
        }
        if layout.input.contains(position) {
            self.focus_input();
            return None;
        }
        if props.showing_suggestions {
            let index = suggestion_index(layout.body, row)?;
            let title = props.suggestions.get(index)?.clone();
            self.focus_input();
            return Some(SearchEvent::PickSuggestion(title));
        }

        let grid = Grid::new(layout.body, self.scroll_row);
        let index = grid.index_at(position)?;
        let movie = props.results.get(index)?;
        self.focus = Focus::Results;
        self.selected = index;
        Some(SearchEvent::OpenMovie(movie.clone()))
    }
}

/// Screen regions inside the panel.
struct SearchLayout {
    input: Rect,
    clear: Rect,
    body: Rect,
}

impl SearchLayout {
    fn new(area: Rect) -> Self {
        let inner = Block::bordered().padding(Padding::horizontal(1)).inner(area);
        let [input, _, body] = Layout::vertical([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);
        let input_inner = Block::bordered().inner(input);
        let clear = Rect {
            x: (input_inner.x + input_inner.width).saturating_sub(CLEAR_WIDTH),
            y: input_inner.y,
            width: CLEAR_WIDTH.min(input_inner.width),
            height: input_inner.height,
        };
        Self { input, clear, body }
    }
}

/// Suggestion rows start two lines below the heading.
fn suggestion_index(body: Rect, row: u16) -> Option<usize> {
    let first = body.y + 2;
    if row < first || row >= body.y + body.height {
        return None;
    }
    Some((row - first) as usize)
}

/// Result card geometry for a given body area and scroll position.
struct Grid {
    area: Rect,
    columns: usize,
    visible_rows: usize,
    scroll_row: usize,
}

impl Grid {
    fn new(area: Rect, scroll_row: usize) -> Self {
        Self {
            area,
            columns: (area.width / CARD_WIDTH).max(1) as usize,
            visible_rows: (area.height / CARD_HEIGHT).max(1) as usize,
            scroll_row,
        }
    }

    /// Adjust scroll so the row holding `selected` is on screen.
    fn scrolled_to(mut self, selected: usize) -> Self {
        let row = selected / self.columns;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + self.visible_rows {
            self.scroll_row = row + 1 - self.visible_rows;
        }
        self
    }

    fn cell(&self, index: usize) -> Option<Rect> {
        let row = (index / self.columns).checked_sub(self.scroll_row)?;
        if row >= self.visible_rows {
            return None;
        }
        let col = index % self.columns;
        let rect = Rect {
            x: self.area.x + col as u16 * CARD_WIDTH,
            y: self.area.y + row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(self.area.width),
            height: CARD_HEIGHT.min(self.area.height),
        };
        Some(rect.intersection(self.area))
    }

    fn index_at(&self, position: Position) -> Option<usize> {
        if !self.area.contains(position) {
            return None;
        }
        let col = ((position.x - self.area.x) / CARD_WIDTH) as usize;
        let row = ((position.y - self.area.y) / CARD_HEIGHT) as usize;
        if col >= self.columns {
            return None;
        }
        Some((self.scroll_row + row) * self.columns + col)
    }
}

/// Transient render wrapper for the search panel.
pub struct SearchPanel<'a> {
    state: &'a mut SearchPanelState,
    props: SearchProps<'a>,
}

impl<'a> SearchPanel<'a> {
    pub fn new(state: &'a mut SearchPanelState, props: SearchProps<'a>) -> Self {
        Self { state, props }
    }

    fn render_input(&self, frame: &mut Frame, layout: &SearchLayout) {
        let focused = self.state.focus == Focus::Input;
        let border = if focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::bordered().border_style(Style::default().fg(border));

        let text = if self.props.query.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.props.query)
        };
        frame.render_widget(Paragraph::new(text).block(block), layout.input);

        if !self.props.query.is_empty() {
            IconView::new(
                Icon::Close,
                IconProps::sized(2, 1).stroke(Color::Red, 2),
            )
            .render(frame, layout.clear);
        }

        if focused {
            let inner = Block::bordered().inner(layout.input);
            let max_x = (inner.x + inner.width).saturating_sub(CLEAR_WIDTH + 1);
            let width = u16::try_from(self.props.query.width()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(width).min(max_x);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_suggestions(&self, frame: &mut Frame, body: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                SUGGESTIONS_TITLE,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        if self.props.suggestions.is_empty() {
            lines.push(Line::from(Span::styled(
                "No suggestions available",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for (i, title) in self.props.suggestions.iter().enumerate() {
            let style = if self.state.focus == Focus::Suggestions && i == self.state.selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Cyan)
            };
            lines.push(Line::from(Span::styled(title.as_str(), style)));
        }
        frame.render_widget(Paragraph::new(lines), body);
    }

    fn render_results(&mut self, frame: &mut Frame, body: Rect) {
        if self.props.results.is_empty() {
            frame.render_widget(
                Paragraph::new("No results").style(Style::default().fg(Color::DarkGray)),
                body,
            );
            return;
        }

        let mut grid = Grid::new(body, self.state.scroll_row);
        if self.state.focus == Focus::Results {
            grid = grid.scrolled_to(self.state.selected);
        }
        self.state.scroll_row = grid.scroll_row;
        self.state.columns = grid.columns;

        for (index, movie) in self.props.results.iter().enumerate() {
            let Some(cell) = grid.cell(index) else {
                continue;
            };
            let selected = self.state.focus == Focus::Results && index == self.state.selected;
            render_card(frame, cell, movie, selected);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
    let border = if selected { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner_width = area.width.saturating_sub(2) as usize;

    let title_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let mut meta = movie
        .release_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "----".to_string());
    if let Some(rating) = movie.vote_average.filter(|r| *r > 0.0) {
        meta.push_str(&format!(" · ★ {rating:.1}"));
    }

    let lines = vec![
        Line::from(Span::styled(truncate_str(&movie.title, inner_width), title_style)),
        Line::from(Span::styled(meta, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

impl Component for SearchPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(&self.props);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::bordered()
                .title(" Search ")
                .title_bottom(Line::from(" ↑↓←→ Move  Enter Select  Ctrl+U Clear  Esc Close ").centered())
                .border_style(Style::default().fg(Color::DarkGray)),
            area,
        );

        let layout = SearchLayout::new(area);
        self.render_input(frame, &layout);
        if self.props.showing_suggestions {
            self.render_suggestions(frame, layout.body);
        } else {
            self.render_results(frame, layout.body);
        }
    }
}

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > max_width - 3 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, movie};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn suggestions() -> Vec<String> {
        vec!["Dune: Part Two".to_string(), "Heat".to_string()]
    }

    fn props<'a>(query: &'a str, suggestions: &'a [String], results: &'a [Movie]) -> SearchProps<'a> {
        SearchProps {
            query,
            suggestions,
            results,
            showing_suggestions: query.trim().is_empty(),
        }
    }

    fn draw(state: &mut SearchPanelState, props: SearchProps, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                SearchPanel::new(state, props).render(f, area)
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_typing_appends_to_query() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let event = state.handle_event(&TuiEvent::InputChar('x'), &props("Matri", &s, &[]));
        assert_eq!(event, Some(SearchEvent::QueryChanged("Matrix".to_string())));
    }

    #[test]
    fn test_backspace_on_empty_query_is_noop() {
        let mut state = SearchPanelState::new();
        assert_eq!(state.handle_event(&TuiEvent::Backspace, &props("", &[], &[])), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Backspace, &props("ab", &[], &[])),
            Some(SearchEvent::QueryChanged("a".to_string()))
        );
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut state = SearchPanelState::new();
        let event = state.handle_event(&TuiEvent::Paste("The\nMatrix".to_string()), &props("", &[], &[]));
        assert_eq!(event, Some(SearchEvent::QueryChanged("TheMatrix".to_string())));
    }

    #[test]
    fn test_very_long_query_keeps_cursor_in_input() {
        let query = "a".repeat(65534);
        let mut state = SearchPanelState::new();
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                SearchPanel::new(&mut state, props(&query, &[], &[])).render(f, area)
            })
            .unwrap();

        let cursor = terminal.get_cursor_position().unwrap();
        assert!(cursor.x < 80 - CLEAR_WIDTH);
        assert!(buffer_text(terminal.backend().buffer()).contains("aaaa"));
    }

    #[test]
    fn test_clear_only_when_query_non_empty() {
        let mut state = SearchPanelState::new();
        assert_eq!(state.handle_event(&TuiEvent::ClearInput, &props("", &[], &[])), None);
        assert_eq!(
            state.handle_event(&TuiEvent::ClearInput, &props("Heat", &[], &[])),
            Some(SearchEvent::Clear)
        );
    }

    #[test]
    fn test_pick_suggestion_with_keyboard() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let p = props("", &s, &[]);
        state.handle_event(&TuiEvent::CursorDown, &p);
        assert_eq!(state.focus, Focus::Suggestions);
        state.handle_event(&TuiEvent::CursorDown, &p);
        let event = state.handle_event(&TuiEvent::Submit, &p);
        assert_eq!(event, Some(SearchEvent::PickSuggestion("Heat".to_string())));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_up_from_first_suggestion_returns_to_input() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let p = props("", &s, &[]);
        state.handle_event(&TuiEvent::Tab, &p);
        state.handle_event(&TuiEvent::CursorUp, &p);
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_typing_in_list_goes_back_to_input() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let p = props("", &s, &[]);
        state.handle_event(&TuiEvent::CursorDown, &p);
        let event = state.handle_event(&TuiEvent::InputChar('d'), &p);
        assert_eq!(event, Some(SearchEvent::QueryChanged("d".to_string())));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_result_grid_navigation_and_open() {
        let mut state = SearchPanelState::new();
        state.columns = 2;
        let results = vec![
            movie(1, "Heat", Some("/1.jpg")),
            movie(2, "Heat 2", Some("/2.jpg")),
            movie(3, "Heatwave", Some("/3.jpg")),
        ];
        let p = props("heat", &[], &results);

        state.handle_event(&TuiEvent::CursorDown, &p);
        assert_eq!(state.focus, Focus::Results);
        state.handle_event(&TuiEvent::CursorDown, &p);
        assert_eq!(state.selected, 2);
        state.handle_event(&TuiEvent::CursorRight, &p);
        assert_eq!(state.selected, 2);
        state.handle_event(&TuiEvent::CursorUp, &p);
        assert_eq!(state.selected, 0);

        let event = state.handle_event(&TuiEvent::Submit, &p);
        assert_eq!(event, Some(SearchEvent::OpenMovie(results[0].clone())));

        state.handle_event(&TuiEvent::CursorUp, &p);
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_focus_drops_when_results_disappear() {
        let mut state = SearchPanelState::new();
        let results = vec![movie(1, "Heat", Some("/1.jpg"))];
        state.handle_event(&TuiEvent::CursorDown, &props("heat", &[], &results));
        assert_eq!(state.focus, Focus::Results);

        state.sync(&props("heat", &[], &[]));
        assert_eq!(state.focus, Focus::Input);
    }

    #[test]
    fn test_render_empty_query_shows_placeholder_and_suggestions() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let text = draw(&mut state, props("", &s, &[]), 80, 20);
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains(SUGGESTIONS_TITLE));
        assert!(text.contains("Dune: Part Two"));
    }

    #[test]
    fn test_render_query_hides_suggestions() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let results = vec![movie(603, "The Matrix", Some("/abc.jpg"))];
        let text = draw(&mut state, props("Matrix", &s, &results), 80, 20);
        assert!(text.contains("The Matrix"));
        assert!(!text.contains(SUGGESTIONS_TITLE));
        assert!(!text.contains("Dune: Part Two"));
    }

    #[test]
    fn test_render_no_results() {
        let mut state = SearchPanelState::new();
        let text = draw(&mut state, props("zzzz", &[], &[]), 80, 20);
        assert!(text.contains("No results"));
    }

    #[test]
    fn test_click_suggestion() {
        let mut state = SearchPanelState::new();
        let s = suggestions();
        let area = Rect::new(0, 0, 80, 20);
        let layout = SearchLayout::new(area);
        let row = layout.body.y + 3; // heading, blank, Dune, Heat
        let event = state.handle_click(layout.body.x, row, area, &props("", &s, &[]));
        assert_eq!(event, Some(SearchEvent::PickSuggestion("Heat".to_string())));
    }

    #[test]
    fn test_click_clear_button_only_with_query() {
        let mut state = SearchPanelState::new();
        let area = Rect::new(0, 0, 80, 20);
        let layout = SearchLayout::new(area);
        let (x, y) = (layout.clear.x, layout.clear.y);
        assert_eq!(state.handle_click(x, y, area, &props("", &[], &[])), None);
        assert_eq!(
            state.handle_click(x, y, area, &props("Heat", &[], &[])),
            Some(SearchEvent::Clear)
        );
    }

    #[test]
    fn test_click_result_card() {
        let mut state = SearchPanelState::new();
        let results = vec![
            movie(1, "Heat", Some("/1.jpg")),
            movie(2, "Heat 2", Some("/2.jpg")),
        ];
        let area = Rect::new(0, 0, 80, 20);
        let layout = SearchLayout::new(area);
        let event = state.handle_click(
            layout.body.x + CARD_WIDTH + 1,
            layout.body.y + 1,
            area,
            &props("heat", &[], &results),
        );
        assert_eq!(event, Some(SearchEvent::OpenMovie(results[1].clone())));
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_grid_scrolls_to_selection() {
        let grid = Grid::new(Rect::new(0, 0, CARD_WIDTH * 2, CARD_HEIGHT * 2), 0).scrolled_to(7);
        // 2 columns, 2 visible rows: index 7 is on row 3
        assert_eq!(grid.scroll_row, 2);
        assert!(grid.cell(7).is_some());
        assert!(grid.cell(0).is_none());
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Heat", 10), "Heat");
        assert_eq!(truncate_str("The Lord of the Rings", 10), "The Lor...");
        assert_eq!(truncate_str("Heat", 2), "..");
    }
}
