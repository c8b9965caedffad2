//! # Page Component
//!
//! The body below the nav bar: shows the current route and the key bindings.
//! Scrolls with PageUp/PageDown or the mouse wheel unless an overlay holds the
//! scroll lock.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use crate::core::nav::Route;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const SCROLL_STEP: u16 = 3;

const HELP: &[(&str, &str)] = &[
    ("/ or s", "Open search"),
    ("1-4", "New, Popular, Top Rated, Now Playing"),
    ("h", "Home"),
    ("u", "Profile"),
    ("Tab / ↓", "Move from the search box into the list"),
    ("Enter", "Pick a suggestion or open a movie"),
    ("Ctrl+U", "Clear the search box"),
    ("Esc", "Close the details or the search panel"),
    ("q", "Quit"),
];

#[derive(Debug, Default)]
pub struct PageState {
    pub scroll: u16,
    /// Set from core state each frame; while true scrolling is ignored.
    pub scroll_locked: bool,
    /// Lines of content from the last render, bounds the scroll offset.
    pub content_height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Scrolled(u16),
}

impl EventHandler for PageState {
    type Event = PageEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PageEvent> {
        if self.scroll_locked {
            return None;
        }
        let max = self.content_height.saturating_sub(1);
        let next = match event {
            TuiEvent::ScrollUp => self.scroll.saturating_sub(SCROLL_STEP),
            TuiEvent::ScrollDown => (self.scroll + SCROLL_STEP).min(max),
            _ => return None,
        };
        if next == self.scroll {
            return None;
        }
        self.scroll = next;
        Some(PageEvent::Scrolled(next))
    }
}

pub struct Page<'a> {
    pub route: Route,
    pub state: &'a mut PageState,
}

impl<'a> Page<'a> {
    pub fn new(route: Route, state: &'a mut PageState) -> Self {
        Self { route, state }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.route.title(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.route.path(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::default(),
        ];
        for (keys, what) in HELP {
            lines.push(Line::from(vec![
                Span::styled(format!("{keys:<10}"), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ]));
        }
        lines
    }
}

impl Component for Page<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        self.state.content_height = lines.len() as u16;
        self.state.scroll = self.state.scroll.min(self.state.content_height.saturating_sub(1));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().padding(Padding::new(2, 2, 1, 0)))
            .wrap(Wrap { trim: false })
            .scroll((self.state.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}
