//! # Movie Modal Component
//!
//! Centered overlay with the details of one movie and a close icon.
//! Stateless: the selected movie is core state, passed in as a prop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::catalog::Movie;
use crate::tui::component::Component;
use crate::tui::components::icons::{Icon, IconProps, IconView};
use crate::tui::event::TuiEvent;

const CLOSE_WIDTH: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalEvent {
    Close,
}

/// Keys that close the overlay. Escape is handled globally by the core.
pub fn modal_key(event: &TuiEvent) -> Option<ModalEvent> {
    match event {
        TuiEvent::Submit | TuiEvent::InputChar('q') => Some(ModalEvent::Close),
        _ => None,
    }
}

/// A click on the close icon or anywhere outside the overlay closes it.
pub fn modal_click(column: u16, row: u16, area: Rect) -> Option<ModalEvent> {
    let overlay = overlay_rect(area);
    let position = Position::new(column, row);
    if !overlay.contains(position) || close_rect(overlay).contains(position) {
        Some(ModalEvent::Close)
    } else {
        None
    }
}

pub fn overlay_rect(area: Rect) -> Rect {
    centered_rect(70, 70, area)
}

fn close_rect(overlay: Rect) -> Rect {
    Rect {
        x: (overlay.x + overlay.width).saturating_sub(CLOSE_WIDTH + 1),
        y: overlay.y,
        width: CLOSE_WIDTH.min(overlay.width),
        height: 1.min(overlay.height),
    }
}

pub struct MovieModal<'a> {
    pub movie: &'a Movie,
    pub poster_url: Option<String>,
}

impl<'a> MovieModal<'a> {
    pub fn new(movie: &'a Movie, poster_url: Option<String>) -> Self {
        Self { movie, poster_url }
    }

    fn detail_lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        let released = match self.movie.release() {
            Some(date) => date.format("%-d %B %Y").to_string(),
            None => "Unknown".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled("Released  ", label),
            Span::raw(released),
        ]));

        let rating = match self.movie.vote_average {
            Some(r) if r > 0.0 => format!("★ {r:.1} / 10"),
            _ => "Not rated".to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled("Rating    ", label),
            Span::styled(rating, Style::default().fg(Color::Yellow)),
        ]));

        if let Some(url) = &self.poster_url {
            lines.push(Line::from(vec![
                Span::styled("Poster    ", label),
                Span::styled(url.clone(), Style::default().fg(Color::Cyan)),
            ]));
        }

        lines.push(Line::default());
        let overview = self
            .movie
            .overview
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .unwrap_or("No overview available.");
        lines.push(Line::from(overview.to_string()));
        lines
    }
}

impl Component for MovieModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = overlay_rect(area);
        frame.render_widget(Clear, overlay);

        let title = if self.movie.title.is_empty() {
            " Untitled ".to_string()
        } else {
            format!(" {} ", self.movie.title)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter/Esc Close ").centered())
            .padding(Padding::new(2, 2, 1, 0));

        let paragraph = Paragraph::new(self.detail_lines())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);

        IconView::new(Icon::Close, IconProps::sized(2, 1).stroke(Color::Red, 2))
            .render(frame, close_rect(overlay));
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
