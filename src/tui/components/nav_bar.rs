//! # NavBar Component
//!
//! Top bar: logo, the four menu entries, and the search and user icons.
//!
//! Stateless: everything it shows comes from props. The same `NavLayout` is
//! used for rendering and for mouse hit-testing, so a click always lands on
//! what was drawn.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::nav::{Menu, NavTarget};
use crate::tui::component::Component;
use crate::tui::components::icons::{Icon, IconProps, IconView};

pub const NAV_BAR_HEIGHT: u16 = 3;
const LOGO_WIDTH: u16 = 8;
const SEARCH_WIDTH: u16 = 6;
const USER_WIDTH: u16 = 6;
const MENU_GAP: u16 = 2;

/// What a click on the nav bar hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavHit {
    Navigate(NavTarget),
    OpenSearch,
}

/// Screen regions of every clickable nav bar element.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLayout {
    pub logo: Rect,
    pub menu: Vec<(Menu, Rect)>,
    pub search: Rect,
    pub user: Rect,
}

impl NavLayout {
    pub fn new(area: Rect) -> Self {
        let [logo, middle, search, user] = Layout::horizontal([
            Constraint::Length(LOGO_WIDTH),
            Constraint::Min(0),
            Constraint::Length(SEARCH_WIDTH),
            Constraint::Length(USER_WIDTH),
        ])
        .areas(area);

        // Menu labels sit on the middle row, left-aligned, clipped at the right edge
        let row = area.y + area.height / 2;
        let mut x = middle.x + 1;
        let right = middle.x + middle.width;
        let mut menu = Vec::with_capacity(Menu::ALL.len());
        for entry in Menu::ALL {
            let width = (entry.label().width() as u16).min(right.saturating_sub(x));
            if width == 0 {
                break;
            }
            menu.push((entry, Rect::new(x, row, width, 1)));
            x = x.saturating_add(width + MENU_GAP);
        }

        Self {
            logo,
            menu,
            search,
            user,
        }
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<NavHit> {
        let contains = |r: &Rect| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        };
        if contains(&self.logo) {
            return Some(NavHit::Navigate(NavTarget::Logo));
        }
        if let Some((entry, _)) = self.menu.iter().find(|(_, r)| contains(r)) {
            return Some(NavHit::Navigate(NavTarget::Menu(*entry)));
        }
        if contains(&self.search) {
            return Some(NavHit::OpenSearch);
        }
        if contains(&self.user) {
            return Some(NavHit::Navigate(NavTarget::User));
        }
        None
    }
}

pub struct NavBar {
    pub active_menu: Menu,
    pub search_open: bool,
}

impl NavBar {
    pub fn new(active_menu: Menu, search_open: bool) -> Self {
        Self {
            active_menu,
            search_open,
        }
    }
}

impl Component for NavBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
            area,
        );
        let layout = NavLayout::new(area);

        IconView::new(
            Icon::Logo,
            IconProps::sized(4, 2).stroke(Color::Yellow, 1),
        )
        .render(frame, layout.logo);

        for (entry, rect) in &layout.menu {
            let style = if *entry == self.active_menu {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::Gray)
            };
            frame.render_widget(Paragraph::new(entry.label()).style(style), *rect);
        }

        let search_props = IconProps::sized(4, 2).stroke(Color::White, 2);
        let search_props = if self.search_open {
            search_props.class("active")
        } else {
            search_props.class("dim")
        };
        IconView::new(Icon::Search, search_props).render(frame, layout.search);

        IconView::new(Icon::User, IconProps::sized(4, 2).stroke(Color::White, 4))
            .render(frame, layout.user);
    }
}
