//! # Icons
//!
//! Vector glyphs drawn on a ratatui `Canvas`: search, close, logo and user.
//!
//! Every icon lives in a 50×50 viewbox with the origin bottom-left and is a
//! pure function of its `IconProps`. Nothing here holds state or fails; a
//! zero-sized icon simply draws nothing.

use std::f64::consts::TAU;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line};

use crate::tui::component::Component;

const VIEWBOX: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Search,
    Close,
    Logo,
    User,
}

/// Presentation parameters for an icon.
#[derive(Debug, Clone, PartialEq)]
pub struct IconProps {
    /// Width in terminal cells.
    pub width: u16,
    /// Height in terminal cells.
    pub height: u16,
    pub stroke: Color,
    /// 1 draws hairlines (braille), 2-3 half blocks, 4+ full blocks.
    pub stroke_width: u8,
    /// Style hint. `"active"` bolds the stroke and `"dim"` dims it; other values are ignored.
    pub class: Option<String>,
}

impl Default for IconProps {
    fn default() -> Self {
        Self {
            width: 4,
            height: 2,
            stroke: Color::White,
            stroke_width: 1,
            class: None,
        }
    }
}

impl IconProps {
    pub fn sized(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn stroke(mut self, color: Color, width: u8) -> Self {
        self.stroke = color;
        self.stroke_width = width;
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    fn marker(&self) -> Marker {
        match self.stroke_width {
            0 | 1 => Marker::Braille,
            2 | 3 => Marker::HalfBlock,
            _ => Marker::Block,
        }
    }

    fn modifier(&self) -> Modifier {
        match self.class.as_deref() {
            Some("active") => Modifier::BOLD,
            Some("dim") => Modifier::DIM,
            _ => Modifier::empty(),
        }
    }

    /// The area the icon occupies: its requested size, centered in `area` and clipped to it.
    pub fn placement(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }
}

/// An icon bound to its props, ready to render.
pub struct IconView {
    pub icon: Icon,
    pub props: IconProps,
}

impl IconView {
    pub fn new(icon: Icon, props: IconProps) -> Self {
        Self { icon, props }
    }
}

impl Component for IconView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let target = self.props.placement(area);
        if target.width == 0 || target.height == 0 {
            return;
        }
        let icon = self.icon;
        let color = self.props.stroke;
        let canvas = Canvas::default()
            .x_bounds([0.0, VIEWBOX])
            .y_bounds([0.0, VIEWBOX])
            .marker(self.props.marker())
            .paint(move |ctx| draw_icon(ctx, icon, color));
        frame.render_widget(canvas, target);

        let modifier = self.props.modifier();
        if !modifier.is_empty() {
            frame
                .buffer_mut()
                .set_style(target, Style::default().add_modifier(modifier));
        }
    }
}

fn circle(x: f64, y: f64, radius: f64, color: Color) -> Circle {
    Circle {
        x,
        y,
        radius,
        color,
    }
}

fn draw_icon(ctx: &mut Context, icon: Icon, color: Color) {
    match icon {
        Icon::Search => {
            // Lens and handle
            ctx.draw(&circle(21.0, 30.0, 16.0, color));
            ctx.draw(&Line::new(32.5, 18.5, 46.0, 5.0, color));
        }
        Icon::Close => {
            ctx.draw(&Line::new(8.0, 8.0, 42.0, 42.0, color));
            ctx.draw(&Line::new(8.0, 42.0, 42.0, 8.0, color));
        }
        Icon::Logo => {
            // Film reel: rim, hub, five spools
            ctx.draw(&circle(25.0, 25.0, 22.0, color));
            ctx.draw(&circle(25.0, 25.0, 3.0, color));
            for i in 0..5 {
                let angle = TAU * f64::from(i) / 5.0 + TAU / 4.0;
                ctx.draw(&circle(
                    25.0 + 12.0 * angle.cos(),
                    25.0 + 12.0 * angle.sin(),
                    4.5,
                    color,
                ));
            }
        }
        Icon::User => {
            ctx.draw(&circle(25.0, 25.0, 23.0, color));
            ctx.draw(&circle(25.0, 32.0, 8.0, color));
            // Shoulders
            ctx.draw(&Line::new(10.0, 8.0, 16.0, 18.0, color));
            ctx.draw(&Line::new(16.0, 18.0, 34.0, 18.0, color));
            ctx.draw(&Line::new(34.0, 18.0, 40.0, 8.0, color));
        }
    }
}
