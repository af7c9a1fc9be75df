//! Drawing surface abstraction.
//!
//! Coordinates are PDF points with the origin at the bottom-left of the
//! page, offset by whatever `translate` calls are active in the current
//! saved state.

use crate::error::CalendarError;
use crate::fonts::FontRole;

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    /// Light grey used for cell and panel backgrounds.
    pub const PANEL: Color = Color::gray(248.0 / 255.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Fill,
    Stroke,
    FillStroke,
}

pub trait Canvas {
    /// Pushes the current colors, font and origin.
    fn save_state(&mut self);

    /// Pops back to the most recent `save_state`. Unbalanced calls are ignored.
    fn restore_state(&mut self);

    /// Moves the origin by (`dx`, `dy`) until the next `restore_state`.
    fn translate(&mut self, dx: f32, dy: f32);

    fn set_fill_color(&mut self, color: Color);

    fn set_stroke_color(&mut self, color: Color);

    fn set_font(&mut self, role: FontRole, size: f32);

    /// Draws `text` with its baseline at `y`; `x` is the left edge, centre or
    /// right edge depending on `align`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign);

    fn draw_rect(&mut self, rect: Rect, paint: Paint);

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: Paint);

    /// Finishes the current page. Drawing afterwards starts a new one.
    fn show_page(&mut self) -> Result<(), CalendarError>;
}
