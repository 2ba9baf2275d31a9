//! Renderer boundary.
//!
//! Game code describes what to draw in world space; a `Renderer` turns it into
//! whatever the host presents (a tessellated vertex buffer, a canvas, a test
//! recorder). The game never talks to a graphics API directly.

use glam::Vec2;

use super::camera::Camera2D;

/// RGBA color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Self = Self::rgb(0.0, 1.0, 1.0);
    pub const ORANGE: Self = Self::rgb(1.0, 0.5, 0.0);
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A world-space shape to fill.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawShape {
    Circle { center: Vec2, radius: f32 },
    /// Closed polygon, already transformed into world space.
    Polygon { points: Vec<Vec2> },
}

/// How a trail tapers from its oldest point to its newest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailStyle {
    pub start_radius: f32,
    pub end_radius: f32,
    pub start_alpha: f32,
    pub end_alpha: f32,
    pub color: Color,
}

impl TrailStyle {
    /// Radius and alpha at position `t` in [0, 1] along the trail (0 = oldest).
    pub fn at(&self, t: f32) -> (f32, f32) {
        let t = t.clamp(0.0, 1.0);
        (
            self.start_radius + (self.end_radius - self.start_radius) * t,
            self.start_alpha + (self.end_alpha - self.start_alpha) * t,
        )
    }
}

/// Horizontal anchor for screen text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Left,
    Center,
    Right,
}

/// Draw-call sink used by game screens.
pub trait Renderer {
    /// Camera used to map world-space calls to the screen.
    fn set_camera(&mut self, camera: &Camera2D);

    /// Start a new frame.
    fn clear(&mut self, color: Color);

    fn draw_shape(&mut self, shape: &DrawShape, color: Color);

    /// Draw a trail through world-space points, oldest first.
    fn draw_trail(&mut self, points: &[Vec2], style: &TrailStyle);

    /// Queue text at a window-pixel position (origin top-left).
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, anchor: TextAnchor);
}
