//! Camera auto-framing.
//!
//! The view stays centered on the world origin and is resized so that every
//! planet (inflated by its radius plus a margin) fits, within the configured
//! size bounds and at the window's aspect ratio.

use glam::Vec2;
use gravity_engine::Camera2D;

use crate::config::CameraConfig;

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Rect {
    lower: Vec2,
    upper: Vec2,
}

impl Rect {
    fn around(center: Vec2, half: f32) -> Self {
        Self {
            lower: center - Vec2::splat(half),
            upper: center + Vec2::splat(half),
        }
    }

    fn contains(&self, other: &Rect) -> bool {
        other.lower.cmpge(self.lower).all() && other.upper.cmple(self.upper).all()
    }

    fn union(&self, other: &Rect) -> Rect {
        Rect {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }
}

/// Refit `camera` around `planets` (position, radius).
///
/// If any planet pokes out of the current view the view grows to cover both
/// the old view and every planet; otherwise it shrinks to just the planets.
pub fn fit_camera(camera: &mut Camera2D, planets: &[(Vec2, f32)], config: &CameraConfig) {
    let (lower, upper) = camera.visible_rect();
    let view = Rect { lower, upper };

    let rects: Vec<Rect> = planets
        .iter()
        .map(|&(pos, radius)| Rect::around(pos, radius + config.margin))
        .collect();

    let any_out = rects.iter().any(|r| !view.contains(r));
    let bounds = if any_out {
        rects.iter().fold(view, |acc, r| acc.union(r))
    } else {
        rects
            .iter()
            .copied()
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or(Rect {
                lower: Vec2::ZERO,
                upper: Vec2::ZERO,
            })
    };

    let half = bounds.upper.abs().max(bounds.lower.abs());
    let (width, height) = frame_size(half, camera.aspect(), config);
    camera.frame_centered(width, height);
}

/// Pick the aspect-correct size covering `half` extents, then clamp.
fn frame_size(half: Vec2, ratio: f32, config: &CameraConfig) -> (f32, f32) {
    let width1 = 2.0 * half.x;
    let height1 = width1 / ratio;
    let height2 = 2.0 * half.y;
    let width2 = height2 * ratio;

    let (mut width, mut height) = if width1 > width2 {
        (width1, height1)
    } else {
        (width2, height2)
    };

    if width > config.max_width {
        width = config.max_width;
        height = width / ratio;
    }
    if width < config.min_width {
        width = config.min_width;
        height = width / ratio;
    }
    if height > config.max_height {
        height = config.max_height;
        width = height * ratio;
    }
    if height < config.min_height {
        height = config.min_height;
        width = height * ratio;
    }

    (width, height)
}

/// Whether a body of `radius` at `pos` lies entirely outside the view.
pub fn is_outside_view(camera: &Camera2D, pos: Vec2, radius: f32) -> bool {
    !camera.is_rect_visible(pos, Vec2::splat(radius))
}
