//! Painting a [`GameState`] onto a raster surface.

use macroquad::color::{BLACK, Color};
use macroquad::math::Rect;

use crate::game::GameState;
use crate::settings::CELL_SIZE;

/// Accent colour for the apple.
pub const APPLE_COLOR: Color = Color::new(0.9, 0.1, 0.1, 1.0);
pub const BACKGROUND_COLOR: Color = BLACK;

/// Anything that can fill axis-aligned rectangles given in logical pixels.
pub trait Surface {
    /// Logical width and height in pixels.
    fn size(&self) -> (f32, f32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// Clear the surface, then paint the snake and the apple.
pub fn draw(state: &GameState, snake_color: Color, surface: &mut impl Surface) {
    let (w, h) = surface.size();
    surface.fill_rect(Rect::new(0.0, 0.0, w, h), BACKGROUND_COLOR);

    let cell = CELL_SIZE as f32;
    for segment in &state.snake {
        surface.fill_rect(segment.to_rect(cell), snake_color);
    }
    if let Some(apple) = state.apple {
        surface.fill_rect(apple.to_rect(cell), APPLE_COLOR);
    }
}

/// The macroquad window, showing a fixed logical surface scaled uniformly
/// and placed at `origin` (window pixels).
pub struct ScreenSurface {
    width: f32,
    height: f32,
    scale: f32,
    origin: (f32, f32),
}

impl ScreenSurface {
    pub fn new(width: f32, height: f32, scale: f32, origin: (f32, f32)) -> Self {
        Self { width, height, scale, origin }
    }

    /// Window-space rectangle covered by the surface.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin.0, self.origin.1, self.width * self.scale, self.height * self.scale)
    }
}

impl Surface for ScreenSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        macroquad::shapes::draw_rectangle(
            self.origin.0 + rect.x * self.scale,
            self.origin.1 + rect.y * self.scale,
            rect.w * self.scale,
            rect.h * self.scale,
            color,
        );
    }
}
