//! Drawing contract between the wave and whatever renders it.

use super::models::{AlienKind, Bounds, Side};

/// What a sprite draw call shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Alien(AlienKind),
    /// `frame` indexes the ship strip; 0 is intact, higher frames are the
    /// explosion.
    Ship { frame: u32 },
}

/// A render target in play-area coordinates.
pub trait Surface {
    fn sprite(&mut self, sprite: Sprite, bounds: Bounds);
    fn fill_rect(&mut self, bounds: Bounds, side: Side);
    fn hline(&mut self, y: f64, x0: f64, x1: f64);
}

/// Anything that can render itself onto a surface.
pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}
