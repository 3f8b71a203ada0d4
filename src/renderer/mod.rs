//! Drawing surface abstraction
//!
//! The show only ever paints full-surface rectangles and filled discs, so a
//! surface is anything that can do those two things and report its size.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod commands;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use commands::{CommandBuffer, DrawCommand};

use glam::Vec2;

use crate::palette::Rgba;

/// A 2D drawing target in surface-local pixel coordinates
pub trait Surface {
    /// Current backing size (width, height)
    fn size(&self) -> Vec2;

    /// Resize the backing buffer
    fn resize(&mut self, width: f32, height: f32);

    /// Paint the whole surface with a (possibly translucent) colour
    fn fill(&mut self, color: Rgba);

    /// Paint a filled disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}
