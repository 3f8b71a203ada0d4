//! Headless surface that records draw calls
//!
//! Used by the native binary and by tests to observe what a frame painted.

use glam::Vec2;

use super::Surface;
use crate::palette::Rgba;

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { color: Rgba },
    Circle { center: Vec2, radius: f32, color: Rgba },
}

/// Surface that appends every draw call to a list
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub width: f32,
    pub height: f32,
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Drop recorded commands (call between frames)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of discs drawn since the last clear
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Full-surface fills since the last clear
    pub fn fills(&self) -> impl Iterator<Item = &Rgba> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { color } => Some(color),
            DrawCommand::Circle { .. } => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill { color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }
}
