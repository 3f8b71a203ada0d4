//! 2D canvas surface (wasm32 only)

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::palette::Rgba;

/// Errors acquiring a drawing context
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("canvas refused a 2d context: {0}")]
    ContextRefused(String),
    #[error("canvas has no 2d context support")]
    Unsupported,
}

/// Canvas element plus its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, AttachError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| AttachError::ContextRefused(format!("{:?}", e)))?
            .ok_or(AttachError::Unsupported)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AttachError::Unsupported)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn fill(&mut self, color: Rgba) {
        let size = self.size();
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }
}
