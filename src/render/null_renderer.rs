use crate::core::Rgb;
use crate::error::PlotResult;
use crate::render::point_renderers::DrawStats;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless plot usage.
///
/// It still validates frame content and records what it was given, so tests
/// can inspect draws without a real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_text_count: usize,
    pub last_stats: DrawStats,
    pub last_painted_pixels: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> PlotResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_text_count = frame.texts.len();
        self.last_stats = frame.stats;
        self.last_painted_pixels = frame.raster.count_pixels_unlike(Rgb::WHITE);
        Ok(())
    }
}
