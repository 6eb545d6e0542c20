mod frame;
mod null_renderer;
mod point_renderers;
mod primitives;
mod raster;
mod render_path;
mod sprite_atlas;
mod svg_export;
mod text_metrics;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use point_renderers::{
    DrawStats, OVERDRAW_ALPHA, PointDrawInput, draw_lines, draw_pixel_buffer,
    draw_reference_circles, draw_rects, draw_sprites,
};
pub use primitives::{Color, LineStyle, TextPrimitive, TextStyle};
pub use raster::RasterSurface;
pub use render_path::{DrawMode, RenderPath};
pub use sprite_atlas::{
    GlyphId, GlyphView, OUTLINE_MIN_RADIUS, SpriteAtlas, SpriteCache, SpriteCacheKey,
    SpriteCacheStats, emphasized_radius, tile_size,
};
pub use svg_export::{Legend, LegendRow, SvgScene, escape_xml, format_percent, legend_label, render_svg};
pub use text_metrics::{FixedAdvanceMetrics, TextMetrics};

use crate::error::PlotResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully painted point raster plus text primitives, so
/// drawing code stays isolated from plot state and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> PlotResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
