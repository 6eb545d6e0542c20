use crate::error::{PlotError, PlotResult};
use crate::render::point_renderers::DrawStats;
use crate::render::primitives::TextPrimitive;
use crate::render::raster::RasterSurface;
use crate::render::render_path::RenderPath;

/// Backend-agnostic output of one draw pass: the painted raster plus the
/// text that still has to be composed on top of it.
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub raster: &'a RasterSurface,
    pub texts: &'a [TextPrimitive],
    pub path: RenderPath,
    pub stats: DrawStats,
}

impl<'a> RenderFrame<'a> {
    #[must_use]
    pub fn new(
        raster: &'a RasterSurface,
        texts: &'a [TextPrimitive],
        path: RenderPath,
        stats: DrawStats,
    ) -> Self {
        Self {
            raster,
            texts,
            path,
            stats,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        let size = self.raster.size();
        if !size.is_valid() {
            return Err(PlotError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }
        for text in self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.points_drawn == 0 && self.texts.is_empty()
    }
}
