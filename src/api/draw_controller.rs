use tracing::{debug, trace};

use crate::core::Rgb;
use crate::error::{PlotError, PlotResult};
use crate::render::{
    DrawMode, DrawStats, Legend, PointDrawInput, RenderFrame, RenderPath, Renderer, SvgScene,
    draw_lines, draw_pixel_buffer, draw_rects, draw_reference_circles, draw_sprites, render_svg,
};

use super::ScatterPlot;

impl<R: Renderer> ScatterPlot<R> {
    /// Repaints the raster from the current caches and hands the frame to
    /// the renderer.
    pub fn draw(&mut self) -> PlotResult<DrawStats> {
        let points = self.loaded_points()?;
        let viewport = self.loaded_viewport()?;
        let radius = viewport.radius();
        let path = RenderPath::select(radius, self.config.draw_mode);

        self.raster.clear(Rgb::WHITE);
        let stats = {
            let data = points.borrow();
            let selection = self.selection.borrow();
            let input = PointDrawInput {
                pixels: &self.pixels,
                colors: data.colors(),
                palette: data.palette(),
                radius,
                alpha: viewport.alpha(),
                selection: &selection,
                emphasis: self.emphasis,
            };
            match path {
                RenderPath::PixelBuffer => draw_pixel_buffer(&mut self.raster, &input),
                RenderPath::Rect => draw_rects(&mut self.raster, &input),
                RenderPath::Sprite => {
                    let atlas = self.sprites.atlas_for(radius, data.palette(), self.emphasis);
                    draw_sprites(&mut self.raster, atlas, &input)
                }
                RenderPath::ReferenceCircle => draw_reference_circles(&mut self.raster, &input),
                RenderPath::VectorExport => {
                    let labels = if self.show_labels {
                        self.labels_px.as_slice()
                    } else {
                        &[]
                    };
                    let scene = SvgScene {
                        points: input,
                        surface: self.config.surface,
                        labels,
                        init_window: viewport.init_window(),
                        font_size_px: self.config.font_size_px,
                        legend: None,
                        legend_width: self.config.legend_width_px,
                    };
                    let (svg, _) = render_svg(&scene)?;
                    self.last_svg = Some(svg);
                    draw_reference_circles(&mut self.raster, &input)
                }
            }
        };
        let line_count = draw_lines(&mut self.raster, &self.lines_px, self.line_style);

        let frame = RenderFrame::new(&self.raster, &self.texts, path, stats);
        self.renderer.render(&frame)?;
        self.last_stats = stats;
        self.last_path = Some(path);
        self.invalidated = false;
        debug!(
            ?path,
            radius,
            points = stats.points_drawn,
            selected = stats.selection_overdraw,
            lines = line_count,
            "plot drawn"
        );
        Ok(stats)
    }

    /// Draws only when something changed since the last frame.
    pub fn render_if_invalidated(&mut self) -> PlotResult<Option<DrawStats>> {
        if !self.invalidated || !self.is_loaded() {
            trace!("draw skipped");
            return Ok(None);
        }
        self.draw().map(Some)
    }

    /// Serializes the current view, with an optional legend on the right.
    pub fn export_svg(&self, legend: Option<&Legend>) -> PlotResult<String> {
        let points = self.loaded_points()?;
        let viewport = self.loaded_viewport()?;
        let data = points.borrow();
        let selection = self.selection.borrow();
        let labels = if self.show_labels {
            self.labels_px.as_slice()
        } else {
            &[]
        };
        let scene = SvgScene {
            points: PointDrawInput {
                pixels: &self.pixels,
                colors: data.colors(),
                palette: data.palette(),
                radius: viewport.radius(),
                alpha: viewport.alpha(),
                selection: &selection,
                emphasis: self.emphasis,
            },
            surface: self.config.surface,
            labels,
            init_window: viewport.init_window(),
            font_size_px: self.config.font_size_px,
            legend,
            legend_width: self.config.legend_width_px,
        };
        render_svg(&scene).map(|(svg, _)| svg)
    }

    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.config.draw_mode
    }

    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        if mode != DrawMode::VectorExport {
            self.last_svg = None;
        }
        self.config.draw_mode = mode;
        self.invalidated = true;
        debug!(?mode, "draw mode changed");
    }

    /// Renders the last painted raster again without repainting it.
    pub fn present(&mut self) -> PlotResult<()> {
        let path = self.last_path.ok_or(PlotError::NotLoaded)?;
        let frame = RenderFrame::new(&self.raster, &self.texts, path, self.last_stats);
        self.renderer.render(&frame)
    }
}
