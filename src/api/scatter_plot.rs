use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{
    PixelCoords, PointData, ProjectedLabel, ProjectedLine, Projection, Selection, SurfaceSize,
    ZoomWindow, project_labels, project_lines, project_points,
};
use crate::error::{PlotError, PlotResult};
use crate::extensions::{PlotEvent, PlotObserver};
use crate::interaction::InteractionState;
use crate::render::{
    DrawStats, FixedAdvanceMetrics, LineStyle, RasterSurface, RenderPath, Renderer, SpriteCache,
    SpriteCacheStats, TextMetrics, TextPrimitive,
};

use super::{LabelBox, PlotConfig, ViewportState};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// Point data handle shared by linked views until one of them loads its own.
pub type SharedPoints = Rc<RefCell<PointData>>;
/// Selection handle; linked views always share it.
pub type SharedSelection = Rc<RefCell<Selection>>;

/// Main facade consumed by host applications.
///
/// `ScatterPlot` owns the zoom state, the projected pixel caches, the point
/// raster and the sprite cache, and hands finished frames to its renderer.
pub struct ScatterPlot<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: PlotConfig,
    pub(super) points: Option<SharedPoints>,
    pub(super) selection: SharedSelection,
    pub(super) viewport: Option<ViewportState>,
    pub(super) pixels: PixelCoords,
    pub(super) labels_px: Vec<Option<ProjectedLabel>>,
    pub(super) annotations_px: Vec<Option<ProjectedLabel>>,
    pub(super) lines_px: Vec<ProjectedLine>,
    pub(super) label_boxes: Vec<Option<LabelBox>>,
    pub(super) texts: Vec<TextPrimitive>,
    pub(super) line_style: LineStyle,
    pub(super) raster: RasterSurface,
    pub(super) pan_snapshot: Option<RasterSurface>,
    pub(super) sprites: SpriteCache,
    pub(super) emphasis: Option<u8>,
    pub(super) show_labels: bool,
    pub(super) interaction: InteractionState,
    pub(super) hovered_label: Option<usize>,
    pub(super) hovered_line: Option<usize>,
    pub(super) observers: Vec<Box<dyn PlotObserver>>,
    pub(super) status: String,
    pub(super) last_stats: DrawStats,
    pub(super) last_path: Option<RenderPath>,
    pub(super) last_svg: Option<String>,
    pub(super) text_metrics: Box<dyn TextMetrics>,
    pub(super) invalidated: bool,
}

impl<R: Renderer> ScatterPlot<R> {
    /// Creates an empty plot; load data before drawing.
    pub fn new(renderer: R, config: PlotConfig) -> PlotResult<Self> {
        Self::with_selection(renderer, config, Rc::new(RefCell::new(Selection::new())))
    }

    pub(super) fn with_selection(
        renderer: R,
        config: PlotConfig,
        selection: SharedSelection,
    ) -> PlotResult<Self> {
        config.validate()?;
        let raster = RasterSurface::new(config.surface)?;
        let interaction = InteractionState::new(config.drag_mode, config.hover_delay());
        Ok(Self {
            renderer,
            show_labels: config.show_labels,
            line_style: config.line_style,
            config,
            points: None,
            selection,
            viewport: None,
            pixels: PixelCoords::default(),
            labels_px: Vec::new(),
            annotations_px: Vec::new(),
            lines_px: Vec::new(),
            label_boxes: Vec::new(),
            texts: Vec::new(),
            raster,
            pan_snapshot: None,
            sprites: SpriteCache::default(),
            emphasis: None,
            interaction,
            hovered_label: None,
            hovered_line: None,
            observers: Vec::new(),
            status: String::new(),
            last_stats: DrawStats::default(),
            last_path: None,
            last_svg: None,
            text_metrics: Box::new(FixedAdvanceMetrics::default()),
            invalidated: true,
        })
    }

    /// Replaces the text measurement used for label boxes.
    pub fn set_text_metrics(&mut self, metrics: Box<dyn TextMetrics>) {
        self.text_metrics = metrics;
        self.layout_labels();
    }

    #[must_use]
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.config.surface
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.points.is_some()
    }

    /// Total points including hidden ones.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points
            .as_ref()
            .map_or(0, |points| points.borrow().point_count())
    }

    /// Points projected inside the current window.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.pixels.visible_count()
    }

    /// Points not carrying the hidden sentinel.
    #[must_use]
    pub fn unhidden_count(&self) -> usize {
        self.points
            .as_ref()
            .map_or(0, |points| points.borrow().unhidden_count())
    }

    #[must_use]
    pub fn viewport(&self) -> Option<&ViewportState> {
        self.viewport.as_ref()
    }

    #[must_use]
    pub fn window(&self) -> Option<ZoomWindow> {
        self.viewport.as_ref().map(ViewportState::window)
    }

    #[must_use]
    pub fn zoom_factor(&self) -> Option<f64> {
        self.viewport.as_ref().map(ViewportState::zoom_factor)
    }

    /// Current circle radius, 0 before a load.
    #[must_use]
    pub fn radius(&self) -> u32 {
        self.viewport.as_ref().map_or(0, ViewportState::radius)
    }

    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        self.viewport.as_ref().map(ViewportState::alpha)
    }

    #[must_use]
    pub fn pixel_coords(&self) -> &PixelCoords {
        &self.pixels
    }

    #[must_use]
    pub fn projected_labels(&self) -> &[Option<ProjectedLabel>] {
        &self.labels_px
    }

    #[must_use]
    pub fn projected_lines(&self) -> &[ProjectedLine] {
        &self.lines_px
    }

    /// Selected indices in ascending order.
    #[must_use]
    pub fn selection(&self) -> Vec<u32> {
        self.selection.borrow().sorted_ids()
    }

    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selection.borrow().len()
    }

    #[must_use]
    pub fn selection_handle(&self) -> SharedSelection {
        Rc::clone(&self.selection)
    }

    #[must_use]
    pub fn points_handle(&self) -> Option<SharedPoints> {
        self.points.clone()
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    #[must_use]
    pub fn texts(&self) -> &[TextPrimitive] {
        &self.texts
    }

    #[must_use]
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    #[must_use]
    pub fn last_stats(&self) -> DrawStats {
        self.last_stats
    }

    #[must_use]
    pub fn last_render_path(&self) -> Option<RenderPath> {
        self.last_path
    }

    /// SVG produced by the last draw in vector-export mode.
    #[must_use]
    pub fn last_svg(&self) -> Option<&str> {
        self.last_svg.as_deref()
    }

    #[must_use]
    pub fn sprite_cache_stats(&self) -> SpriteCacheStats {
        self.sprites.stats()
    }

    /// `true` when state changed since the last draw.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Renders the current raster and texts into an external cairo context.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(&mut self, context: &cairo::Context) -> PlotResult<()>
    where
        R: CairoContextRenderer,
    {
        let path = self.last_path.ok_or(PlotError::NotLoaded)?;
        let frame = crate::render::RenderFrame::new(&self.raster, &self.texts, path, self.last_stats);
        self.renderer.render_on_cairo_context(context, &frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub(super) fn loaded_points(&self) -> PlotResult<SharedPoints> {
        self.points.clone().ok_or(PlotError::NotLoaded)
    }

    pub(super) fn loaded_viewport(&self) -> PlotResult<ViewportState> {
        self.viewport.ok_or(PlotError::NotLoaded)
    }

    pub(super) fn projection(&self) -> PlotResult<Projection> {
        let viewport = self.loaded_viewport()?;
        Projection::new(viewport.window(), self.config.surface, viewport.radius())
    }

    /// Recomputes radius/alpha and every pixel-space cache from the current
    /// window. Does not draw.
    pub(super) fn scale_data(&mut self) -> PlotResult<()> {
        let Some(points) = self.points.clone() else {
            return Ok(());
        };
        let Some(viewport) = self.viewport.as_mut() else {
            return Ok(());
        };
        let radius_alpha_changed = viewport.calc_radius();
        let (radius, alpha, window) = (viewport.radius(), viewport.alpha(), viewport.window());

        let projection = Projection::new(window, self.config.surface, radius)?;
        {
            let data = points.borrow();
            self.pixels = project_points(data.coords(), &projection);
            self.labels_px = project_labels(data.labels(), &projection);
            self.annotations_px = project_labels(data.annotations(), &projection);
            self.lines_px = project_lines(data.lines(), window, self.config.surface);
        }
        self.layout_labels();
        self.invalidated = true;

        if radius_alpha_changed {
            self.emit(PlotEvent::RadiusAlphaChanged { radius, alpha });
        }
        Ok(())
    }
}
