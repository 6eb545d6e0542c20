use tracing::{debug, trace};

use crate::core::{PixelRect, ZoomWindow};
use crate::error::{PlotError, PlotResult};
use crate::interaction::DragMode;
use crate::render::{RenderFrame, RenderPath, Renderer};

use super::{ScatterPlot, ViewportState, ZoomOutcome};

impl<R: Renderer> ScatterPlot<R> {
    /// Zooms by `factor` (> 1 zooms in) around `pivot` in surface pixels,
    /// the surface center when `None`. Out-of-range results are rejected
    /// and leave the view untouched.
    pub fn zoom_by(&mut self, factor: f64, pivot: Option<(f64, f64)>) -> PlotResult<ZoomOutcome> {
        let mut viewport = self.loaded_viewport()?;
        let surface = self.config.surface;
        let weights = pivot.map_or((0.5, 0.5), |(px, py)| {
            (px / f64::from(surface.width), py / f64::from(surface.height))
        });
        let outcome = viewport.zoom_by(factor, weights);
        debug!(factor, ?pivot, applied = outcome.is_applied(), "zoom by");
        self.apply_viewport(viewport, outcome)
    }

    /// Zooms to a rectangle of surface pixels given by two corners in any
    /// order.
    pub fn zoom_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> PlotResult<ZoomOutcome> {
        let mut viewport = self.loaded_viewport()?;
        let projection = self.projection()?;
        let rect = PixelRect::from_corners(
            x1.round() as i32,
            y1.round() as i32,
            x2.round() as i32,
            y2.round() as i32,
        );
        let top_left = projection.unproject(f64::from(rect.min_x), f64::from(rect.min_y));
        let bottom_right = projection.unproject(f64::from(rect.max_x), f64::from(rect.max_y));
        let outcome = match ZoomWindow::new(top_left.x, bottom_right.x, bottom_right.y, top_left.y)
        {
            Ok(window) => viewport.set_window(window),
            Err(_) => ZoomOutcome::Rejected,
        };
        debug!(?rect, applied = outcome.is_applied(), "zoom to rectangle");
        self.apply_viewport(viewport, outcome)
    }

    /// Replaces the window with a data-space `window`, subject to the same
    /// zoom limits as `zoom_by`.
    pub fn set_zoom_window(&mut self, window: ZoomWindow) -> PlotResult<ZoomOutcome> {
        let mut viewport = self.loaded_viewport()?;
        let outcome = viewport.set_window(window);
        trace!(?window, applied = outcome.is_applied(), "zoom window set");
        self.apply_viewport(viewport, outcome)
    }

    /// Back to the initial window with neutral radius/alpha multipliers.
    pub fn zoom_100(&mut self) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        viewport.reset();
        self.viewport = Some(viewport);
        self.scale_data()
    }

    /// Translates the window by surface pixels. Positive `dy` moves the
    /// window up in data space.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        let window = viewport.window();
        let surface = self.config.surface;
        let data_dx = dx * window.span_x() / f64::from(surface.width);
        let data_dy = dy * window.span_y() / f64::from(surface.height);
        viewport.translate(data_dx, data_dy);
        trace!(dx, dy, data_dx, data_dy, "move by");
        self.viewport = Some(viewport);
        self.scale_data()
    }

    /// Translates the window by fractions of its current span.
    pub fn move_percent(&mut self, fx: f64, fy: f64) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        let window = viewport.window();
        viewport.translate(window.span_x() * fx, window.span_y() * fy);
        self.viewport = Some(viewport);
        self.scale_data()
    }

    /// Snapshots the raster for cheap previews while dragging.
    pub fn pan_start(&mut self) -> PlotResult<()> {
        self.loaded_viewport()?;
        self.pan_snapshot = Some(self.raster.clone());
        trace!("pan started");
        Ok(())
    }

    /// Shows the snapshot shifted against the drag delta `(dx, dy)` (press
    /// position minus current position) without recomputing anything.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        let snapshot = self.pan_snapshot.as_ref().ok_or_else(|| {
            PlotError::InvalidData("pan_by called without pan_start".to_owned())
        })?;
        self.raster
            .draw_shifted(snapshot, -(dx.round() as i32), -(dy.round() as i32));
        let frame = RenderFrame::new(&self.raster, &[], RenderPath::PixelBuffer, self.last_stats);
        self.renderer.render(&frame)
    }

    /// Commits the drag delta to the window and redraws fully.
    pub fn pan_end(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        self.pan_snapshot = None;
        self.move_by(dx, -dy)?;
        self.draw()?;
        trace!(dx, dy, "pan ended");
        Ok(())
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.pan_snapshot.is_some()
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.interaction.drag_mode()
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.interaction.set_drag_mode(mode);
        debug!(?mode, "drag mode changed");
    }

    /// Scales radius and alpha on top of the zoom-derived values.
    pub fn set_radius_alpha_multipliers(&mut self, radius: f64, alpha: f64) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        viewport.set_multipliers(radius, alpha)?;
        self.viewport = Some(viewport);
        self.scale_data()
    }

    pub fn reset_radius(&mut self) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        viewport.reset_radius();
        self.viewport = Some(viewport);
        self.scale_data()
    }

    pub fn reset_alpha(&mut self) -> PlotResult<()> {
        let mut viewport = self.loaded_viewport()?;
        viewport.reset_alpha();
        self.viewport = Some(viewport);
        self.scale_data()
    }

    fn apply_viewport(
        &mut self,
        viewport: ViewportState,
        outcome: ZoomOutcome,
    ) -> PlotResult<ZoomOutcome> {
        if outcome.is_applied() {
            self.viewport = Some(viewport);
            self.scale_data()?;
        }
        Ok(outcome)
    }
}
