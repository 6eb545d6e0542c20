use crate::error::{PlotError, PlotResult};
use crate::render::Renderer;

use super::{ScatterPlot, ViewSnapshot};

impl<R: Renderer> ScatterPlot<R> {
    /// Captures the current view state.
    pub fn snapshot(&self) -> PlotResult<ViewSnapshot> {
        let viewport = self.loaded_viewport()?;
        Ok(ViewSnapshot {
            window: viewport.window(),
            init_window: viewport.init_window(),
            zoom_factor: viewport.zoom_factor(),
            radius: viewport.radius(),
            alpha: viewport.alpha(),
            drag_mode: self.interaction.drag_mode(),
            selection: self.selection(),
            visible_count: self.visible_count(),
            hidden_count: self.point_count() - self.unhidden_count(),
            emphasis: self.emphasis,
            show_labels: self.show_labels,
            status: self.status.clone(),
            last_render_path: self.last_path,
            last_stats: self.last_stats,
        })
    }

    /// Snapshot as pretty JSON for fixture comparisons.
    pub fn snapshot_json_pretty(&self) -> PlotResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }
}
