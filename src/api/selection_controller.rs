use tracing::debug;

use crate::core::PixelRect;
use crate::error::PlotResult;
use crate::extensions::SelectionOrigin;
use crate::render::Renderer;

use super::ScatterPlot;

impl<R: Renderer> ScatterPlot<R> {
    /// Replaces the selection. Out-of-range ids reject the whole call.
    pub fn select_set(&mut self, ids: &[u32]) -> PlotResult<()> {
        self.select_set_from(ids, SelectionOrigin::Programmatic)
    }

    pub(super) fn select_set_from(&mut self, ids: &[u32], origin: SelectionOrigin) -> PlotResult<()> {
        let points = self.loaded_points()?;
        self.selection.borrow_mut().set(ids, &points.borrow())?;
        self.emit_selection_changed(origin);
        Ok(())
    }

    /// Adds `index` when absent, removes it when present. Returns the new
    /// membership.
    pub fn select_toggle(&mut self, index: u32) -> PlotResult<bool> {
        let points = self.loaded_points()?;
        let selected = self.selection.borrow_mut().toggle(index, &points.borrow())?;
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(selected)
    }

    pub fn select_all(&mut self) -> PlotResult<()> {
        let points = self.loaded_points()?;
        self.selection.borrow_mut().select_all(&points.borrow());
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(())
    }

    /// Adds every point inside the current window.
    pub fn select_visible(&mut self) -> PlotResult<usize> {
        self.loaded_points()?;
        let added = self.selection.borrow_mut().select_visible(&self.pixels);
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(added)
    }

    pub fn select_by_color(&mut self, color: u8) -> PlotResult<usize> {
        let points = self.loaded_points()?;
        let matched = self
            .selection
            .borrow_mut()
            .select_by_color(color, &points.borrow());
        debug!(color, matched, "points added to selection by color");
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(matched)
    }

    pub fn unselect_by_color(&mut self, color: u8) -> PlotResult<usize> {
        let points = self.loaded_points()?;
        let removed = self
            .selection
            .borrow_mut()
            .unselect_by_color(color, &points.borrow());
        debug!(color, removed, "points removed from selection by color");
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(removed)
    }

    /// Adds every visible point inside the pixel rectangle spanned by two
    /// corners, inclusive.
    pub fn select_in_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> PlotResult<usize> {
        self.select_in_rect_from(PixelRect::from_corners(x1, y1, x2, y2), SelectionOrigin::Programmatic)
    }

    pub(super) fn select_in_rect_from(
        &mut self,
        rect: PixelRect,
        origin: SelectionOrigin,
    ) -> PlotResult<usize> {
        self.loaded_points()?;
        let added = self
            .selection
            .borrow_mut()
            .select_in_rect(rect, &self.pixels);
        debug!(?rect, added, "rectangle selection");
        self.emit_selection_changed(origin);
        Ok(added)
    }

    pub fn select_invert(&mut self) -> PlotResult<()> {
        let points = self.loaded_points()?;
        self.selection.borrow_mut().invert(&points.borrow());
        self.emit_selection_changed(SelectionOrigin::Programmatic);
        Ok(())
    }

    pub fn select_clear(&mut self) -> PlotResult<()> {
        self.select_clear_from(SelectionOrigin::Programmatic)
    }

    pub(super) fn select_clear_from(&mut self, origin: SelectionOrigin) -> PlotResult<()> {
        self.loaded_points()?;
        self.selection.borrow_mut().clear();
        self.emit_selection_cleared(origin);
        Ok(())
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.borrow().is_empty()
    }

    /// Hides every selected point and clears the selection. Returns how many
    /// points were hidden.
    pub fn hide_selected(&mut self) -> PlotResult<usize> {
        let points = self.loaded_points()?;
        let hidden = {
            let selection = self.selection.borrow();
            points
                .borrow_mut()
                .hide_where(|index| selection.contains(index as u32))
        };
        self.selection.borrow_mut().clear();
        self.scale_data()?;
        self.emit_selection_changed(SelectionOrigin::Visibility);
        Ok(hidden)
    }

    /// Hides every point outside the selection. Does nothing while the
    /// selection is empty.
    pub fn only_show_selected(&mut self) -> PlotResult<usize> {
        let points = self.loaded_points()?;
        if self.selection.borrow().is_empty() {
            return Ok(0);
        }
        let hidden = {
            let selection = self.selection.borrow();
            points
                .borrow_mut()
                .hide_where(|index| !selection.contains(index as u32))
        };
        self.scale_data()?;
        self.emit_selection_changed(SelectionOrigin::Visibility);
        Ok(hidden)
    }

    /// Restores every hidden point. Returns `false` when nothing was hidden.
    pub fn unhide_all(&mut self) -> PlotResult<bool> {
        let points = self.loaded_points()?;
        let restored = points.borrow_mut().unhide_all();
        if restored {
            debug!("hidden points restored");
            self.scale_data()?;
        }
        Ok(restored)
    }
}
