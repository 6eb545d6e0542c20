use std::time::Duration;

use tracing::{debug, trace};

use crate::core::PixelRect;
use crate::error::PlotResult;
use crate::extensions::{PlotEvent, SelectionOrigin};
use crate::interaction::{DragIntent, Marquee, Modifiers};
use crate::render::Renderer;

use super::{PointHits, ScatterPlot, ZoomOutcome};

const WHEEL_SPIN: f64 = 0.1;
const WHEEL_SPIN_CTRL: f64 = 0.08;
const DOUBLE_CLICK_ZOOM: f64 = 1.33;

/// Zoom factor for one wheel step; ctrl slows the spin down.
///
/// Scrolling down by `delta_y` grows the span to `span * (1 + spin * delta_y)`;
/// scrolling up shrinks it by the same ratio, so the factor stays positive
/// for any delta.
#[must_use]
pub fn wheel_zoom_factor(delta_y: f64, modifiers: Modifiers) -> f64 {
    let spin = if modifiers.ctrl { WHEEL_SPIN_CTRL } else { WHEEL_SPIN };
    let step = 1.0 + spin * delta_y.abs();
    if delta_y > 0.0 { 1.0 / step } else { step }
}

impl<R: Renderer> ScatterPlot<R> {
    /// Primary button pressed at `(x, y)`. Modifiers decide the drag intent
    /// for the whole gesture.
    pub fn pointer_down(&mut self, x: f64, y: f64, modifiers: Modifiers) -> PlotResult<()> {
        self.loaded_viewport()?;
        let intent = DragIntent::resolve(self.interaction.drag_mode(), modifiers);
        self.interaction.begin_press(x, y, intent);
        self.interaction.hover_timer().cancel();
        if intent == DragIntent::Pan {
            self.pan_start()?;
        }
        trace!(x, y, ?intent, "pointer down");
        Ok(())
    }

    /// Pointer moved. Without a press this updates hover state; with one it
    /// grows the marquee or previews the pan.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let Some(press) = self.interaction.press() else {
            self.interaction.on_pointer_move(x, y);
            self.update_label_hover(x, y);
            self.update_line_hover(x, y);
            return Ok(());
        };
        match press.intent {
            DragIntent::Select { .. } => {
                self.interaction
                    .set_marquee(Some(Marquee::from_drag(press.x, press.y, x, y, None)));
            }
            DragIntent::Zoom => {
                let aspect = self.surface_aspect();
                self.interaction
                    .set_marquee(Some(Marquee::from_drag(press.x, press.y, x, y, Some(aspect))));
            }
            DragIntent::Pan => {
                let offset = (press.x - x, press.y - y);
                self.interaction.set_pan_offset(offset);
                self.pan_by(offset.0, offset.1)?;
            }
        }
        Ok(())
    }

    /// Primary button released. A release at the press position is a click;
    /// anything else completes the drag. Redraws afterwards.
    ///
    /// The second click of a pair on the same pixel first zooms around the
    /// surface center, then is handled like any other click.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> PlotResult<()> {
        let Some(press) = self.interaction.end_press() else {
            return Ok(());
        };
        if press.x == x && press.y == y {
            self.pan_snapshot = None;
            self.handle_click(x, y)?;
            self.draw()?;
            return Ok(());
        }

        match press.intent {
            DragIntent::Zoom => {
                let (x1, y1, x2, y2) =
                    Marquee::from_drag(press.x, press.y, x, y, Some(self.surface_aspect())).corners();
                self.zoom_to(x1, y1, x2, y2)?;
                if let Some(mode) = self.interaction.restore_previous_mode() {
                    debug!(?mode, "drag mode restored after zoom");
                }
            }
            DragIntent::Select { additive } => {
                if !additive {
                    self.selection.borrow_mut().clear();
                }
                let rect = PixelRect::from_corners(
                    press.x.round() as i32,
                    press.y.round() as i32,
                    x.round() as i32,
                    y.round() as i32,
                );
                self.select_in_rect_from(rect, SelectionOrigin::Marquee)?;
            }
            DragIntent::Pan => {
                return self.pan_end(press.x - x, press.y - y);
            }
        }
        self.draw()?;
        Ok(())
    }

    /// Wheel zoom centered at the pointer. Positive `delta_y` (scrolling
    /// down) zooms out.
    pub fn wheel(&mut self, x: f64, y: f64, delta_y: f64, modifiers: Modifiers) -> PlotResult<ZoomOutcome> {
        let outcome = self.zoom_by(wheel_zoom_factor(delta_y, modifiers), Some((x, y)))?;
        if outcome.is_applied() {
            self.draw()?;
        }
        Ok(outcome)
    }

    /// Advances the hover countdown. When it fires, hit-tests the resting
    /// pointer and notifies observers; the hits are returned.
    pub fn advance_hover_timer(&mut self, elapsed: Duration) -> Option<PointHits> {
        if self.interaction.press().is_some() || !self.is_loaded() {
            return None;
        }
        let (x, y) = self.interaction.hover_timer().advance(elapsed)?;
        let hits = self.points_at(x, y);
        if hits.is_empty() && self.selection.borrow().is_empty() {
            self.emit(PlotEvent::NoPointHover);
        } else {
            self.emit(PlotEvent::PointHover {
                ids: hits.to_vec(),
            });
        }
        Some(hits)
    }

    /// Marquee being dragged, if any.
    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        self.interaction.marquee()
    }

    #[must_use]
    pub fn hovered_label(&self) -> Option<usize> {
        self.hovered_label
    }

    /// Last pointer position seen without a press.
    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        self.interaction.cursor()
    }

    fn handle_click(&mut self, x: f64, y: f64) -> PlotResult<()> {
        if self.interaction.register_click(x, y) {
            debug!(x, y, "double click zoom");
            self.zoom_by(DOUBLE_CLICK_ZOOM, None)?;
        }
        if let Some((index, text)) = self.label_at(x, y) {
            self.emit(PlotEvent::LabelClick { index, text });
            return Ok(());
        }
        let hits = self.points_at(x, y);
        if hits.is_empty() {
            return self.select_clear_from(SelectionOrigin::BackgroundClick);
        }
        self.select_set_from(&hits, SelectionOrigin::PointClick)?;
        self.emit(PlotEvent::PointClick { ids: hits.to_vec() });
        Ok(())
    }

    fn update_label_hover(&mut self, x: f64, y: f64) {
        let hit = self.label_at(x, y);
        let index = hit.as_ref().map(|(index, _)| *index);
        if index == self.hovered_label {
            return;
        }
        self.hovered_label = index;
        match hit {
            Some((index, text)) => self.emit(PlotEvent::LabelHover { index, text }),
            None => self.emit(PlotEvent::NoLabelHover),
        }
    }

    fn update_line_hover(&mut self, x: f64, y: f64) {
        let index = self.line_index_at(x, y);
        if index == self.hovered_line {
            return;
        }
        self.hovered_line = index;
        let label = index.and_then(|_| self.line_at(x, y));
        self.emit(PlotEvent::LineHover { label });
    }

    fn surface_aspect(&self) -> f64 {
        f64::from(self.config.surface.width) / f64::from(self.config.surface.height)
    }
}
