use std::rc::Rc;

use tracing::debug;

use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotEvent;
use crate::interaction::{DragMode, Modifiers, ViewSlot};
use crate::render::{DrawStats, Renderer};

use super::{PlotConfig, ScatterPlot, ZoomOutcome};

/// A plot and its optional split twin.
///
/// Both views always share one selection. Point data stays shared until
/// either view loads its own; while it is shared, navigation on the active
/// view is replayed on the other one.
pub struct LinkedViews<R: Renderer> {
    primary: ScatterPlot<R>,
    secondary: Option<ScatterPlot<R>>,
    active: ViewSlot,
}

impl<R: Renderer> LinkedViews<R> {
    #[must_use]
    pub fn new(primary: ScatterPlot<R>) -> Self {
        Self {
            primary,
            secondary: None,
            active: ViewSlot::Primary,
        }
    }

    /// Opens a second view on the same points, selection and window.
    pub fn split(&mut self, renderer: R, config: PlotConfig) -> PlotResult<()> {
        if self.secondary.is_some() {
            return Err(PlotError::InvalidData("views are already split".to_owned()));
        }
        let points = self.primary.loaded_points()?;
        let viewport = self.primary.loaded_viewport()?;
        let mut secondary =
            ScatterPlot::with_selection(renderer, config, self.primary.selection_handle())?;
        secondary.points = Some(points);
        secondary.viewport = Some(viewport);
        secondary.line_style = self.primary.line_style;
        secondary.show_labels = self.primary.show_labels;
        secondary.status.clone_from(&self.primary.status);
        secondary.scale_data()?;
        self.secondary = Some(secondary);
        debug!("view split");
        Ok(())
    }

    /// Closes the second view and returns it. The primary view becomes
    /// active again.
    pub fn unsplit(&mut self) -> Option<ScatterPlot<R>> {
        let secondary = self.secondary.take()?;
        if self.active == ViewSlot::Secondary {
            self.active = ViewSlot::Primary;
            self.primary.emit(PlotEvent::ActiveChanged {
                slot: ViewSlot::Primary,
            });
        }
        debug!("view unsplit");
        Some(secondary)
    }

    #[must_use]
    pub fn is_split(&self) -> bool {
        self.secondary.is_some()
    }

    /// `true` while both views read the same point data.
    #[must_use]
    pub fn shares_points(&self) -> bool {
        let Some(secondary) = &self.secondary else {
            return false;
        };
        match (&self.primary.points, &secondary.points) {
            (Some(left), Some(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }

    #[must_use]
    pub fn active_slot(&self) -> ViewSlot {
        self.active
    }

    /// Makes `slot` the active view. Returns `true` when the active view
    /// changed, which means navigation chrome moves to it.
    pub fn activate(&mut self, slot: ViewSlot) -> PlotResult<bool> {
        if slot == self.active {
            return Ok(false);
        }
        if slot == ViewSlot::Secondary && self.secondary.is_none() {
            return Err(PlotError::InvalidData(
                "cannot activate a view that was never split".to_owned(),
            ));
        }
        self.active = slot;
        self.active_mut().emit(PlotEvent::ActiveChanged { slot });
        debug!(?slot, "active view changed");
        Ok(true)
    }

    #[must_use]
    pub fn primary(&self) -> &ScatterPlot<R> {
        &self.primary
    }

    pub fn primary_mut(&mut self) -> &mut ScatterPlot<R> {
        &mut self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> Option<&ScatterPlot<R>> {
        self.secondary.as_ref()
    }

    pub fn secondary_mut(&mut self) -> Option<&mut ScatterPlot<R>> {
        self.secondary.as_mut()
    }

    #[must_use]
    pub fn active(&self) -> &ScatterPlot<R> {
        match (self.active, &self.secondary) {
            (ViewSlot::Secondary, Some(secondary)) => secondary,
            _ => &self.primary,
        }
    }

    pub fn active_mut(&mut self) -> &mut ScatterPlot<R> {
        match (self.active, &mut self.secondary) {
            (ViewSlot::Secondary, Some(secondary)) => secondary,
            _ => &mut self.primary,
        }
    }

    pub fn zoom_by(&mut self, factor: f64, pivot: Option<(f64, f64)>) -> PlotResult<ZoomOutcome> {
        let outcome = self.active_mut().zoom_by(factor, pivot)?;
        self.mirror_outcome(outcome)?;
        Ok(outcome)
    }

    pub fn zoom_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> PlotResult<ZoomOutcome> {
        let outcome = self.active_mut().zoom_to(x1, y1, x2, y2)?;
        self.mirror_outcome(outcome)?;
        Ok(outcome)
    }

    pub fn zoom_100(&mut self) -> PlotResult<()> {
        self.active_mut().zoom_100()?;
        self.mirror(ScatterPlot::zoom_100)
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) -> PlotResult<()> {
        self.active_mut().move_by(dx, dy)?;
        self.mirror_window()
    }

    pub fn move_percent(&mut self, fx: f64, fy: f64) -> PlotResult<()> {
        self.active_mut().move_percent(fx, fy)?;
        self.mirror_window()
    }

    pub fn set_drag_mode(&mut self, mode: DragMode) -> PlotResult<()> {
        self.active_mut().set_drag_mode(mode);
        self.mirror(|view| {
            view.set_drag_mode(mode);
            Ok(())
        })
    }

    /// Wheel event on `slot`. Events for the inactive view are ignored and
    /// return `None`.
    pub fn wheel(
        &mut self,
        slot: ViewSlot,
        x: f64,
        y: f64,
        delta_y: f64,
        modifiers: Modifiers,
    ) -> PlotResult<Option<ZoomOutcome>> {
        if slot != self.active {
            return Ok(None);
        }
        let outcome = self.active_mut().wheel(x, y, delta_y, modifiers)?;
        if let ZoomOutcome::Applied(window) = outcome {
            self.mirror(|view| {
                view.set_zoom_window(window)?;
                view.draw().map(drop)
            })?;
        }
        Ok(Some(outcome))
    }

    /// Draws both views. A view sharing points re-projects first since the
    /// other view may have hidden or restored points.
    pub fn draw(&mut self) -> PlotResult<(DrawStats, Option<DrawStats>)> {
        let shared = self.shares_points();
        if shared {
            self.primary.scale_data()?;
        }
        let primary = self.primary.draw()?;
        let secondary = match self.secondary.as_mut() {
            Some(view) => {
                if shared {
                    view.scale_data()?;
                }
                Some(view.draw()?)
            }
            None => None,
        };
        Ok((primary, secondary))
    }

    /// Copies an applied zoom window to the inactive view. The window is
    /// mirrored in data space so views of different sizes stay aligned.
    fn mirror_outcome(&mut self, outcome: ZoomOutcome) -> PlotResult<()> {
        match outcome {
            ZoomOutcome::Applied(window) => {
                self.mirror(|view| view.set_zoom_window(window).map(drop))
            }
            ZoomOutcome::Rejected => Ok(()),
        }
    }

    fn mirror_window(&mut self) -> PlotResult<()> {
        let Some(window) = self.active().window() else {
            return Ok(());
        };
        self.mirror(|view| view.set_zoom_window(window).map(drop))
    }

    /// Runs `operation` on the inactive view while points are shared.
    fn mirror(
        &mut self,
        operation: impl FnOnce(&mut ScatterPlot<R>) -> PlotResult<()>,
    ) -> PlotResult<()> {
        if !self.shares_points() {
            return Ok(());
        }
        let other = match (self.active, self.secondary.as_mut()) {
            (ViewSlot::Primary, Some(secondary)) => secondary,
            (ViewSlot::Secondary, Some(_)) => &mut self.primary,
            (_, None) => return Ok(()),
        };
        operation(other)
    }
}
