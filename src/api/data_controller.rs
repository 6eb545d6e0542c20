use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::core::{LabelAnchor, LineSegment, Palette, PointData, ZoomWindow};
use crate::error::PlotResult;
use crate::render::{LineStyle, Renderer};

use super::{PlotInput, ScatterPlot, ViewportState, guess_radius};

impl<R: Renderer> ScatterPlot<R> {
    /// Validates and loads a JSON input payload.
    pub fn load_input(&mut self, input: PlotInput) -> PlotResult<()> {
        let parts = input.into_parts()?;
        self.load_points(parts.data, Some(parts.init_window))?;
        if let Some(style) = parts.line_style {
            self.line_style = style;
        }
        Ok(())
    }

    /// Replaces the dataset and resets the view to `init_window` (or the
    /// data bounds). Clears selection and emphasis. A plot that was sharing
    /// points with a linked view gets its own copy from here on.
    ///
    /// Base radius and alpha carry over from a previous dataset so
    /// switching layouts keeps the look the user tuned.
    pub fn load_points(&mut self, data: PointData, init_window: Option<ZoomWindow>) -> PlotResult<()> {
        let surface = self.config.surface;
        let mut window = match init_window {
            Some(window) => window,
            None => ZoomWindow::from_coords(data.coords())?,
        };
        if self.config.square_aspect {
            window = window.with_square_aspect(surface.width, surface.height);
        }

        let (base_radius, base_alpha) = match &self.viewport {
            Some(previous) => (previous.base_radius(), previous.base_alpha()),
            None => (
                self.config
                    .radius
                    .unwrap_or_else(|| guess_radius(data.point_count())),
                self.config.alpha,
            ),
        };
        let viewport = ViewportState::new(window, base_radius, base_alpha, self.config.zoom_limits)?;

        let unhidden = data.unhidden_count();
        debug!(
            points = data.point_count(),
            unhidden,
            base_radius,
            "plot data loaded"
        );
        self.points = Some(Rc::new(RefCell::new(data)));
        self.selection.borrow_mut().clear();
        self.viewport = Some(viewport);
        self.emphasis = None;
        self.pan_snapshot = None;
        self.interaction.end_press();
        self.status = format!("{unhidden} visible {}s loaded", self.config.sample_name);
        self.scale_data()
    }

    /// Recolors every point. Emphasis is dropped when its category no longer
    /// exists in the new palette.
    pub fn set_colors(&mut self, colors: Vec<u8>, palette: Palette) -> PlotResult<()> {
        let points = self.loaded_points()?;
        points.borrow_mut().set_colors(colors, palette)?;
        let palette_len = points.borrow().palette().len();
        if self
            .emphasis
            .is_some_and(|category| usize::from(category) >= palette_len)
        {
            warn!(palette_len, "emphasized category dropped after palette change");
            self.emphasis = None;
        }
        self.invalidated = true;
        Ok(())
    }

    /// Replaces cluster labels. Returns `true` when labels existed before.
    pub fn set_labels(&mut self, labels: Vec<LabelAnchor>) -> PlotResult<bool> {
        let points = self.loaded_points()?;
        let had_labels = !points.borrow().labels().is_empty();
        points.borrow_mut().set_labels(labels);
        self.scale_data()?;
        Ok(had_labels)
    }

    /// Replaces annotation texts drawn next to the labels.
    pub fn set_annotations(&mut self, annotations: Vec<LabelAnchor>) -> PlotResult<()> {
        let points = self.loaded_points()?;
        points.borrow_mut().set_annotations(annotations);
        self.scale_data()
    }

    pub fn set_lines(&mut self, lines: Vec<LineSegment>) -> PlotResult<()> {
        let points = self.loaded_points()?;
        points.borrow_mut().set_lines(lines);
        self.hovered_line = None;
        self.scale_data()
    }

    pub fn set_line_style(&mut self, style: LineStyle) -> PlotResult<()> {
        style.validate()?;
        self.line_style = style;
        self.invalidated = true;
        Ok(())
    }
}
