//! Data-space to pixel-space projection.
//!
//! Points and labels are mapped with a border margin so glyphs are not cut
//! off at the surface edge; everything outside the zoom window collapses to
//! the pixel sentinel instead of being clipped. Lines use the whole surface
//! and are clipped at the window edges so partially visible trajectories
//! still render.

use tracing::trace;

use crate::core::types::{
    DataPoint, HIDDEN_PIXEL, LabelAnchor, LineSegment, SurfaceSize, is_hidden_data,
    is_hidden_pixel,
};
use crate::core::zoom_window::ZoomWindow;
use crate::error::PlotResult;

/// Linear mapping between one zoom window and one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    window: ZoomWindow,
    surface: SurfaceSize,
    border: u32,
    x_mult: f64,
    y_mult: f64,
    inner_height: f64,
}

impl Projection {
    /// Builds the mapping. `border` is clamped so at least one pixel of
    /// drawable area remains on each axis.
    pub fn new(window: ZoomWindow, surface: SurfaceSize, border: u32) -> PlotResult<Self> {
        window.validate()?;
        surface.validate()?;

        let max_border = (surface.width.min(surface.height) - 1) / 2;
        let border = border.min(max_border);
        let inner_width = f64::from(surface.width - 2 * border);
        let inner_height = f64::from(surface.height - 2 * border);

        Ok(Self {
            window,
            surface,
            border,
            x_mult: inner_width / window.span_x(),
            y_mult: inner_height / window.span_y(),
            inner_height,
        })
    }

    #[must_use]
    pub fn window(&self) -> ZoomWindow {
        self.window
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Pixel position of a data coordinate, `None` when hidden or outside the
    /// window.
    #[inline]
    #[must_use]
    pub fn project(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        if is_hidden_data(x, y) || !self.window.contains(x, y) {
            return None;
        }
        let border = f64::from(self.border);
        let px = ((x - self.window.min_x) * self.x_mult).round() + border;
        let py = self.inner_height - ((y - self.window.min_y) * self.y_mult).round() + border;
        Some((px as u16, py as u16))
    }

    /// Inverse of [`Projection::project`] for an arbitrary surface pixel.
    #[must_use]
    pub fn unproject(&self, px: f64, py: f64) -> DataPoint {
        let border = f64::from(self.border);
        let x = self.window.min_x + (px - border) / self.x_mult;
        let y = self.window.min_y + (self.inner_height - (py - border)) / self.y_mult;
        DataPoint::new(x, y)
    }

    /// Size of one pixel in data units, per axis.
    #[must_use]
    pub fn data_per_pixel(&self) -> (f64, f64) {
        (1.0 / self.x_mult, 1.0 / self.y_mult)
    }
}

/// Pixel coordinates for every point, `(HIDDEN_PIXEL, HIDDEN_PIXEL)` when the
/// point is not visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelCoords {
    data: Vec<u16>,
}

impl PixelCoords {
    #[must_use]
    pub fn from_raw(data: Vec<u16>) -> Self {
        debug_assert!(data.len() % 2 == 0);
        Self { data }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u16] {
        &self.data
    }

    /// Pixel position of point `index`, `None` when hidden or out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(u16, u16)> {
        let x = *self.data.get(2 * index)?;
        let y = *self.data.get(2 * index + 1)?;
        if is_hidden_pixel(x, y) {
            None
        } else {
            Some((x, y))
        }
    }

    /// Iterates `(index, x, y)` over visible points in index order.
    pub fn iter_visible(&self) -> impl Iterator<Item = (usize, u16, u16)> + '_ {
        self.data
            .chunks_exact(2)
            .enumerate()
            .filter(|(_, pair)| !is_hidden_pixel(pair[0], pair[1]))
            .map(|(index, pair)| (index, pair[0], pair[1]))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.iter_visible().count()
    }
}

/// Projects a flat `[x0, y0, x1, y1, ...]` array.
#[must_use]
pub fn project_points(coords: &[f64], projection: &Projection) -> PixelCoords {
    let mut data = vec![HIDDEN_PIXEL; coords.len() - coords.len() % 2];
    for (pair, out) in coords.chunks_exact(2).zip(data.chunks_exact_mut(2)) {
        if let Some((px, py)) = projection.project(pair[0], pair[1]) {
            out[0] = px;
            out[1] = py;
        }
    }
    trace!(points = data.len() / 2, "projected points");
    PixelCoords { data }
}

/// A label positioned in pixel space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedLabel {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Projects labels; entries outside the window are `None` so indices stay
/// aligned with the input.
#[must_use]
pub fn project_labels(labels: &[LabelAnchor], projection: &Projection) -> Vec<Option<ProjectedLabel>> {
    labels
        .iter()
        .map(|label| {
            projection
                .project(label.x, label.y)
                .map(|(x, y)| ProjectedLabel {
                    x: i32::from(x),
                    y: i32::from(y),
                    text: label.text.clone(),
                })
        })
        .collect()
}

/// A line clipped to the window, in whole-surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectedLine {
    /// Index of the source segment.
    pub source: usize,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Projects line segments onto the full surface (no border). Endpoints
/// outside the window are clamped to its edges; segments with both ends
/// outside are dropped.
#[must_use]
pub fn project_lines(
    lines: &[LineSegment],
    window: ZoomWindow,
    surface: SurfaceSize,
) -> Vec<ProjectedLine> {
    let width = f64::from(surface.width);
    let height = f64::from(surface.height);
    let x_mult = width / window.span_x();
    let y_mult = height / window.span_y();

    let to_px = |x: f64| ((x - window.min_x) * x_mult).round() as i32;
    let to_py = |y: f64| (height - ((y - window.min_y) * y_mult).round()) as i32;

    lines
        .iter()
        .enumerate()
        .filter_map(|(source, line)| {
            let start_visible = window.contains(line.x1, line.y1);
            let end_visible = window.contains(line.x2, line.y2);
            if !start_visible && !end_visible {
                return None;
            }
            let (x1, y1) = clamp_to_window(line.x1, line.y1, window);
            let (x2, y2) = clamp_to_window(line.x2, line.y2, window);
            Some(ProjectedLine {
                source,
                x1: to_px(x1),
                y1: to_py(y1),
                x2: to_px(x2),
                y2: to_py(y2),
            })
        })
        .collect()
}

fn clamp_to_window(x: f64, y: f64, window: ZoomWindow) -> (f64, f64) {
    (
        x.clamp(window.min_x, window.max_x),
        y.clamp(window.min_y, window.max_y),
    )
}

#[cfg(test)]
mod tests {
    use super::{Projection, project_lines};
    use crate::core::{LineSegment, SurfaceSize, ZoomWindow};

    #[test]
    fn border_is_clamped_on_tiny_surfaces() {
        let window = ZoomWindow::new(0.0, 1.0, 0.0, 1.0).expect("window");
        let projection = Projection::new(window, SurfaceSize::new(9, 5), 40).expect("projection");
        assert_eq!(projection.border(), 2);
    }

    #[test]
    fn partially_visible_line_is_clamped_to_the_window_edge() {
        let window = ZoomWindow::new(0.0, 10.0, 0.0, 10.0).expect("window");
        let lines = vec![
            LineSegment::new(5.0, 5.0, 20.0, 5.0),
            LineSegment::new(-5.0, -5.0, -1.0, -1.0),
        ];
        let projected = project_lines(&lines, window, SurfaceSize::new(100, 100));
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].source, 0);
        assert_eq!((projected[0].x1, projected[0].y1), (50, 50));
        assert_eq!((projected[0].x2, projected[0].y2), (100, 50));
    }
}
