use serde::{Deserialize, Serialize};

use crate::core::types::is_hidden_data;
use crate::error::{PlotError, PlotResult};

/// Data-space rectangle currently mapped onto the full surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomWindow {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl ZoomWindow {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> PlotResult<Self> {
        let window = Self {
            min_x,
            max_x,
            min_y,
            max_y,
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(self) -> PlotResult<()> {
        let all_finite = self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite();
        if !all_finite || self.min_x >= self.max_x || self.min_y >= self.max_y {
            return Err(PlotError::InvalidData(format!(
                "zoom window must be finite with min < max, got x=[{}, {}] y=[{}, {}]",
                self.min_x, self.max_x, self.min_y, self.max_y
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn span_x(self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn span_y(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (
            self.min_x + self.span_x() * 0.5,
            self.min_y + self.span_y() * 0.5,
        )
    }

    /// Inclusive containment test; hidden coordinates are never contained.
    #[inline]
    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            min_y: self.min_y + dy,
            max_y: self.max_y + dy,
        }
    }

    /// Zoom factor of this window relative to `initial` (x spans only).
    #[must_use]
    pub fn zoom_factor_relative_to(self, initial: Self) -> f64 {
        initial.span_x() / self.span_x()
    }

    /// Bounding window of all non-hidden coordinates in a flat `[x0, y0, ...]`
    /// array. Degenerate axes are widened by one data unit around the value.
    pub fn from_coords(coords: &[f64]) -> PlotResult<Self> {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for pair in coords.chunks_exact(2) {
            let (x, y) = (pair[0], pair[1]);
            if is_hidden_data(x, y) {
                continue;
            }
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        if !min_x.is_finite() || !min_y.is_finite() {
            return Err(PlotError::InvalidData(
                "cannot compute bounds: every coordinate is hidden".to_owned(),
            ));
        }

        if min_x == max_x {
            min_x -= 0.5;
            max_x += 0.5;
        }
        if min_y == max_y {
            min_y -= 0.5;
            max_y += 0.5;
        }

        Self::new(min_x, max_x, min_y, max_y)
    }

    /// Grows the shorter axis so one data unit covers the same number of
    /// pixels horizontally and vertically.
    #[must_use]
    pub fn with_square_aspect(self, width: u32, height: u32) -> Self {
        let units_per_px_x = self.span_x() / f64::from(width);
        let units_per_px_y = self.span_y() / f64::from(height);
        let (cx, cy) = self.center();
        if units_per_px_x > units_per_px_y {
            let half = units_per_px_x * f64::from(height) * 0.5;
            Self {
                min_y: cy - half,
                max_y: cy + half,
                ..self
            }
        } else {
            let half = units_per_px_y * f64::from(width) * 0.5;
            Self {
                min_x: cx - half,
                max_x: cx + half,
                ..self
            }
        }
    }
}
