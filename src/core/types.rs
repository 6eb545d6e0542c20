use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

/// Data-space marker for a point that exists but is never drawn or hit-tested.
pub const HIDDEN_DATA_COORD: f64 = f64::NAN;

/// Pixel-space marker for a point outside the zoom window or hidden.
pub const HIDDEN_PIXEL: u16 = u16::MAX;

/// Returns `true` when a data coordinate pair is the hidden sentinel.
#[inline]
#[must_use]
pub fn is_hidden_data(x: f64, y: f64) -> bool {
    x.is_nan() && y.is_nan()
}

/// Returns `true` when a pixel coordinate pair is the hidden sentinel.
#[inline]
#[must_use]
pub fn is_hidden_pixel(x: u16, y: u16) -> bool {
    x == HIDDEN_PIXEL && y == HIDDEN_PIXEL
}

/// Size of the raster surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Non-empty and addressable with 16-bit pixel coordinates.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0
            && self.height > 0
            && self.width < u32::from(HIDDEN_PIXEL)
            && self.height < u32::from(HIDDEN_PIXEL)
    }

    pub fn validate(self) -> PlotResult<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PlotError::InvalidSurface {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[must_use]
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_hidden(self) -> bool {
        is_hidden_data(self.x, self.y)
    }
}

/// Text anchored at a data-space position (cluster label or annotation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl LabelAnchor {
    #[must_use]
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Trajectory segment in data space with an optional hover label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl LineSegment {
    #[must_use]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
