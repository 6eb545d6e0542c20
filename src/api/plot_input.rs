use serde::{Deserialize, Serialize};

use crate::core::{HIDDEN_DATA_COORD, LabelAnchor, LineSegment, Palette, PointData, ZoomWindow};
use crate::error::{PlotError, PlotResult};
use crate::render::LineStyle;

/// `[x, y, text]` label triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEntry(pub f64, pub f64, pub String);

impl From<LabelEntry> for LabelAnchor {
    fn from(entry: LabelEntry) -> Self {
        LabelAnchor::new(entry.0, entry.1, entry.2)
    }
}

/// `[x1, y1, x2, y2]` or `[x1, y1, x2, y2, label]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineEntry {
    Labeled(f64, f64, f64, f64, String),
    Plain(f64, f64, f64, f64),
}

impl From<LineEntry> for LineSegment {
    fn from(entry: LineEntry) -> Self {
        match entry {
            LineEntry::Labeled(x1, y1, x2, y2, label) => {
                LineSegment::new(x1, y1, x2, y2).with_label(label)
            }
            LineEntry::Plain(x1, y1, x2, y2) => LineSegment::new(x1, y1, x2, y2),
        }
    }
}

/// Optional data range descriptor. Missing limits are computed from the
/// coordinates; `use_raw` pins both minimums to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotBounds {
    #[serde(default)]
    pub min_x: Option<f64>,
    #[serde(default)]
    pub max_x: Option<f64>,
    #[serde(default)]
    pub min_y: Option<f64>,
    #[serde(default)]
    pub max_y: Option<f64>,
    #[serde(default)]
    pub use_raw: bool,
}

impl PlotBounds {
    #[must_use]
    pub fn explicit(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x: Some(min_x),
            max_x: Some(max_x),
            min_y: Some(min_y),
            max_y: Some(max_y),
            use_raw: false,
        }
    }

    /// Resolves the initial zoom window for `coords`.
    pub fn resolve(self, coords: &[f64]) -> PlotResult<ZoomWindow> {
        let window = match (self.min_x, self.max_x, self.min_y, self.max_y) {
            (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) => {
                ZoomWindow::new(min_x, max_x, min_y, max_y)?
            }
            _ => ZoomWindow::from_coords(coords)?,
        };
        if self.use_raw {
            return ZoomWindow::new(0.0, window.max_x, 0.0, window.max_y);
        }
        Ok(window)
    }
}

/// JSON payload supplied by a data loader.
///
/// `coords` is flat `[x0, y0, x1, y1, ...]`; `null` marks a hidden point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotInput {
    pub coords: Vec<Option<f64>>,
    #[serde(default)]
    pub labels: Vec<LabelEntry>,
    #[serde(default)]
    pub annotations: Vec<LabelEntry>,
    #[serde(default)]
    pub bounds: Option<PlotBounds>,
    #[serde(default)]
    pub lines: Vec<LineEntry>,
    #[serde(default)]
    pub line_style: Option<LineStyle>,
    pub palette: Vec<String>,
    pub colors: Vec<u8>,
}

/// Validated pieces of a [`PlotInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInputParts {
    pub data: PointData,
    pub init_window: ZoomWindow,
    pub line_style: Option<LineStyle>,
}

impl PlotInput {
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse plot input: {e}")))
    }

    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize plot input: {e}")))
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    /// Validates the payload and converts it into point data plus the
    /// initial zoom window. A pair with any `null` member is hidden.
    pub fn into_parts(self) -> PlotResult<PlotInputParts> {
        if let Some(style) = self.line_style {
            style.validate()?;
        }

        let mut coords = Vec::with_capacity(self.coords.len());
        for pair in self.coords.chunks(2) {
            match pair {
                [Some(x), Some(y)] => {
                    coords.push(*x);
                    coords.push(*y);
                }
                [_, _] => {
                    coords.push(HIDDEN_DATA_COORD);
                    coords.push(HIDDEN_DATA_COORD);
                }
                _ => {
                    return Err(PlotError::InvalidData(format!(
                        "coordinate array length must be even, got {}",
                        self.coords.len()
                    )));
                }
            }
        }

        let palette = Palette::from_hex(&self.palette);
        let data = PointData::new(coords, self.colors, palette)?
            .with_labels(self.labels.into_iter().map(LabelAnchor::from).collect())
            .with_annotations(self.annotations.into_iter().map(LabelAnchor::from).collect())
            .with_lines(self.lines.into_iter().map(LineSegment::from).collect());
        let init_window = self.bounds.unwrap_or_default().resolve(data.coords())?;

        Ok(PlotInputParts {
            data,
            init_window,
            line_style: self.line_style,
        })
    }
}
