use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::{PlotError, PlotResult};
use crate::interaction::DragMode;
use crate::render::{DrawMode, LineStyle};

/// Bounds for the zoom factor relative to the initial window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min_zoom: 0.01,
            max_zoom: 1500.0,
        }
    }
}

impl ZoomLimits {
    #[must_use]
    pub fn allows(self, zoom_factor: f64) -> bool {
        zoom_factor.is_finite() && zoom_factor >= self.min_zoom && zoom_factor <= self.max_zoom
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.min_zoom.is_finite()
            || !self.max_zoom.is_finite()
            || self.min_zoom <= 0.0
            || self.min_zoom >= self.max_zoom
        {
            return Err(PlotError::InvalidData(format!(
                "zoom limits must be finite with 0 < min < max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

/// Public plot bootstrap configuration.
///
/// Serializable so hosts can keep plot setup next to their dataset
/// descriptions instead of wiring every knob by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub surface: SurfaceSize,
    /// Base circle radius at 100 % zoom. `None` picks one from the point
    /// count on the first load.
    #[serde(default)]
    pub radius: Option<u32>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Singular noun used in status lines ("cell", "nucleus", ...).
    #[serde(default = "default_sample_name")]
    pub sample_name: String,
    #[serde(default = "default_hover_delay_ms")]
    pub hover_delay_ms: u64,
    #[serde(default)]
    pub zoom_limits: ZoomLimits,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    /// Padding around label text in the hit box.
    #[serde(default = "default_label_margin_px")]
    pub label_margin_px: f64,
    #[serde(default)]
    pub line_style: LineStyle,
    #[serde(default)]
    pub drag_mode: DragMode,
    #[serde(default)]
    pub draw_mode: DrawMode,
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
    /// Grow the shorter axis of the initial window so both axes use the
    /// same data units per pixel.
    #[serde(default)]
    pub square_aspect: bool,
    #[serde(default = "default_legend_width_px")]
    pub legend_width_px: u32,
}

impl PlotConfig {
    /// Creates a config with defaults for everything but the surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: SurfaceSize::new(width, height),
            radius: None,
            alpha: default_alpha(),
            sample_name: default_sample_name(),
            hover_delay_ms: default_hover_delay_ms(),
            zoom_limits: ZoomLimits::default(),
            font_size_px: default_font_size_px(),
            label_margin_px: default_label_margin_px(),
            line_style: LineStyle::default(),
            drag_mode: DragMode::default(),
            draw_mode: DrawMode::default(),
            show_labels: default_show_labels(),
            square_aspect: false,
            legend_width_px: default_legend_width_px(),
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = Some(radius);
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_sample_name(mut self, sample_name: impl Into<String>) -> Self {
        self.sample_name = sample_name.into();
        self
    }

    #[must_use]
    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    #[must_use]
    pub fn with_drag_mode(mut self, drag_mode: DragMode) -> Self {
        self.drag_mode = drag_mode;
        self
    }

    #[must_use]
    pub fn hover_delay(&self) -> Duration {
        Duration::from_millis(self.hover_delay_ms)
    }

    pub fn validate(&self) -> PlotResult<()> {
        self.surface.validate()?;
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(PlotError::InvalidData(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.label_margin_px.is_finite() || self.label_margin_px < 0.0 {
            return Err(PlotError::InvalidData(
                "label margin must be finite and >= 0".to_owned(),
            ));
        }
        self.zoom_limits.validate()?;
        self.line_style.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> PlotResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_alpha() -> f64 {
    0.3
}

fn default_sample_name() -> String {
    "cell".to_owned()
}

fn default_hover_delay_ms() -> u64 {
    130
}

fn default_font_size_px() -> f64 {
    16.0
}

fn default_label_margin_px() -> f64 {
    1.0
}

fn default_show_labels() -> bool {
    true
}

fn default_legend_width_px() -> u32 {
    250
}
