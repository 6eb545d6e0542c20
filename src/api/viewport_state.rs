use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::ZoomWindow;
use crate::error::{PlotError, PlotResult};

use super::ZoomLimits;

/// Radius used in place of a zero base radius when scaling with zoom.
const ZERO_BASE_RADIUS: f64 = 0.7;
const MAX_DERIVED_ALPHA: f64 = 0.8;
/// Upper bound for the zoom-derived radius; keeps sprite tiles bounded.
pub const MAX_DERIVED_RADIUS: u32 = 128;
/// Range of the point size multiplier.
pub const RADIUS_MULTIPLIER_RANGE: (f64, f64) = (1.0 / 3.0, 3.0);
/// Range of the opacity multiplier.
pub const ALPHA_MULTIPLIER_RANGE: (f64, f64) = (0.15, 1.8);

/// Result of a zoom request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoomOutcome {
    Applied(ZoomWindow),
    /// The request would leave the allowed zoom range or degenerate the
    /// window; nothing changed.
    Rejected,
}

impl ZoomOutcome {
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub fn window(self) -> Option<ZoomWindow> {
        match self {
            Self::Applied(window) => Some(window),
            Self::Rejected => None,
        }
    }
}

/// Initial radius for a dataset of `point_count` points.
#[must_use]
pub fn guess_radius(point_count: usize) -> u32 {
    match point_count {
        n if n > 50_000 => 0,
        n if n > 10_000 => 2,
        n if n > 4_000 => 4,
        _ => 5,
    }
}

/// Zoom window plus the radius/alpha scaling law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    init_window: ZoomWindow,
    window: ZoomWindow,
    base_radius: u32,
    base_alpha: f64,
    radius_multiplier: f64,
    alpha_multiplier: f64,
    limits: ZoomLimits,
    radius: u32,
    alpha: f64,
}

impl ViewportState {
    pub fn new(
        init_window: ZoomWindow,
        base_radius: u32,
        base_alpha: f64,
        limits: ZoomLimits,
    ) -> PlotResult<Self> {
        init_window.validate()?;
        limits.validate()?;
        if !base_alpha.is_finite() || base_alpha <= 0.0 || base_alpha > 1.0 {
            return Err(PlotError::InvalidData(format!(
                "alpha must be in (0, 1], got {base_alpha}"
            )));
        }
        let mut state = Self {
            init_window,
            window: init_window,
            base_radius,
            base_alpha,
            radius_multiplier: 1.0,
            alpha_multiplier: 1.0,
            limits,
            radius: base_radius,
            alpha: base_alpha,
        };
        state.calc_radius();
        Ok(state)
    }

    #[must_use]
    pub fn init_window(&self) -> ZoomWindow {
        self.init_window
    }

    #[must_use]
    pub fn window(&self) -> ZoomWindow {
        self.window
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        self.window.zoom_factor_relative_to(self.init_window)
    }

    #[must_use]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    #[must_use]
    pub fn base_radius(&self) -> u32 {
        self.base_radius
    }

    #[must_use]
    pub fn base_alpha(&self) -> f64 {
        self.base_alpha
    }

    #[must_use]
    pub fn radius_multiplier(&self) -> f64 {
        self.radius_multiplier
    }

    #[must_use]
    pub fn alpha_multiplier(&self) -> f64 {
        self.alpha_multiplier
    }

    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Recomputes radius and alpha from the zoom factor and multipliers.
    /// Returns `true` when either derived value changed.
    pub fn calc_radius(&mut self) -> bool {
        let zoom = self.zoom_factor();
        let base = if self.base_radius == 0 {
            ZERO_BASE_RADIUS
        } else {
            f64::from(self.base_radius)
        };
        let radius = (base * zoom.sqrt() * self.radius_multiplier)
            .floor()
            .clamp(0.0, f64::from(MAX_DERIVED_RADIUS)) as u32;

        let zoom_fraction = (zoom / 100.0).min(1.0);
        let alpha = (self.base_alpha + 3.0 * zoom_fraction * (1.0 - self.base_alpha))
            * self.alpha_multiplier;
        let alpha = alpha.min(MAX_DERIVED_ALPHA);

        let changed = radius != self.radius || alpha != self.alpha;
        self.radius = radius;
        self.alpha = alpha;
        trace!(zoom, radius, alpha, "radius recalculated");
        changed
    }

    /// Sets the radius and alpha multipliers. Values outside
    /// `RADIUS_MULTIPLIER_RANGE` / `ALPHA_MULTIPLIER_RANGE` are clamped.
    pub fn set_multipliers(&mut self, radius_multiplier: f64, alpha_multiplier: f64) -> PlotResult<()> {
        for (name, value) in [("radius", radius_multiplier), ("alpha", alpha_multiplier)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "{name} multiplier must be finite and > 0, got {value}"
                )));
            }
        }
        let radius = radius_multiplier.clamp(RADIUS_MULTIPLIER_RANGE.0, RADIUS_MULTIPLIER_RANGE.1);
        let alpha = alpha_multiplier.clamp(ALPHA_MULTIPLIER_RANGE.0, ALPHA_MULTIPLIER_RANGE.1);
        if radius != radius_multiplier || alpha != alpha_multiplier {
            warn!(
                radius_multiplier,
                alpha_multiplier, radius, alpha, "multipliers clamped"
            );
        }
        self.radius_multiplier = radius;
        self.alpha_multiplier = alpha;
        Ok(())
    }

    pub fn reset_radius(&mut self) {
        self.radius_multiplier = 1.0;
    }

    pub fn reset_alpha(&mut self) {
        self.alpha_multiplier = 1.0;
    }

    /// Keeps the current window but swaps the base values, e.g. when a new
    /// dataset inherits the previous look.
    pub fn set_base(&mut self, base_radius: u32, base_alpha: f64) {
        self.base_radius = base_radius;
        self.base_alpha = base_alpha;
    }

    /// Divides both spans by `factor`. `weights` is the pivot position as a
    /// fraction of the surface, y measured from the top; the pivot keeps
    /// its relative place in the window.
    pub fn zoom_by(&mut self, factor: f64, weights: (f64, f64)) -> ZoomOutcome {
        if !factor.is_finite() || factor <= 0.0 {
            return ZoomOutcome::Rejected;
        }
        let (wx, wy) = (weights.0.clamp(0.0, 1.0), weights.1.clamp(0.0, 1.0));
        let window = self.window;
        let span_x = window.span_x() / factor;
        let span_y = window.span_y() / factor;
        let min_x = window.min_x + (window.span_x() - span_x) * wx;
        let min_y = window.min_y + (window.span_y() - span_y) * (1.0 - wy);
        match ZoomWindow::new(min_x, min_x + span_x, min_y, min_y + span_y) {
            Ok(next) => self.set_window(next),
            Err(_) => ZoomOutcome::Rejected,
        }
    }

    /// Replaces the window when its zoom factor is within the limits.
    pub fn set_window(&mut self, window: ZoomWindow) -> ZoomOutcome {
        if window.validate().is_err() {
            return ZoomOutcome::Rejected;
        }
        let zoom = window.zoom_factor_relative_to(self.init_window);
        if !self.limits.allows(zoom) {
            debug!(zoom, "zoom rejected, outside limits");
            return ZoomOutcome::Rejected;
        }
        self.window = window;
        ZoomOutcome::Applied(window)
    }

    /// Shifts the window by data units.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.window = self.window.translated(dx, dy);
        }
    }

    /// Back to the initial window with neutral multipliers.
    pub fn reset(&mut self) {
        self.window = self.init_window;
        self.reset_radius();
        self.reset_alpha();
    }
}
