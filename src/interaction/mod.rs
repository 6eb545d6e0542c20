use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a primary-button drag does when no modifier overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    #[default]
    Select,
    Zoom,
    Move,
}

/// One side of a split view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSlot {
    Primary,
    Secondary,
}

impl ViewSlot {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
        meta: false,
        ctrl: false,
    };

    /// Any modifier that overrides the drag mode.
    #[must_use]
    pub fn overrides_drag(self) -> bool {
        self.shift || self.alt || self.meta
    }
}

/// Resolved meaning of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    /// Marquee selection; `additive` keeps the current selection.
    Select { additive: bool },
    /// Marquee zoom with the surface aspect ratio forced.
    Zoom,
    Pan,
}

impl DragIntent {
    /// Meta forces zoom, shift forces additive select, alt forces pan;
    /// otherwise the drag mode decides.
    #[must_use]
    pub fn resolve(mode: DragMode, modifiers: Modifiers) -> Self {
        if modifiers.meta {
            return Self::Zoom;
        }
        if modifiers.shift {
            return Self::Select { additive: true };
        }
        if modifiers.alt {
            return Self::Pan;
        }
        match mode {
            DragMode::Select => Self::Select { additive: false },
            DragMode::Zoom => Self::Zoom,
            DragMode::Move => Self::Pan,
        }
    }
}

/// Marquee rectangle in surface pixels, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marquee {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Marquee {
    /// Rectangle spanned by a drag. With `forced_aspect` (width / height of
    /// the surface) the height follows the width so a zoom keeps the plot's
    /// proportions.
    #[must_use]
    pub fn from_drag(x1: f64, y1: f64, x2: f64, y2: f64, forced_aspect: Option<f64>) -> Self {
        let width = (x1 - x2).abs();
        let height = match forced_aspect {
            Some(aspect) if aspect > 0.0 => width / aspect,
            _ => (y1 - y2).abs(),
        };
        Self {
            left: x1.min(x2),
            top: y1.min(y2),
            width,
            height,
        }
    }

    /// `(x1, y1, x2, y2)` corners.
    #[must_use]
    pub fn corners(self) -> (f64, f64, f64, f64) {
        (
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }
}

/// Debounce countdown for hover hit-tests.
///
/// Every pointer move restarts the countdown; the host advances it with
/// elapsed wall time and gets the pointer position back exactly once when
/// the pointer rested long enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverTimer {
    delay: Duration,
    remaining: Option<Duration>,
    position: (f64, f64),
}

impl HoverTimer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            remaining: None,
            position: (0.0, 0.0),
        }
    }

    #[must_use]
    pub fn delay(self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.remaining.is_some()
    }

    pub fn restart(&mut self, x: f64, y: f64) {
        self.remaining = Some(self.delay);
        self.position = (x, y);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Counts down; returns the rest position when the countdown expires.
    pub fn advance(&mut self, elapsed: Duration) -> Option<(f64, f64)> {
        let remaining = self.remaining?;
        match remaining.checked_sub(elapsed) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                None
            }
            _ => {
                self.remaining = None;
                Some(self.position)
            }
        }
    }
}

/// A pressed primary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub x: f64,
    pub y: f64,
    pub intent: DragIntent,
}

/// Pointer and drag-mode state of one plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    drag_mode: DragMode,
    previous_mode: Option<DragMode>,
    press: Option<PointerPress>,
    marquee: Option<Marquee>,
    pan_offset: Option<(f64, f64)>,
    last_click: Option<(f64, f64)>,
    cursor: (f64, f64),
    hover: HoverTimer,
}

impl InteractionState {
    #[must_use]
    pub fn new(drag_mode: DragMode, hover_delay: Duration) -> Self {
        Self {
            drag_mode,
            previous_mode: None,
            press: None,
            marquee: None,
            pan_offset: None,
            last_click: None,
            cursor: (0.0, 0.0),
            hover: HoverTimer::new(hover_delay),
        }
    }

    #[must_use]
    pub fn drag_mode(&self) -> DragMode {
        self.drag_mode
    }

    /// Switches the drag mode. Entering zoom remembers the prior mode so a
    /// finished zoom drag can return to it.
    pub fn set_drag_mode(&mut self, mode: DragMode) {
        self.previous_mode = (mode == DragMode::Zoom).then_some(self.drag_mode);
        self.drag_mode = mode;
    }

    /// Restores the mode active before zoom mode, if any.
    pub fn restore_previous_mode(&mut self) -> Option<DragMode> {
        let previous = self.previous_mode.take()?;
        self.drag_mode = previous;
        Some(previous)
    }

    #[must_use]
    pub fn press(&self) -> Option<PointerPress> {
        self.press
    }

    pub fn begin_press(&mut self, x: f64, y: f64, intent: DragIntent) {
        self.press = Some(PointerPress { x, y, intent });
        self.marquee = None;
        self.pan_offset = None;
    }

    /// Clears press, marquee and pan offset.
    pub fn end_press(&mut self) -> Option<PointerPress> {
        self.marquee = None;
        self.pan_offset = None;
        self.press.take()
    }

    #[must_use]
    pub fn marquee(&self) -> Option<Marquee> {
        self.marquee
    }

    pub fn set_marquee(&mut self, marquee: Option<Marquee>) {
        self.marquee = marquee;
    }

    #[must_use]
    pub fn pan_offset(&self) -> Option<(f64, f64)> {
        self.pan_offset
    }

    pub fn set_pan_offset(&mut self, offset: (f64, f64)) {
        self.pan_offset = Some(offset);
    }

    /// Records a click and reports whether it repeats the previous click
    /// position. A repeat consumes the stored position so a third click
    /// starts over.
    pub fn register_click(&mut self, x: f64, y: f64) -> bool {
        if self.last_click == Some((x, y)) {
            self.last_click = None;
            true
        } else {
            self.last_click = Some((x, y));
            false
        }
    }

    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
        self.hover.restart(x, y);
    }

    pub fn hover_timer(&mut self) -> &mut HoverTimer {
        &mut self.hover
    }
}
