use serde::{Deserialize, Serialize};

use crate::interaction::ViewSlot;

/// What caused a selection change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    /// Called through the public selection API.
    Programmatic,
    PointClick,
    BackgroundClick,
    Marquee,
    /// Hide or show-only rewrote the visible point set.
    Visibility,
}

/// Payload of the selection-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// Selected point indices in ascending order.
    pub selected: Vec<u32>,
    /// Status line text, empty after a clear.
    pub status: String,
    pub origin: SelectionOrigin,
}

/// Event stream delivered to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlotEvent {
    SelectionChanged(SelectionEvent),
    /// Points under the resting pointer, nearest first.
    PointHover { ids: Vec<u32> },
    NoPointHover,
    PointClick { ids: Vec<u32> },
    LabelHover { index: usize, text: String },
    LabelClick { index: usize, text: String },
    NoLabelHover,
    /// `label` is `None` when the line under the pointer is unlabeled or
    /// when the pointer left every line.
    LineHover { label: Option<String> },
    RadiusAlphaChanged { radius: u32, alpha: f64 },
    ActiveChanged { slot: ViewSlot },
}

/// Notification hooks for UI collaborators.
///
/// Every hook defaults to a no-op so observers only implement what they
/// care about. Hooks fire synchronously inside the triggering call.
pub trait PlotObserver {
    fn id(&self) -> &str;

    fn on_selection_change(&mut self, _event: &SelectionEvent) {}
    fn on_point_hover(&mut self, _ids: &[u32]) {}
    fn on_no_point_hover(&mut self) {}
    fn on_point_click(&mut self, _ids: &[u32]) {}
    fn on_label_hover(&mut self, _index: usize, _text: &str) {}
    fn on_label_click(&mut self, _index: usize, _text: &str) {}
    fn on_no_label_hover(&mut self) {}
    fn on_line_hover(&mut self, _label: Option<&str>) {}
    fn on_radius_alpha_change(&mut self, _radius: u32, _alpha: f64) {}
    fn on_active_change(&mut self, _slot: ViewSlot) {}

    /// Routes an event to its hook. Override to observe the raw stream.
    fn on_event(&mut self, event: &PlotEvent) {
        match event {
            PlotEvent::SelectionChanged(selection) => self.on_selection_change(selection),
            PlotEvent::PointHover { ids } => self.on_point_hover(ids),
            PlotEvent::NoPointHover => self.on_no_point_hover(),
            PlotEvent::PointClick { ids } => self.on_point_click(ids),
            PlotEvent::LabelHover { index, text } => self.on_label_hover(*index, text),
            PlotEvent::LabelClick { index, text } => self.on_label_click(*index, text),
            PlotEvent::NoLabelHover => self.on_no_label_hover(),
            PlotEvent::LineHover { label } => self.on_line_hover(label.as_deref()),
            PlotEvent::RadiusAlphaChanged { radius, alpha } => {
                self.on_radius_alpha_change(*radius, *alpha);
            }
            PlotEvent::ActiveChanged { slot } => self.on_active_change(*slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotEvent, PlotObserver};

    #[derive(Default)]
    struct ClickCounter {
        clicks: usize,
    }

    impl PlotObserver for ClickCounter {
        fn id(&self) -> &str {
            "clicks"
        }

        fn on_point_click(&mut self, ids: &[u32]) {
            self.clicks += ids.len();
        }
    }

    #[test]
    fn default_routing_reaches_overridden_hooks_only() {
        let mut observer = ClickCounter::default();
        observer.on_event(&PlotEvent::PointClick { ids: vec![1, 2] });
        observer.on_event(&PlotEvent::NoPointHover);
        assert_eq!(observer.clicks, 2);
    }
}
