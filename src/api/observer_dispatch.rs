use tracing::trace;

use crate::extensions::{PlotEvent, SelectionEvent, SelectionOrigin};
use crate::render::Renderer;

use super::ScatterPlot;

impl<R: Renderer> ScatterPlot<R> {
    pub(super) fn emit(&mut self, event: PlotEvent) {
        trace!(?event, observers = self.observers.len(), "plot event");
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Refreshes the status line from the selection and notifies observers.
    pub(super) fn emit_selection_changed(&mut self, origin: SelectionOrigin) {
        let selected = self.selection.borrow().sorted_ids();
        self.status = format!("{} {}s selected", selected.len(), self.config.sample_name);
        self.invalidated = true;
        self.emit(PlotEvent::SelectionChanged(SelectionEvent {
            selected,
            status: self.status.clone(),
            origin,
        }));
    }

    /// Clear notifications carry an empty status line.
    pub(super) fn emit_selection_cleared(&mut self, origin: SelectionOrigin) {
        self.status.clear();
        self.invalidated = true;
        self.emit(PlotEvent::SelectionChanged(SelectionEvent {
            selected: Vec::new(),
            status: String::new(),
            origin,
        }));
    }
}
