//! Hooks for host code that wants to follow plot activity.
//!
//! Observers only read events; they never reach into plot internals.

pub mod observers;

pub use observers::{PlotEvent, PlotObserver, SelectionEvent, SelectionOrigin};
