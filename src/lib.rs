//! cell-scatter: interactive scatter plot core for large single-cell
//! embeddings.
//!
//! Points live in data space and are projected onto a fixed-size RGBA
//! raster. The crate owns the projection, the point renderers, selection,
//! hit-testing and gesture interpretation; text is handed to a `Renderer`
//! backend as primitives next to the finished raster.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{LinkedViews, PlotConfig, PlotInput, ScatterPlot, ZoomOutcome};
pub use error::{PlotError, PlotResult};
