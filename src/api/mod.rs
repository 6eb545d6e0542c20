//! Public plot facade.
//!
//! `ScatterPlot` is split into controller files, each adding one concern's
//! `impl` block on top of the shared state in `scatter_plot`.

mod data_controller;
mod draw_controller;
mod hit_testing;
mod interaction_controller;
mod json_contract;
mod label_layer;
mod linked_views;
mod navigation_controller;
mod observer_dispatch;
mod observer_registry;
mod plot_config;
mod plot_input;
mod scatter_plot;
mod selection_controller;
mod snapshot_controller;
mod view_snapshot;
mod viewport_state;

pub use hit_testing::{LINE_HIT_TOLERANCE_PX, PointHits};
pub use interaction_controller::wheel_zoom_factor;
pub use json_contract::{VIEW_SNAPSHOT_JSON_SCHEMA_V1, ViewSnapshotJsonContractV1};
pub use label_layer::LabelBox;
pub use linked_views::LinkedViews;
pub use plot_config::{PlotConfig, ZoomLimits};
pub use plot_input::{LabelEntry, LineEntry, PlotBounds, PlotInput, PlotInputParts};
pub use scatter_plot::{ScatterPlot, SharedPoints, SharedSelection};
pub use view_snapshot::ViewSnapshot;
pub use viewport_state::{
    ALPHA_MULTIPLIER_RANGE, MAX_DERIVED_RADIUS, RADIUS_MULTIPLIER_RANGE, ViewportState,
    ZoomOutcome, guess_radius,
};
