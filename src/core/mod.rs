pub mod geometry;
pub mod palette;
pub mod point_data;
pub mod selection;
pub mod transform;
pub mod types;
pub mod zoom_window;

pub use geometry::point_segment_distance;
pub use palette::{NON_EMPHASIS_GREY, NON_EMPHASIS_PIXEL_GREY, Palette, Rgb, UNSELECTED_GREY};
pub use point_data::PointData;
pub use selection::{PixelRect, Selection};
pub use transform::{
    PixelCoords, ProjectedLabel, ProjectedLine, Projection, project_labels, project_lines,
    project_points,
};
pub use types::{
    DataPoint, HIDDEN_DATA_COORD, HIDDEN_PIXEL, LabelAnchor, LineSegment, SurfaceSize,
    is_hidden_data, is_hidden_pixel,
};
pub use zoom_window::ZoomWindow;
