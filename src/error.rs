use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("invalid surface size: width={width}, height={height}")]
    InvalidSurface { width: u32, height: u32 },

    #[error("coordinate array is empty")]
    EmptyCoordinates,

    #[error("color array has {colors} entries but there are {points} points")]
    ColorCountMismatch { colors: usize, points: usize },

    #[error("point {point} uses color index {value}, palette has {palette_len} entries")]
    ColorIndexOutOfRange {
        point: usize,
        value: u8,
        palette_len: usize,
    },

    #[error("point index {index} is out of range for {count} points")]
    PointIndexOutOfRange { index: u32, count: usize },

    #[error("plot has no point data loaded")]
    NotLoaded,

    #[error("invalid data: {0}")]
    InvalidData(String),
}
