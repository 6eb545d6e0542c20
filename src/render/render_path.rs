use serde::{Deserialize, Serialize};

/// Host-selected drawing preference. Only matters once points are large
/// enough for circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawMode {
    /// Stamp pre-rendered glyphs from the sprite atlas.
    #[default]
    Sprite,
    /// Rasterize every circle directly. Slower; kept as the reference the
    /// sprite path is checked against.
    Reference,
    /// Produce an SVG document instead of raster pixels.
    VectorExport,
}

/// Concrete renderer used for one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPath {
    PixelBuffer,
    Rect,
    Sprite,
    ReferenceCircle,
    VectorExport,
}

impl RenderPath {
    #[must_use]
    pub fn select(radius: u32, mode: DrawMode) -> Self {
        match (mode, radius) {
            (DrawMode::VectorExport, _) => Self::VectorExport,
            (_, 0) => Self::PixelBuffer,
            (_, 1 | 2) => Self::Rect,
            (DrawMode::Reference, _) => Self::ReferenceCircle,
            (DrawMode::Sprite, _) => Self::Sprite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawMode, RenderPath};

    #[test]
    fn small_radii_ignore_the_draw_mode() {
        assert_eq!(RenderPath::select(0, DrawMode::Reference), RenderPath::PixelBuffer);
        assert_eq!(RenderPath::select(2, DrawMode::Sprite), RenderPath::Rect);
        assert_eq!(RenderPath::select(3, DrawMode::Sprite), RenderPath::Sprite);
        assert_eq!(
            RenderPath::select(3, DrawMode::Reference),
            RenderPath::ReferenceCircle
        );
        assert_eq!(
            RenderPath::select(0, DrawMode::VectorExport),
            RenderPath::VectorExport
        );
    }
}
