//! In-memory RGBA8 raster the point renderers paint into.
//!
//! Geometry is corner-based: pixel `(x, y)` covers `[x, x+1) × [y, y+1)` and
//! is sampled at its center. A circle centered on a projected point therefore
//! sits on the pixel corner at that coordinate, which is what lets glyph
//! blits and direct circle rasterization produce the same footprint.

use crate::core::{Rgb, SurfaceSize, point_segment_distance};
use crate::error::PlotResult;
use crate::render::sprite_atlas::GlyphView;

/// Opaque RGBA8 surface, rows top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    size: SurfaceSize,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// White surface of the given size.
    pub fn new(size: SurfaceSize) -> PlotResult<Self> {
        size.validate()?;
        let mut surface = Self {
            size,
            pixels: vec![0; size.pixel_count() * 4],
        };
        surface.clear(Rgb::WHITE);
        Ok(surface)
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    #[must_use]
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let offset = self.offset(i64::from(x), i64::from(y))?;
        Some(Rgb::new(
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ))
    }

    pub fn clear(&mut self, color: Rgb) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.red, color.green, color.blue, 255]);
        }
    }

    /// Number of pixels whose color differs from `background`.
    #[must_use]
    pub fn count_pixels_unlike(&self, background: Rgb) -> usize {
        self.pixels
            .chunks_exact(4)
            .filter(|px| px[..3] != [background.red, background.green, background.blue])
            .count()
    }

    /// Overwrites one pixel; out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(offset) = self.offset(i64::from(x), i64::from(y)) {
            self.pixels[offset..offset + 4].copy_from_slice(&[
                color.red,
                color.green,
                color.blue,
                255,
            ]);
        }
    }

    /// Source-over blend of `color` at `alpha`; out-of-bounds writes are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let Some(offset) = self.offset(i64::from(x), i64::from(y)) else {
            return;
        };
        let alpha = alpha.min(1.0);
        let mix = |dst: u8, src: u8| {
            (f64::from(src) * alpha + f64::from(dst) * (1.0 - alpha)).round() as u8
        };
        let px = &mut self.pixels[offset..offset + 4];
        px[0] = mix(px[0], color.red);
        px[1] = mix(px[1], color.green);
        px[2] = mix(px[2], color.blue);
        px[3] = 255;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb, alpha: f64) {
        for py in y..y.saturating_add(height) {
            for px in x..x.saturating_add(width) {
                self.blend_pixel(px, py, color, alpha);
            }
        }
    }

    /// Anti-aliased disc centered on the pixel corner `(cx, cy)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgb, alpha: f64) {
        let reach = radius + 1.0;
        self.paint_coverage(cx - reach, cy - reach, cx + reach, cy + reach, color, alpha, |x, y| {
            disc_coverage((x - cx).hypot(y - cy), radius)
        });
    }

    /// Anti-aliased ring of `line_width` centered on a circle of `radius`.
    pub fn stroke_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        line_width: f64,
        color: Rgb,
        alpha: f64,
    ) {
        let reach = radius + line_width + 1.0;
        self.paint_coverage(cx - reach, cy - reach, cx + reach, cy + reach, color, alpha, |x, y| {
            ring_coverage((x - cx).hypot(y - cy), radius, line_width)
        });
    }

    /// Anti-aliased straight stroke with butt-free (rounded) ends.
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        line_width: f64,
        color: Rgb,
        alpha: f64,
    ) {
        let reach = line_width / 2.0 + 1.0;
        let half = line_width / 2.0;
        self.paint_coverage(
            x1.min(x2) - reach,
            y1.min(y2) - reach,
            x1.max(x2) + reach,
            y1.max(y2) + reach,
            color,
            alpha,
            |x, y| (half + 0.5 - point_segment_distance(x, y, x1, y1, x2, y2)).clamp(0.0, 1.0),
        );
    }

    /// Composites a glyph so that its circle center lands on `(cx, cy)`.
    pub fn blit_glyph(&mut self, glyph: &GlyphView<'_>, cx: i32, cy: i32, alpha: f64) {
        let offset = glyph.radius as i32 + 1;
        let left = cx - offset;
        let top = cy - offset;
        for row in 0..glyph.size {
            for col in 0..glyph.size {
                let [red, green, blue, coverage] = glyph.texel(col, row);
                if coverage == 0 {
                    continue;
                }
                self.blend_pixel(
                    left + col as i32,
                    top + row as i32,
                    Rgb::new(red, green, blue),
                    f64::from(coverage) / 255.0 * alpha,
                );
            }
        }
    }

    /// Replaces the content with `snapshot` moved by `(offset_x, offset_y)`
    /// over white. Used while panning so the drag follows the pointer
    /// without a full redraw.
    pub fn draw_shifted(&mut self, snapshot: &RasterSurface, offset_x: i32, offset_y: i32) {
        self.clear(Rgb::WHITE);
        let width = i64::from(self.size.width.min(snapshot.size.width));
        let height = i64::from(self.size.height.min(snapshot.size.height));
        for y in 0..height {
            for x in 0..width {
                let Some(src) = snapshot.offset(x, y) else {
                    continue;
                };
                let Some(dst) = self.offset(x + i64::from(offset_x), y + i64::from(offset_y))
                else {
                    continue;
                };
                self.pixels[dst..dst + 4].copy_from_slice(&snapshot.pixels[src..src + 4]);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_coverage(
        &mut self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        color: Rgb,
        alpha: f64,
        coverage: impl Fn(f64, f64) -> f64,
    ) {
        let x_start = min_x.floor().max(0.0) as i64;
        let y_start = min_y.floor().max(0.0) as i64;
        let x_end = max_x.ceil().min(f64::from(self.size.width)) as i64;
        let y_end = max_y.ceil().min(f64::from(self.size.height)) as i64;
        for y in y_start..y_end {
            for x in x_start..x_end {
                let amount = coverage(x as f64 + 0.5, y as f64 + 0.5);
                if amount > 0.0 {
                    self.blend_pixel(x as i32, y as i32, color, amount * alpha);
                }
            }
        }
    }

    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.size.width) || y >= i64::from(self.size.height) {
            return None;
        }
        Some(((y as usize) * self.size.width as usize + x as usize) * 4)
    }
}

/// Fraction of a pixel sample at distance `d` from the center covered by a
/// disc of `radius`.
#[inline]
pub(crate) fn disc_coverage(d: f64, radius: f64) -> f64 {
    (radius + 0.5 - d).clamp(0.0, 1.0)
}

/// Coverage of a ring stroked with `line_width` along a circle of `radius`.
#[inline]
pub(crate) fn ring_coverage(d: f64, radius: f64, line_width: f64) -> f64 {
    (line_width / 2.0 + 0.5 - (d - radius).abs()).clamp(0.0, 1.0)
}
