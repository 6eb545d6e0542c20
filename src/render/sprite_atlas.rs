//! Pre-rendered circle glyphs stamped onto the raster by the sprite path.
//!
//! The atlas is a single strip of square tiles: one per palette color, then
//! the selection outline, the unselected grey, the non-emphasized grey and,
//! when emphasis is active, the enlarged emphasized glyph. Tiles store
//! straight-alpha RGBA where alpha is the anti-aliasing coverage.

use tracing::debug;

use crate::core::{NON_EMPHASIS_GREY, Palette, Rgb, UNSELECTED_GREY};
use crate::render::raster::{disc_coverage, ring_coverage};

/// Radius above which category glyphs get a lighter 1 px outline.
pub const OUTLINE_MIN_RADIUS: u32 = 7;
pub(crate) const OUTLINE_SHADE: f64 = 0.9;
pub(crate) const SELECTION_RING_WIDTH: f64 = 2.0;

/// Everything an atlas depends on. Any change forces a full rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteCacheKey {
    pub radius: u32,
    pub palette_hash: u64,
    pub emphasis: Option<u8>,
}

impl SpriteCacheKey {
    #[must_use]
    pub fn new(radius: u32, palette: &Palette, emphasis: Option<u8>) -> Self {
        Self {
            radius,
            palette_hash: palette.content_hash(),
            emphasis,
        }
    }
}

/// Glyphs addressable in an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphId {
    Category(u8),
    SelectionOutline,
    Unselected,
    NonEmphasized,
    /// Enlarged glyph of the emphasized category; only present while
    /// emphasis is set.
    Emphasized,
}

/// Tile edge length for a glyph of `radius`.
#[must_use]
pub fn tile_size(radius: u32) -> u32 {
    radius.saturating_mul(2).saturating_add(2)
}

/// Radius of the enlarged emphasis glyph.
#[must_use]
pub fn emphasized_radius(radius: u32) -> u32 {
    radius.saturating_mul(3) / 2
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TileSlot {
    x: u32,
    size: u32,
    radius: u32,
}

/// Borrowed view on one glyph tile.
#[derive(Debug, Clone, Copy)]
pub struct GlyphView<'a> {
    pixels: &'a [u8],
    stride: u32,
    x: u32,
    pub size: u32,
    pub radius: u32,
}

impl GlyphView<'_> {
    /// RGBA texel at `(col, row)` inside the tile.
    #[inline]
    #[must_use]
    pub fn texel(&self, col: u32, row: u32) -> [u8; 4] {
        let offset = ((row * self.stride + self.x + col) * 4) as usize;
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteAtlas {
    key: SpriteCacheKey,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    categories: Vec<TileSlot>,
    selection_outline: TileSlot,
    unselected: TileSlot,
    non_emphasized: TileSlot,
    emphasized: Option<TileSlot>,
}

impl SpriteAtlas {
    /// Renders every glyph for `key`. `palette` must be the palette whose
    /// hash is in the key.
    #[must_use]
    pub fn build(key: SpriteCacheKey, palette: &Palette) -> Self {
        let radius = key.radius;
        let size = tile_size(radius);
        let mut next_x = 0;
        let mut slot = |radius: u32| {
            let size = tile_size(radius);
            let tile = TileSlot {
                x: next_x,
                size,
                radius,
            };
            next_x = next_x.saturating_add(size);
            tile
        };

        let categories: Vec<TileSlot> = (0..palette.len()).map(|_| slot(radius)).collect();
        let selection_outline = slot(radius);
        let unselected = slot(radius);
        let non_emphasized = slot(radius);
        let emphasized = key.emphasis.map(|_| slot(emphasized_radius(radius)));
        let width = next_x;
        let height = emphasized.map_or(size, |tile| tile.size);

        let mut atlas = Self {
            key,
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            categories,
            selection_outline,
            unselected,
            non_emphasized,
            emphasized,
        };

        let r = f64::from(radius);
        for (tile, &color) in atlas.categories.clone().iter().zip(palette.colors()) {
            atlas.paint_disc(*tile, color);
            if radius >= OUTLINE_MIN_RADIUS {
                atlas.paint_ring(*tile, r, 1.0, color.shade(OUTLINE_SHADE));
            }
        }
        atlas.paint_ring(
            selection_outline,
            (r - 1.0).max(0.0),
            SELECTION_RING_WIDTH,
            Rgb::BLACK,
        );
        atlas.paint_disc(unselected, UNSELECTED_GREY);
        atlas.paint_disc(non_emphasized, NON_EMPHASIS_GREY);
        if let (Some(tile), Some(category)) = (emphasized, key.emphasis) {
            atlas.paint_disc(tile, palette.color(category));
        }

        debug!(
            radius,
            glyphs = atlas.glyph_count(),
            width = atlas.width,
            emphasis = ?key.emphasis,
            "sprite atlas built"
        );
        atlas
    }

    #[must_use]
    pub fn key(&self) -> SpriteCacheKey {
        self.key
    }

    #[must_use]
    pub fn glyph_count(&self) -> usize {
        self.categories.len() + 3 + usize::from(self.emphasized.is_some())
    }

    /// Strip dimensions in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn glyph(&self, id: GlyphId) -> Option<GlyphView<'_>> {
        let tile = match id {
            GlyphId::Category(index) => *self.categories.get(usize::from(index))?,
            GlyphId::SelectionOutline => self.selection_outline,
            GlyphId::Unselected => self.unselected,
            GlyphId::NonEmphasized => self.non_emphasized,
            GlyphId::Emphasized => self.emphasized?,
        };
        Some(GlyphView {
            pixels: &self.pixels,
            stride: self.width,
            x: tile.x,
            size: tile.size,
            radius: tile.radius,
        })
    }

    fn paint_disc(&mut self, tile: TileSlot, color: Rgb) {
        let r = f64::from(tile.radius);
        self.paint(tile, color, |d| disc_coverage(d, r));
    }

    fn paint_ring(&mut self, tile: TileSlot, ring_radius: f64, line_width: f64, color: Rgb) {
        self.paint(tile, color, |d| ring_coverage(d, ring_radius, line_width));
    }

    /// Source-over composite of `color` with per-texel coverage, keeping
    /// straight alpha.
    fn paint(&mut self, tile: TileSlot, color: Rgb, coverage: impl Fn(f64) -> f64) {
        let center = f64::from(tile.radius) + 1.0;
        for row in 0..tile.size {
            for col in 0..tile.size {
                let d = (f64::from(col) + 0.5 - center).hypot(f64::from(row) + 0.5 - center);
                let src_a = coverage(d);
                if src_a <= 0.0 {
                    continue;
                }
                let offset = ((row * self.width + tile.x + col) * 4) as usize;
                let px = &mut self.pixels[offset..offset + 4];
                let dst_a = f64::from(px[3]) / 255.0;
                let out_a = src_a + dst_a * (1.0 - src_a);
                let mix = |dst: u8, src: u8| {
                    ((f64::from(src) * src_a + f64::from(dst) * dst_a * (1.0 - src_a)) / out_a)
                        .round() as u8
                };
                px[0] = mix(px[0], color.red);
                px[1] = mix(px[1], color.green);
                px[2] = mix(px[2], color.blue);
                px[3] = (out_a * 255.0).round() as u8;
            }
        }
    }
}

/// Runtime metrics of the sprite cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpriteCacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Holds the atlas for the most recent key.
#[derive(Debug, Default)]
pub struct SpriteCache {
    atlas: Option<SpriteAtlas>,
    hits: u64,
    misses: u64,
}

impl SpriteCache {
    /// Returns the atlas for the given parameters, rebuilding it when any
    /// key component changed.
    pub fn atlas_for(
        &mut self,
        radius: u32,
        palette: &Palette,
        emphasis: Option<u8>,
    ) -> &SpriteAtlas {
        let key = SpriteCacheKey::new(radius, palette, emphasis);
        let stale = self
            .atlas
            .as_ref()
            .is_none_or(|atlas| atlas.key() != key);
        if stale {
            self.atlas = None;
            self.misses = self.misses.saturating_add(1);
        } else {
            self.hits = self.hits.saturating_add(1);
        }
        self.atlas
            .get_or_insert_with(|| SpriteAtlas::build(key, palette))
    }

    pub fn clear(&mut self) {
        self.atlas = None;
    }

    #[must_use]
    pub fn current_key(&self) -> Option<SpriteCacheKey> {
        self.atlas.as_ref().map(SpriteAtlas::key)
    }

    #[must_use]
    pub fn stats(&self) -> SpriteCacheStats {
        SpriteCacheStats {
            hits: self.hits,
            misses: self.misses,
        }
    }
}
