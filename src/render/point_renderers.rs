//! Raster point renderers.
//!
//! All renderers share one drawing order: category 0 first, then every other
//! category, then emphasis overdraw, then selection overdraw. Drawing the
//! dominant "unassigned" category first keeps it from covering the rest.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    NON_EMPHASIS_GREY, NON_EMPHASIS_PIXEL_GREY, Palette, PixelCoords, ProjectedLine, Rgb,
    Selection, UNSELECTED_GREY,
};
use crate::render::primitives::LineStyle;
use crate::render::raster::RasterSurface;
use crate::render::sprite_atlas::{
    GlyphId, OUTLINE_MIN_RADIUS, OUTLINE_SHADE, SELECTION_RING_WIDTH, SpriteAtlas,
    emphasized_radius,
};

/// Opacity of selection and emphasis overdraw on the rect and circle paths.
pub const OVERDRAW_ALPHA: f64 = 0.7;

/// Counters reported by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawStats {
    /// Visible, non-hidden points drawn in the base passes.
    pub points_drawn: usize,
    pub selection_overdraw: usize,
    pub emphasis_overdraw: usize,
}

/// Everything a renderer reads for one draw.
#[derive(Debug, Clone, Copy)]
pub struct PointDrawInput<'a> {
    pub pixels: &'a PixelCoords,
    pub colors: &'a [u8],
    pub palette: &'a Palette,
    pub radius: u32,
    pub alpha: f64,
    pub selection: &'a Selection,
    pub emphasis: Option<u8>,
}

impl PointDrawInput<'_> {
    fn color_of(&self, index: usize) -> u8 {
        self.colors.get(index).copied().unwrap_or(0)
    }

    /// Visits visible points as `(index, x, y, category)`, category 0 first.
    fn for_each_in_depth_order(&self, mut visit: impl FnMut(usize, i32, i32, u8)) {
        for zero_pass in [true, false] {
            for (index, x, y) in self.pixels.iter_visible() {
                let category = self.color_of(index);
                if (category == 0) == zero_pass {
                    visit(index, i32::from(x), i32::from(y), category);
                }
            }
        }
    }

    /// Visible selected points as `(index, x, y, category)` in selection order.
    fn selected_visible(&self) -> impl Iterator<Item = (usize, i32, i32, u8)> + '_ {
        self.selection.iter().filter_map(move |id| {
            let index = id as usize;
            self.pixels
                .get(index)
                .map(|(x, y)| (index, i32::from(x), i32::from(y), self.color_of(index)))
        })
    }

    /// Visible points of the emphasized category.
    fn emphasized_visible(&self) -> impl Iterator<Item = (usize, i32, i32, u8)> + '_ {
        let emphasis = self.emphasis;
        self.pixels
            .iter_visible()
            .map(move |(index, x, y)| (index, i32::from(x), i32::from(y), self.color_of(index)))
            .filter(move |&(_, _, _, category)| Some(category) == emphasis)
    }

    /// Fill used for a circle in the base passes.
    pub(crate) fn circle_fill(&self, category: u8) -> CircleFill {
        match self.emphasis {
            Some(emphasized) if emphasized != category => CircleFill::NonEmphasized,
            Some(_) => CircleFill::Category(category),
            None if !self.selection.is_empty() => CircleFill::Unselected,
            None => CircleFill::Category(category),
        }
    }
}

/// Base-pass circle fill shared by the circle renderers and the SVG export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CircleFill {
    Category(u8),
    Unselected,
    NonEmphasized,
}

impl CircleFill {
    pub(crate) fn glyph(self) -> GlyphId {
        match self {
            Self::Category(category) => GlyphId::Category(category),
            Self::Unselected => GlyphId::Unselected,
            Self::NonEmphasized => GlyphId::NonEmphasized,
        }
    }

    pub(crate) fn rgb(self, palette: &Palette) -> Rgb {
        match self {
            Self::Category(category) => palette.color(category),
            Self::Unselected => UNSELECTED_GREY,
            Self::NonEmphasized => NON_EMPHASIS_GREY,
        }
    }
}

/// One pixel per point.
pub fn draw_pixel_buffer(raster: &mut RasterSurface, input: &PointDrawInput<'_>) -> DrawStats {
    let mut stats = DrawStats::default();
    let has_selection = !input.selection.is_empty();

    input.for_each_in_depth_order(|_, x, y, category| {
        stats.points_drawn += 1;
        match input.emphasis {
            Some(emphasized) if emphasized == category => {
                raster.put_pixel(x, y, input.palette.color(category));
            }
            Some(_) => raster.put_pixel(x, y, NON_EMPHASIS_PIXEL_GREY),
            None if has_selection => raster.blend_pixel(x, y, UNSELECTED_GREY, input.alpha),
            None => raster.blend_pixel(x, y, input.palette.color(category), input.alpha),
        }
    });

    for (_, x, y, _) in input.selected_visible() {
        raster.put_pixel(x, y, Rgb::BLACK);
        stats.selection_overdraw += 1;
    }

    trace!(?stats, "pixel buffer draw");
    stats
}

/// `2r × 2r` squares centered on each point.
pub fn draw_rects(raster: &mut RasterSurface, input: &PointDrawInput<'_>) -> DrawStats {
    let mut stats = DrawStats::default();
    let r = input.radius as i32;
    let size = 2 * r;
    let greyed = !input.selection.is_empty() || input.emphasis.is_some();
    let muted;
    let base_palette = if greyed {
        muted = input.palette.muted_grey();
        &muted
    } else {
        input.palette
    };

    input.for_each_in_depth_order(|_, x, y, category| {
        stats.points_drawn += 1;
        raster.fill_rect(
            x - r,
            y - r,
            size,
            size,
            base_palette.color(category),
            input.alpha,
        );
    });

    for (_, x, y, category) in input.emphasized_visible() {
        raster.fill_rect(
            x - r,
            y - r,
            size,
            size,
            input.palette.color(category),
            OVERDRAW_ALPHA,
        );
        stats.emphasis_overdraw += 1;
    }

    for (_, x, y, _) in input.selected_visible() {
        raster.fill_rect(x - r, y - r, size, size, Rgb::BLACK, OVERDRAW_ALPHA);
        stats.selection_overdraw += 1;
    }

    trace!(?stats, "rect draw");
    stats
}

/// Stamps atlas glyphs. `atlas` must have been built for the input's radius,
/// palette and emphasis.
pub fn draw_sprites(
    raster: &mut RasterSurface,
    atlas: &SpriteAtlas,
    input: &PointDrawInput<'_>,
) -> DrawStats {
    let mut stats = DrawStats::default();

    input.for_each_in_depth_order(|_, x, y, category| {
        stats.points_drawn += 1;
        if let Some(glyph) = atlas.glyph(input.circle_fill(category).glyph()) {
            raster.blit_glyph(&glyph, x, y, input.alpha);
        }
    });

    if let Some(glyph) = atlas.glyph(GlyphId::Emphasized) {
        for (_, x, y, _) in input.emphasized_visible() {
            raster.blit_glyph(&glyph, x, y, input.alpha);
            stats.emphasis_overdraw += 1;
        }
    }

    let outline = atlas.glyph(GlyphId::SelectionOutline);
    for (_, x, y, category) in input.selected_visible() {
        if let Some(glyph) = atlas.glyph(GlyphId::Category(category)) {
            raster.blit_glyph(&glyph, x, y, OVERDRAW_ALPHA);
        }
        if let Some(glyph) = &outline {
            raster.blit_glyph(glyph, x, y, OVERDRAW_ALPHA);
        }
        stats.selection_overdraw += 1;
    }

    trace!(?stats, "sprite draw");
    stats
}

/// Rasterizes every circle directly with the same rules as the sprite path.
pub fn draw_reference_circles(
    raster: &mut RasterSurface,
    input: &PointDrawInput<'_>,
) -> DrawStats {
    let mut stats = DrawStats::default();
    let r = f64::from(input.radius);
    let outlined = input.radius >= OUTLINE_MIN_RADIUS;

    input.for_each_in_depth_order(|_, x, y, category| {
        stats.points_drawn += 1;
        let fill = input.circle_fill(category);
        let color = fill.rgb(input.palette);
        let (cx, cy) = (f64::from(x), f64::from(y));
        raster.fill_circle(cx, cy, r, color, input.alpha);
        if outlined && matches!(fill, CircleFill::Category(_)) {
            raster.stroke_circle(cx, cy, r, 1.0, color.shade(OUTLINE_SHADE), input.alpha);
        }
    });

    let enlarged = f64::from(emphasized_radius(input.radius));
    for (_, x, y, category) in input.emphasized_visible() {
        raster.fill_circle(
            f64::from(x),
            f64::from(y),
            enlarged,
            input.palette.color(category),
            input.alpha,
        );
        stats.emphasis_overdraw += 1;
    }

    for (_, x, y, category) in input.selected_visible() {
        let color = input.palette.color(category);
        let (cx, cy) = (f64::from(x), f64::from(y));
        raster.fill_circle(cx, cy, r, color, OVERDRAW_ALPHA);
        if outlined {
            raster.stroke_circle(cx, cy, r, 1.0, color.shade(OUTLINE_SHADE), OVERDRAW_ALPHA);
        }
        raster.stroke_circle(
            cx,
            cy,
            (r - 1.0).max(0.0),
            SELECTION_RING_WIDTH,
            Rgb::BLACK,
            OVERDRAW_ALPHA,
        );
        stats.selection_overdraw += 1;
    }

    trace!(?stats, "reference circle draw");
    stats
}

/// Strokes projected trajectory lines on top of the points.
pub fn draw_lines(raster: &mut RasterSurface, lines: &[ProjectedLine], style: LineStyle) -> usize {
    for line in lines {
        raster.stroke_line(
            f64::from(line.x1),
            f64::from(line.y1),
            f64::from(line.x2),
            f64::from(line.y2),
            style.width,
            style.color,
            style.alpha,
        );
    }
    lines.len()
}
