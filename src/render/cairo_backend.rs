use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{PlotError, PlotResult};
use crate::render::{Color, RasterSurface, RenderFrame, Renderer, TextStyle};

const HALO_COLOR: Color = Color::rgba(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 0.3);
const HALO_WIDTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub points_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame<'_>,
    ) -> PlotResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// The point raster is uploaded as an image surface and painted first;
/// label text is then laid out with Pango on top of it. Rendering works
/// offscreen through `Renderer::render` or on a host-provided context
/// through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> PlotResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(PlotError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame<'_>,
    ) -> PlotResult<()> {
        frame.validate()?;

        let image = raster_to_image_surface(frame.raster)?;
        context
            .set_source_surface(&image, 0.0, 0.0)
            .map_err(|err| map_backend_error("failed to set raster source", err))?;
        context
            .paint()
            .map_err(|err| map_backend_error("failed to paint raster", err))?;

        let mut stats = CairoRenderStats {
            points_drawn: frame.stats.points_drawn,
            texts_drawn: 0,
        };

        for text in frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let weight = match text.style {
                TextStyle::Halo => "Bold ",
                TextStyle::Plain => "",
            };
            let font_description =
                FontDescription::from_string(&format!("Sans {weight}{}px", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            if text.style == TextStyle::Halo {
                context.move_to(text.x, text.y);
                pangocairo::functions::layout_path(context, &layout);
                apply_color(context, HALO_COLOR);
                context.set_line_width(HALO_WIDTH);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke label halo", err))?;
            }

            apply_color(context, text.color);
            context.move_to(text.x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> PlotResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame<'_>,
    ) -> PlotResult<()> {
        self.render_with_context(context, frame)
    }
}

/// Converts the opaque RGBA raster to Cairo's native-endian ARGB32 layout.
fn raster_to_image_surface(raster: &RasterSurface) -> PlotResult<ImageSurface> {
    let width = raster.width();
    let height = raster.height();
    let stride = Format::ARgb32
        .stride_for_width(width)
        .map_err(|err| map_backend_error("invalid raster stride", err))?;
    let stride_bytes = usize::try_from(stride)
        .map_err(|_| PlotError::InvalidData(format!("negative cairo stride {stride}")))?;

    let mut data = vec![0_u8; stride_bytes * height as usize];
    for (row, src_row) in raster
        .as_rgba()
        .chunks_exact(width as usize * 4)
        .enumerate()
    {
        let dst_row = &mut data[row * stride_bytes..row * stride_bytes + width as usize * 4];
        for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let argb = 0xff00_0000_u32
                | (u32::from(src[0]) << 16)
                | (u32::from(src[1]) << 8)
                | u32::from(src[2]);
            dst.copy_from_slice(&argb.to_ne_bytes());
        }
    }

    ImageSurface::create_for_data(data, Format::ARgb32, width as i32, height as i32, stride)
        .map_err(|err| map_backend_error("failed to wrap raster", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> PlotError {
    PlotError::InvalidData(format!("{prefix}: {err}"))
}
