//! Vector export of the current view as a standalone SVG document.

use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ProjectedLabel, Rgb, SurfaceSize, ZoomWindow};
use crate::error::{PlotError, PlotResult};
use crate::render::point_renderers::{DrawStats, OVERDRAW_ALPHA, PointDrawInput};
use crate::render::sprite_atlas::{SELECTION_RING_WIDTH, emphasized_radius};

const LEGEND_SWATCH_PX: u32 = 15;
const AXIS_STROKE_PX: u32 = 2;

/// One category row of the exported legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendRow {
    pub label: String,
    pub color: Rgb,
    pub count: usize,
}

/// Legend drawn to the right of the plot area.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub rows: Vec<LegendRow>,
}

/// Everything the exporter reads.
#[derive(Debug, Clone, Copy)]
pub struct SvgScene<'a> {
    pub points: PointDrawInput<'a>,
    pub surface: SurfaceSize,
    /// Already filtered by the label visibility toggle.
    pub labels: &'a [Option<ProjectedLabel>],
    pub init_window: ZoomWindow,
    pub font_size_px: f64,
    pub legend: Option<&'a Legend>,
    pub legend_width: u32,
}

/// Renders the scene. Circles follow the reference renderer's colors and
/// drawing order.
pub fn render_svg(scene: &SvgScene<'_>) -> PlotResult<(String, DrawStats)> {
    let mut out = String::new();
    let stats = write_svg(&mut out, scene)
        .map_err(|err| PlotError::InvalidData(format!("failed to write svg: {err}")))?;
    debug!(
        bytes = out.len(),
        points = stats.points_drawn,
        legend = scene.legend.is_some(),
        "svg exported"
    );
    Ok((out, stats))
}

fn write_svg(out: &mut String, scene: &SvgScene<'_>) -> Result<DrawStats, fmt::Error> {
    let plot_width = scene.surface.width;
    let plot_height = scene.surface.height;
    let legend_width = if scene.legend.is_some() {
        scene.legend_width
    } else {
        0
    };
    let height = scene
        .legend
        .map_or(plot_height, |legend| plot_height.max(legend_height(legend, scene.font_size_px)));

    writeln!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'>",
        plot_width + legend_width,
        height
    )?;
    let stats = write_circles(out, &scene.points)?;
    write_labels(out, scene)?;
    write_axes(out, scene)?;
    if let Some(legend) = scene.legend {
        write_legend(out, legend, scene)?;
    }
    writeln!(out, "</svg>")?;
    Ok(stats)
}

fn write_circles(out: &mut String, input: &PointDrawInput<'_>) -> Result<DrawStats, fmt::Error> {
    let mut stats = DrawStats::default();
    let radius = input.radius;

    for zero_pass in [true, false] {
        for (index, x, y) in input.pixels.iter_visible() {
            let category = input.colors.get(index).copied().unwrap_or(0);
            if (category == 0) != zero_pass {
                continue;
            }
            let fill = input.circle_fill(category).rgb(input.palette);
            writeln!(
                out,
                "<circle cx='{x}' cy='{y}' r='{radius}' fill-opacity='{}' fill='#{}' />",
                input.alpha,
                fill.to_hex()
            )?;
            stats.points_drawn += 1;
        }
    }

    if let Some(emphasized) = input.emphasis {
        let enlarged = emphasized_radius(radius);
        let fill = input.palette.color(emphasized).to_hex();
        for (index, x, y) in input.pixels.iter_visible() {
            if input.colors.get(index) != Some(&emphasized) {
                continue;
            }
            writeln!(
                out,
                "<circle cx='{x}' cy='{y}' r='{enlarged}' fill-opacity='{}' fill='#{fill}' />",
                input.alpha
            )?;
            stats.emphasis_overdraw += 1;
        }
    }

    for id in input.selection.iter() {
        let index = id as usize;
        let Some((x, y)) = input.pixels.get(index) else {
            continue;
        };
        let category = input.colors.get(index).copied().unwrap_or(0);
        writeln!(
            out,
            "<circle cx='{x}' cy='{y}' r='{radius}' fill-opacity='{OVERDRAW_ALPHA}' fill='#{}' \
             stroke='black' stroke-width='{SELECTION_RING_WIDTH}' />",
            input.palette.color(category).to_hex()
        )?;
        stats.selection_overdraw += 1;
    }

    Ok(stats)
}

fn write_labels(out: &mut String, scene: &SvgScene<'_>) -> fmt::Result {
    let width = i64::from(scene.surface.width);
    let height = i64::from(scene.surface.height);
    for label in scene.labels.iter().flatten() {
        let (x, y) = (i64::from(label.x), i64::from(label.y));
        if x < 0 || y < 0 || x > width || y > height {
            continue;
        }
        writeln!(
            out,
            "<text font-family='sans-serif' font-size='{}' fill='black' text-anchor='middle' \
             x='{x}' y='{y}'>{}</text>",
            scene.font_size_px + 2.0,
            escape_xml(&label.text)
        )?;
    }
    Ok(())
}

fn write_axes(out: &mut String, scene: &SvgScene<'_>) -> fmt::Result {
    let width = scene.surface.width;
    let height = scene.surface.height;
    let font = scene.font_size_px;
    writeln!(
        out,
        "<line x1='2' y1='2' x2='2' y2='{height}' stroke='black' stroke-width='{AXIS_STROKE_PX}'/>"
    )?;
    writeln!(
        out,
        "<line x1='2' y1='2' x2='{width}' y2='2' stroke='black' stroke-width='{AXIS_STROKE_PX}'/>"
    )?;

    let init = scene.init_window;
    let extents = [
        (10.0, font + 20.0, init.min_y),
        (10.0, f64::from(height) - font - 2.0, init.max_y),
        (10.0, font + 3.0, init.min_x),
        (f64::from(width) - 40.0, font + 3.0, init.max_x),
    ];
    for (x, y, value) in extents {
        writeln!(
            out,
            "<text font-family='sans-serif' font-size='{font}' fill='black' x='{x}' y='{y}'>{value}</text>"
        )?;
    }
    Ok(())
}

fn write_legend(out: &mut String, legend: &Legend, scene: &SvgScene<'_>) -> fmt::Result {
    let left = f64::from(scene.surface.width);
    let line_height = scene.font_size_px;
    let row_font = scene.font_size_px - 3.0;
    let x = left + 11.0;
    let mut y = line_height;

    writeln!(
        out,
        "<text font-family='sans-serif' font-size='{line_height}' fill='black' x='{x}' y='{y}'>{}</text>",
        escape_xml(&legend.title)
    )?;
    y += line_height;
    if let Some(subtitle) = legend.subtitle.as_deref().filter(|s| !s.is_empty()) {
        writeln!(
            out,
            "<text font-family='sans-serif' font-size='{line_height}' fill='black' x='{x}' y='{y}'>{}</text>",
            escape_xml(subtitle)
        )?;
        y += line_height;
    }
    y += line_height;

    let total: usize = legend.rows.iter().map(|row| row.count).sum();
    let right = left + f64::from(scene.legend_width) - 3.0;
    for row in legend.rows.iter().filter(|row| row.count > 0) {
        let percent = 100.0 * row.count as f64 / total as f64;
        writeln!(
            out,
            "<rect width='{LEGEND_SWATCH_PX}' height='{LEGEND_SWATCH_PX}' fill='#{}' x='{x}' y='{y}'></rect>",
            row.color.to_hex()
        )?;
        writeln!(
            out,
            "<text font-family='sans-serif' font-size='{row_font}' fill='black' text-anchor='start' \
             x='{}' y='{}'>{}</text>",
            x + 18.0,
            y + 8.0,
            escape_xml(&legend_label(&row.label))
        )?;
        writeln!(
            out,
            "<text font-family='sans-serif' font-size='{row_font}' fill='black' text-anchor='end' \
             x='{right}' y='{}'>{}%</text>",
            y + 15.0,
            format_percent(percent)
        )?;
        y += row_font;
    }
    Ok(())
}

fn legend_height(legend: &Legend, font_size_px: f64) -> u32 {
    let header_lines = if legend.subtitle.is_some() { 3.0 } else { 2.0 };
    let rows = legend.rows.iter().filter(|row| row.count > 0).count() as f64;
    (font_size_px * (header_lines + 1.0) + rows * (font_size_px - 3.0)).ceil() as u32
}

/// Display form of a category name: underscores become spaces, blank names
/// become `(empty)`.
#[must_use]
pub fn legend_label(raw: &str) -> String {
    let label = raw.replace('_', " ");
    let label = label.trim();
    if label.is_empty() {
        "(empty)".to_owned()
    } else {
        label.to_owned()
    }
}

/// Two decimals below 1 %, one otherwise.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    let precision = if percent < 1.0 { 2 } else { 1 };
    format!("{percent:.precision$}")
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
