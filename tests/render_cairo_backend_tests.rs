#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use cell_scatter::PlotError;
use cell_scatter::api::{PlotConfig, ScatterPlot};
use cell_scatter::core::{LabelAnchor, Palette, PointData};
use cell_scatter::render::CairoRenderer;

fn labeled_data() -> PointData {
    PointData::new(
        vec![10.0, 10.0, 20.0, 20.0, 40.0, 15.0],
        vec![0, 1, 1],
        Palette::from_hex(&["1f77b4", "ff7f0e"]),
    )
    .expect("valid data")
    .with_labels(vec![LabelAnchor::new(20.0, 15.0, "cluster")])
    .with_annotations(vec![LabelAnchor::new(30.0, 12.0, "note")])
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn cairo_renderer_paints_raster_and_labels() {
    let renderer = CairoRenderer::new(600, 400).expect("renderer");
    let mut plot = ScatterPlot::new(renderer, PlotConfig::new(600, 400).with_radius(4))
        .expect("plot init");
    plot.load_points(labeled_data(), None).expect("load");

    plot.draw().expect("draw");
    let renderer = plot.into_renderer();
    let stats = renderer.last_stats();

    assert_eq!(stats.points_drawn, 3);
    assert_eq!(stats.texts_drawn, 2);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(320, 240).expect("renderer");
    let mut plot = ScatterPlot::new(renderer, PlotConfig::new(320, 240)).expect("plot init");
    plot.load_points(labeled_data(), None).expect("load");

    let surface = ImageSurface::create(Format::ARgb32, 320, 240).expect("surface");
    let context = Context::new(&surface).expect("context");
    let err = plot
        .render_on_cairo_context(&context)
        .expect_err("nothing drawn yet");
    assert!(matches!(err, PlotError::NotLoaded));

    plot.draw().expect("draw");
    plot.render_on_cairo_context(&context)
        .expect("render on external context");
    assert_eq!(plot.renderer().last_stats().texts_drawn, 2);
}
