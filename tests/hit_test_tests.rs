use cell_scatter::api::{LINE_HIT_TOLERANCE_PX, PlotConfig, ScatterPlot};
use cell_scatter::core::{LabelAnchor, LineSegment, Palette, PointData, ZoomWindow};
use cell_scatter::render::NullRenderer;

// 100x100 surface, radius 2: border 2 and one pixel per data unit, so a
// point at (x, y) lands on (x + 2, 98 - y).
fn cluster_plot() -> ScatterPlot<NullRenderer> {
    let coords = vec![
        10.0,
        10.0,
        11.0,
        10.0,
        13.0,
        10.0,
        50.0,
        50.0,
        f64::NAN,
        f64::NAN,
    ];
    let data = PointData::new(coords, vec![0, 0, 1, 1, 0], Palette::from_hex(&["aa0000", "00aa00"]))
        .expect("valid data")
        .with_labels(vec![
            LabelAnchor::new(50.0, 20.0, "T cells"),
            LabelAnchor::new(0.0, 60.0, "left edge label"),
        ]);
    let window = ZoomWindow::new(0.0, 96.0, 0.0, 96.0).expect("valid window");
    let mut plot = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(100, 100).with_radius(2))
        .expect("plot init");
    plot.load_points(data, Some(window)).expect("load");
    plot
}

#[test]
fn points_are_ordered_by_distance_to_the_pointer() {
    let plot = cluster_plot();
    assert_eq!(plot.pixel_coords().get(1), Some((13, 88)));

    let hits = plot.points_at(13.0, 88.0);
    assert_eq!(hits.as_slice(), &[1, 0, 2]);
}

#[test]
fn equal_distances_keep_index_order() {
    let plot = cluster_plot();
    let hits = plot.points_at(14.0, 88.0);
    assert_eq!(hits.as_slice(), &[1, 2, 0]);
}

#[test]
fn hit_box_is_the_radius_square() {
    let plot = cluster_plot();
    assert_eq!(plot.points_at(54.0, 50.0).as_slice(), &[3]);
    assert!(plot.points_at(55.0, 50.0).is_empty());
    assert!(plot.points_at(30.0, 30.0).is_empty());
}

#[test]
fn hidden_points_are_never_hit() {
    let plot = cluster_plot();
    assert_eq!(plot.pixel_coords().get(4), None);
    for y in [0.0, 50.0, 99.0] {
        assert!(!plot.points_at(50.0, y).contains(&4));
    }
}

#[test]
fn label_boxes_follow_text_width() {
    let plot = cluster_plot();
    // 7 glyphs at 0.6 * 16 px is 67 px wide, centered on x = 52.
    let label_box = plot.label_boxes()[0].expect("first label drawn");
    assert_eq!(label_box.index, 0);
    assert_eq!(label_box.x1, 17.0);
    assert_eq!(label_box.y1, 77.0);
    assert_eq!(label_box.x2, 86.0);
    assert_eq!(label_box.y2, 95.0);

    assert_eq!(plot.label_at(20.0, 80.0), Some((0, "T cells".to_owned())));
    assert_eq!(plot.label_at(10.0, 80.0), None);
}

#[test]
fn labels_starting_left_of_the_surface_are_skipped() {
    let plot = cluster_plot();
    assert!(plot.label_boxes()[1].is_none());
    assert_eq!(plot.label_at(2.0, 40.0), None);
}

#[test]
fn hidden_labels_cannot_be_hit() {
    let mut plot = cluster_plot();
    plot.set_show_labels(false);
    assert_eq!(plot.label_at(20.0, 80.0), None);
    plot.set_show_labels(true);
    assert!(plot.label_at(20.0, 80.0).is_some());
}

fn line_plot() -> ScatterPlot<NullRenderer> {
    let data = PointData::new(vec![0.0, 0.0, 100.0, 100.0], vec![0, 0], Palette::from_hex(&["000000"]))
        .expect("valid data")
        .with_lines(vec![
            LineSegment::new(200.0, 200.0, 300.0, 300.0),
            LineSegment::new(10.0, 50.0, 90.0, 50.0).with_label("trajectory"),
            LineSegment::new(50.0, 5.0, 50.0, 95.0),
        ]);
    let window = ZoomWindow::new(0.0, 100.0, 0.0, 100.0).expect("valid window");
    let mut plot = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(100, 100).with_radius(2))
        .expect("plot init");
    plot.load_points(data, Some(window)).expect("load");
    plot
}

#[test]
fn lines_outside_the_window_are_dropped_but_keep_their_source_index() {
    let plot = line_plot();
    let lines = plot.projected_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].source, 1);
    assert_eq!((lines[0].y1, lines[0].y2), (50, 50));
}

#[test]
fn line_hover_uses_a_small_pixel_tolerance() {
    let plot = line_plot();
    assert_eq!(plot.line_index_at(40.0, 51.0), Some(1));
    assert_eq!(plot.line_at(40.0, 51.0), Some("trajectory".to_owned()));

    let off = 50.0 + LINE_HIT_TOLERANCE_PX + 1.0;
    assert_eq!(plot.line_index_at(30.0, off), None);
    assert_eq!(plot.line_at(30.0, off), None);
}

#[test]
fn unlabeled_lines_are_hit_without_a_label() {
    let plot = line_plot();
    assert_eq!(plot.line_index_at(51.0, 20.0), Some(2));
    assert_eq!(plot.line_at(51.0, 20.0), None);
}
