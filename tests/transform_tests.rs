use approx::assert_abs_diff_eq;
use cell_scatter::PlotError;
use cell_scatter::api::{PlotConfig, ScatterPlot};
use cell_scatter::core::{
    HIDDEN_DATA_COORD, HIDDEN_PIXEL, LabelAnchor, Projection, SurfaceSize, ZoomWindow,
    project_labels, project_points,
};
use cell_scatter::render::NullRenderer;

fn unit_projection(border: u32) -> Projection {
    let window = ZoomWindow::new(-50.0, 50.0, 0.0, 200.0).expect("valid window");
    Projection::new(window, SurfaceSize::new(400, 300), border).expect("valid projection")
}

#[test]
fn projection_flips_y_and_respects_the_border() {
    let projection = unit_projection(4);
    assert_eq!(projection.project(-50.0, 0.0), Some((4, 296)));
    assert_eq!(projection.project(50.0, 200.0), Some((396, 4)));
    assert_eq!(projection.project(0.0, 100.0), Some((200, 150)));
}

#[test]
fn points_outside_the_window_and_hidden_points_get_the_sentinel() {
    let projection = unit_projection(0);
    let coords = [
        0.0,
        100.0,
        60.0,
        100.0,
        HIDDEN_DATA_COORD,
        HIDDEN_DATA_COORD,
        0.0,
        -1.0,
    ];
    let pixels = project_points(&coords, &projection);

    assert_eq!(pixels.len(), 4);
    assert!(pixels.get(0).is_some());
    assert_eq!(pixels.get(1), None);
    assert_eq!(pixels.get(2), None);
    assert_eq!(pixels.get(3), None);
    assert_eq!(&pixels.as_raw()[2..4], &[HIDDEN_PIXEL, HIDDEN_PIXEL]);
    assert_eq!(pixels.visible_count(), 1);
}

#[test]
fn unproject_inverts_project_within_one_pixel() {
    let projection = unit_projection(3);
    let (dx, dy) = projection.data_per_pixel();
    for &(x, y) in &[(-49.5, 0.25), (12.3, 45.6), (49.9, 199.0)] {
        let (px, py) = projection.project(x, y).expect("inside window");
        let back = projection.unproject(f64::from(px), f64::from(py));
        assert_abs_diff_eq!(back.x, x, epsilon = dx);
        assert_abs_diff_eq!(back.y, y, epsilon = dy);
    }
}

#[test]
fn labels_outside_the_window_keep_their_slot() {
    let projection = unit_projection(0);
    let labels = vec![
        LabelAnchor::new(0.0, 100.0, "inside"),
        LabelAnchor::new(500.0, 100.0, "outside"),
        LabelAnchor::new(-50.0, 0.0, "corner"),
    ];
    let projected = project_labels(&labels, &projection);

    assert_eq!(projected.len(), 3);
    assert_eq!(projected[0].as_ref().map(|l| l.text.as_str()), Some("inside"));
    assert!(projected[1].is_none());
    assert_eq!(projected[2].as_ref().map(|l| (l.x, l.y)), Some((0, 300)));
}

#[test]
fn degenerate_bounds_are_widened_around_the_value() {
    let window =
        ZoomWindow::from_coords(&[3.0, 7.0, 3.0, 9.0, HIDDEN_DATA_COORD, HIDDEN_DATA_COORD])
            .expect("bounds");
    assert_eq!((window.min_x, window.max_x), (2.5, 3.5));
    assert_eq!((window.min_y, window.max_y), (7.0, 9.0));

    let all_hidden = ZoomWindow::from_coords(&[HIDDEN_DATA_COORD, HIDDEN_DATA_COORD]);
    assert!(matches!(all_hidden, Err(PlotError::InvalidData(_))));
}

#[test]
fn surfaces_at_the_pixel_sentinel_are_rejected() {
    let err = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(65_535, 10))
        .err()
        .expect("surface should be rejected");
    assert!(matches!(
        err,
        PlotError::InvalidSurface {
            width: 65_535,
            height: 10
        }
    ));
    assert!(SurfaceSize::new(65_534, 10).is_valid());
    assert!(!SurfaceSize::new(0, 10).is_valid());
}

#[test]
fn square_aspect_grows_the_shorter_axis() {
    let window = ZoomWindow::new(0.0, 10.0, 0.0, 10.0).expect("valid window");
    let square = window.with_square_aspect(200, 100);
    assert_eq!((square.min_y, square.max_y), (0.0, 10.0));
    assert_eq!((square.min_x, square.max_x), (-5.0, 15.0));
}
