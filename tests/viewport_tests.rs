use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use cell_scatter::PlotError;
use cell_scatter::api::{MAX_DERIVED_RADIUS, PlotConfig, ScatterPlot, ZoomOutcome, guess_radius};
use cell_scatter::core::{Palette, PointData, ZoomWindow};
use cell_scatter::extensions::PlotObserver;
use cell_scatter::interaction::DragMode;
use cell_scatter::render::NullRenderer;

struct RadiusRecorder(Rc<RefCell<Vec<(u32, f64)>>>);

impl PlotObserver for RadiusRecorder {
    fn id(&self) -> &str {
        "radius"
    }

    fn on_radius_alpha_change(&mut self, radius: u32, alpha: f64) {
        self.0.borrow_mut().push((radius, alpha));
    }
}

fn grid_plot() -> ScatterPlot<NullRenderer> {
    let mut coords = Vec::new();
    for x in 0..=10 {
        for y in 0..=10 {
            coords.push(f64::from(x));
            coords.push(f64::from(y));
        }
    }
    let colors = vec![0; coords.len() / 2];
    let data = PointData::new(coords, colors, Palette::from_hex(&["336699"])).expect("valid data");
    let window = ZoomWindow::new(0.0, 10.0, 0.0, 10.0).expect("valid window");
    let mut plot = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(100, 100).with_radius(5))
        .expect("plot init");
    plot.load_points(data, Some(window)).expect("load");
    plot
}

#[test]
fn radius_and_alpha_follow_the_zoom_law() {
    let mut plot = grid_plot();
    assert_eq!(plot.radius(), 5);
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.3 + 3.0 * 0.01 * 0.7);

    plot.zoom_by(4.0, None).expect("zoom");
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 4.0);
    assert_eq!(plot.radius(), 10);
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.3 + 3.0 * 0.04 * 0.7);

    plot.zoom_by(25.0, None).expect("zoom");
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 100.0, max_relative = 1e-9);
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.8);
}

#[test]
fn zero_base_radius_scales_from_a_fraction_of_a_pixel() {
    let data = PointData::new(vec![0.0, 0.0, 1.0, 1.0], vec![0, 0], Palette::from_hex(&["000000"]))
        .expect("valid data");
    let mut plot = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(100, 100).with_radius(0))
        .expect("plot init");
    plot.load_points(data, None).expect("load");
    assert_eq!(plot.radius(), 0);

    // floor(0.7 * sqrt(4)) = 1
    plot.zoom_by(4.0, None).expect("zoom");
    assert_eq!(plot.radius(), 1);
}

#[test]
fn out_of_range_zooms_are_rejected_without_side_effects() {
    let mut plot = grid_plot();
    let before = plot.window().expect("window");

    for factor in [0.005, 0.0, -2.0, f64::NAN, f64::INFINITY] {
        let outcome = plot.zoom_by(factor, None).expect("zoom call");
        assert_eq!(outcome, ZoomOutcome::Rejected, "factor {factor}");
        assert_eq!(plot.window(), Some(before));
    }

    plot.zoom_by(1000.0, None).expect("zoom");
    let outcome = plot.zoom_by(2.0, None).expect("zoom call");
    assert_eq!(outcome, ZoomOutcome::Rejected);
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1000.0, max_relative = 1e-9);
}

/// Applies `factor` until the first rejection and returns the number of
/// applied steps. Every applied step must move the zoom factor in the
/// factor's direction; the rejected one must leave the window alone.
fn zoom_until_rejected(plot: &mut ScatterPlot<NullRenderer>, factor: f64) -> usize {
    for step in 0..200 {
        let before_window = plot.window().expect("window");
        let before_zoom = plot.zoom_factor().expect("zoom");
        match plot.zoom_by(factor, None).expect("zoom call") {
            ZoomOutcome::Applied(_) => {
                let zoom = plot.zoom_factor().expect("zoom");
                if factor > 1.0 {
                    assert!(zoom > before_zoom, "step {step}: {zoom} <= {before_zoom}");
                } else {
                    assert!(zoom < before_zoom, "step {step}: {zoom} >= {before_zoom}");
                }
                assert!((0.01..=1500.0).contains(&zoom), "step {step}: {zoom}");
            }
            ZoomOutcome::Rejected => {
                assert_eq!(plot.window(), Some(before_window));
                assert_eq!(plot.zoom_factor(), Some(before_zoom));
                let next = before_zoom * factor;
                assert!(!(0.01..=1500.0).contains(&next), "rejected a valid zoom {next}");
                return step;
            }
        }
    }
    panic!("zoom never hit a limit");
}

#[test]
fn repeated_zoom_in_stops_at_the_ceiling() {
    let mut plot = grid_plot();
    let steps = zoom_until_rejected(&mut plot, 1.333);
    assert_eq!(steps, 25);
    let ceiling = plot.zoom_factor().expect("zoom");
    assert!(ceiling * 1.333 > 1500.0);

    let window = plot.window();
    assert_eq!(plot.zoom_by(1.333, None).expect("zoom call"), ZoomOutcome::Rejected);
    assert_eq!(plot.window(), window);
}

#[test]
fn repeated_zoom_out_stops_at_the_floor() {
    let mut plot = grid_plot();
    let steps = zoom_until_rejected(&mut plot, 1.0 / 1.333);
    assert_eq!(steps, 16);
    assert!(plot.zoom_factor().expect("zoom") >= 0.01);

    let window = plot.window();
    assert_eq!(plot.zoom_by(0.75, None).expect("zoom call"), ZoomOutcome::Rejected);
    assert_eq!(plot.window(), window);
}

#[test]
fn oversized_multipliers_are_clamped_and_draw_still_works() {
    let mut plot = grid_plot();
    plot.zoom_by(1000.0, None).expect("zoom");
    plot.set_radius_alpha_multipliers(1e12, 1.0).expect("multipliers");

    let viewport = plot.viewport().expect("viewport");
    assert_relative_eq!(viewport.radius_multiplier(), 3.0);
    assert_eq!(plot.radius(), MAX_DERIVED_RADIUS);

    let stats = plot.draw().expect("draw");
    assert_eq!(stats.points_drawn, 1);

    plot.set_radius_alpha_multipliers(1e-9, 1e9).expect("multipliers");
    let viewport = plot.viewport().expect("viewport");
    assert_relative_eq!(viewport.radius_multiplier(), 1.0 / 3.0);
    assert_relative_eq!(viewport.alpha_multiplier(), 1.8);
    plot.draw().expect("draw");
}

#[test]
fn zoom_pivot_keeps_its_data_position() {
    let mut plot = grid_plot();
    plot.zoom_by(2.0, Some((0.0, 100.0))).expect("zoom");
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 0.0);
    assert_relative_eq!(window.min_y, 0.0);
    assert_relative_eq!(window.max_x, 5.0);
    assert_relative_eq!(window.max_y, 5.0);
}

#[test]
fn zoom_to_uses_the_inverse_projection() {
    let mut plot = grid_plot();
    // border equals the radius (5), so the inner area is 90 px for 10 units
    plot.zoom_to(50.0, 50.0, 5.0, 95.0).expect("zoom");
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(window.max_x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(window.min_y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(window.max_y, 5.0, epsilon = 1e-9);

    let degenerate = plot.zoom_to(10.0, 10.0, 10.0, 40.0).expect("zoom call");
    assert_eq!(degenerate, ZoomOutcome::Rejected);
}

#[test]
fn zoom_100_restores_window_and_multipliers() {
    let mut plot = grid_plot();
    plot.zoom_by(3.0, Some((10.0, 20.0))).expect("zoom");
    plot.set_radius_alpha_multipliers(2.0, 0.5).expect("multipliers");
    plot.zoom_100().expect("reset");

    let viewport = plot.viewport().expect("viewport");
    assert_eq!(viewport.window(), viewport.init_window());
    assert_relative_eq!(viewport.radius_multiplier(), 1.0);
    assert_relative_eq!(viewport.alpha_multiplier(), 1.0);
    assert_eq!(plot.radius(), 5);
}

#[test]
fn move_by_translates_in_data_units() {
    let mut plot = grid_plot();
    plot.move_by(10.0, 20.0).expect("move");
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 1.0);
    assert_relative_eq!(window.max_x, 11.0);
    assert_relative_eq!(window.min_y, 2.0);
    assert_relative_eq!(window.max_y, 12.0);

    plot.move_percent(-0.5, 0.25).expect("move");
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, -4.0);
    assert_relative_eq!(window.min_y, 4.5);
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1.0);
}

#[test]
fn multipliers_scale_on_top_of_zoom_and_reset_independently() {
    let mut plot = grid_plot();
    plot.set_radius_alpha_multipliers(2.0, 2.0).expect("multipliers");
    assert_eq!(plot.radius(), 10);
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.642);

    plot.reset_radius().expect("reset radius");
    assert_eq!(plot.radius(), 5);
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.642);

    plot.reset_alpha().expect("reset alpha");
    assert_relative_eq!(plot.alpha().expect("alpha"), 0.321);

    let err = plot
        .set_radius_alpha_multipliers(0.0, 1.0)
        .expect_err("zero multiplier");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn radius_alpha_notifications_fire_only_on_change() {
    let mut plot = grid_plot();
    let seen = Rc::new(RefCell::new(Vec::new()));
    plot.register_observer(Box::new(RadiusRecorder(Rc::clone(&seen))))
        .expect("register");

    plot.move_by(5.0, 0.0).expect("move");
    assert!(seen.borrow().is_empty());

    plot.zoom_by(4.0, None).expect("zoom");
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, 10);
}

#[test]
fn reload_keeps_the_tuned_base_radius() {
    let mut plot = grid_plot();
    let data = PointData::new(vec![0.0, 0.0, 4.0, 4.0], vec![0, 0], Palette::from_hex(&["000000"]))
        .expect("valid data");
    plot.load_points(data, None).expect("reload");
    assert_eq!(plot.viewport().expect("viewport").base_radius(), 5);
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1.0);
}

#[test]
fn radius_guess_depends_on_point_count() {
    assert_eq!(guess_radius(100), 5);
    assert_eq!(guess_radius(4_001), 4);
    assert_eq!(guess_radius(10_001), 2);
    assert_eq!(guess_radius(50_001), 0);
    assert_eq!(guess_radius(50_000), 2);
}

#[test]
fn drag_mode_switches_are_remembered_for_zoom() {
    let mut plot = grid_plot();
    assert_eq!(plot.drag_mode(), DragMode::Select);
    plot.set_drag_mode(DragMode::Move);
    assert_eq!(plot.drag_mode(), DragMode::Move);
}
