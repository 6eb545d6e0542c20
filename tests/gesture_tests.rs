use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use cell_scatter::api::{PlotConfig, ScatterPlot, wheel_zoom_factor};
use cell_scatter::core::{LabelAnchor, LineSegment, Palette, PointData, ZoomWindow};
use cell_scatter::extensions::{PlotEvent, PlotObserver, SelectionEvent, SelectionOrigin};
use cell_scatter::interaction::{DragMode, Marquee, Modifiers};
use cell_scatter::render::NullRenderer;

struct EventLog(Rc<RefCell<Vec<PlotEvent>>>);

impl PlotObserver for EventLog {
    fn id(&self) -> &str {
        "log"
    }

    fn on_event(&mut self, event: &PlotEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

// One pixel per data unit behind a 2 px border: (x, y) lands on (x + 2, 98 - y).
fn gesture_plot() -> (ScatterPlot<NullRenderer>, Rc<RefCell<Vec<PlotEvent>>>) {
    let data = PointData::new(
        vec![10.0, 10.0, 50.0, 50.0, 80.0, 20.0],
        vec![0, 1, 1],
        Palette::from_hex(&["aa0000", "00aa00"]),
    )
    .expect("valid data")
    .with_labels(vec![LabelAnchor::new(30.0, 80.0, "L")])
    .with_lines(vec![LineSegment::new(0.0, 48.0, 96.0, 48.0).with_label("path")]);
    let window = ZoomWindow::new(0.0, 96.0, 0.0, 96.0).expect("valid window");
    let mut plot = ScatterPlot::new(NullRenderer::default(), PlotConfig::new(100, 100).with_radius(2))
        .expect("plot init");
    plot.load_points(data, Some(window)).expect("load");

    let log = Rc::new(RefCell::new(Vec::new()));
    plot.register_observer(Box::new(EventLog(Rc::clone(&log))))
        .expect("register");
    (plot, log)
}

fn click(plot: &mut ScatterPlot<NullRenderer>, x: f64, y: f64) {
    plot.pointer_down(x, y, Modifiers::NONE).expect("down");
    plot.pointer_up(x, y).expect("up");
}

fn drag(plot: &mut ScatterPlot<NullRenderer>, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    plot.pointer_down(from.0, from.1, modifiers).expect("down");
    plot.pointer_move(to.0, to.1).expect("move");
    plot.pointer_up(to.0, to.1).expect("up");
}

fn selection_origins(log: &[PlotEvent]) -> Vec<SelectionOrigin> {
    log.iter()
        .filter_map(|event| match event {
            PlotEvent::SelectionChanged(SelectionEvent { origin, .. }) => Some(*origin),
            _ => None,
        })
        .collect()
}

#[test]
fn clicking_a_point_selects_it_and_redraws() {
    let (mut plot, log) = gesture_plot();
    click(&mut plot, 52.0, 48.0);

    assert_eq!(plot.selection(), vec![1]);
    assert_eq!(plot.renderer().frames_rendered, 1);
    let log = log.borrow();
    assert!(log.contains(&PlotEvent::PointClick { ids: vec![1] }));
    assert_eq!(selection_origins(&log), vec![SelectionOrigin::PointClick]);
}

#[test]
fn clicking_the_background_clears_the_selection() {
    let (mut plot, log) = gesture_plot();
    plot.select_set(&[0, 2]).expect("select");
    click(&mut plot, 70.0, 5.0);

    assert!(plot.selection().is_empty());
    assert_eq!(plot.status(), "");
    assert_eq!(
        selection_origins(&log.borrow()),
        vec![SelectionOrigin::Programmatic, SelectionOrigin::BackgroundClick]
    );
}

#[test]
fn second_click_on_the_same_spot_zooms_in() {
    let (mut plot, log) = gesture_plot();
    click(&mut plot, 52.0, 48.0);
    click(&mut plot, 52.0, 48.0);
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1.33, max_relative = 1e-9);

    // zoomed around the surface center, not the pointer
    let window = plot.window().expect("window");
    assert_relative_eq!((window.min_x + window.max_x) / 2.0, 48.0, epsilon = 1e-9);
    assert_relative_eq!((window.min_y + window.max_y) / 2.0, 48.0, epsilon = 1e-9);

    // the click itself is still handled after the zoom
    let clicks = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, PlotEvent::PointClick { .. }))
        .count();
    assert_eq!(clicks, 2);
    assert_eq!(plot.selection(), vec![1]);

    // a third click starts a new pair
    click(&mut plot, 52.0, 48.0);
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1.33, max_relative = 1e-9);
}

#[test]
fn clicking_a_label_reports_it_without_touching_the_selection() {
    let (mut plot, log) = gesture_plot();
    plot.select_set(&[2]).expect("select");
    click(&mut plot, 30.0, 25.0);

    assert_eq!(plot.selection(), vec![2]);
    assert!(log.borrow().contains(&PlotEvent::LabelClick {
        index: 0,
        text: "L".to_owned(),
    }));
}

#[test]
fn marquee_drag_replaces_or_extends_the_selection() {
    let (mut plot, log) = gesture_plot();
    plot.pointer_down(0.0, 0.0, Modifiers::NONE).expect("down");
    plot.pointer_move(60.0, 60.0).expect("move");
    assert_eq!(
        plot.marquee(),
        Some(Marquee {
            left: 0.0,
            top: 0.0,
            width: 60.0,
            height: 60.0,
        })
    );
    plot.pointer_up(60.0, 60.0).expect("up");
    assert_eq!(plot.marquee(), None);
    assert_eq!(plot.selection(), vec![1]);

    let shift = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    drag(&mut plot, (70.0, 70.0), (90.0, 95.0), shift);
    assert_eq!(plot.selection(), vec![1, 2]);

    drag(&mut plot, (70.0, 70.0), (90.0, 95.0), Modifiers::NONE);
    assert_eq!(plot.selection(), vec![2]);
    assert!(selection_origins(&log.borrow())
        .iter()
        .all(|origin| *origin == SelectionOrigin::Marquee));
}

#[test]
fn zoom_drag_keeps_the_surface_aspect_and_restores_the_mode() {
    let (mut plot, _log) = gesture_plot();
    plot.set_drag_mode(DragMode::Zoom);
    plot.pointer_down(2.0, 2.0, Modifiers::NONE).expect("down");
    plot.pointer_move(50.0, 10.0).expect("move");
    let marquee = plot.marquee().expect("marquee");
    assert_relative_eq!(marquee.height, 48.0);

    plot.pointer_up(50.0, 10.0).expect("up");
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(window.max_x, 48.0, epsilon = 1e-9);
    assert_relative_eq!(window.max_y, 96.0, epsilon = 1e-9);
    assert_relative_eq!(window.min_y, 48.0, epsilon = 1e-9);
    assert_eq!(plot.drag_mode(), DragMode::Select);
}

#[test]
fn meta_drag_zooms_regardless_of_mode() {
    let (mut plot, _log) = gesture_plot();
    let meta = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    drag(&mut plot, (10.0, 10.0), (60.0, 30.0), meta);
    assert!(plot.zoom_factor().expect("zoom") > 1.5);
    assert!(plot.selection().is_empty());
}

#[test]
fn pan_previews_then_commits_the_translation() {
    let (mut plot, _log) = gesture_plot();
    plot.set_drag_mode(DragMode::Move);
    plot.draw().expect("draw");
    let before = plot.window().expect("window");

    plot.pointer_down(50.0, 50.0, Modifiers::NONE).expect("down");
    plot.pointer_move(40.0, 50.0).expect("move");
    assert!(plot.is_panning());
    assert_eq!(plot.window(), Some(before));

    plot.pointer_up(40.0, 60.0).expect("up");
    assert!(!plot.is_panning());
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 9.6, epsilon = 1e-9);
    assert_relative_eq!(window.min_y, 9.6, epsilon = 1e-9);
}

#[test]
fn wheel_zoom_is_centered_on_the_pointer() {
    let (mut plot, _log) = gesture_plot();
    assert_relative_eq!(wheel_zoom_factor(-1.0, Modifiers::NONE), 1.1);
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    assert_relative_eq!(wheel_zoom_factor(-1.0, ctrl), 1.08);

    let outcome = plot.wheel(0.0, 100.0, -1.0, Modifiers::NONE).expect("wheel");
    assert!(outcome.is_applied());
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 1.1, max_relative = 1e-9);
    let window = plot.window().expect("window");
    assert_relative_eq!(window.min_x, 0.0);
    assert_relative_eq!(window.min_y, 0.0);
    assert_eq!(plot.renderer().frames_rendered, 1);
}

#[test]
fn large_wheel_deltas_scale_the_span_linearly() {
    let (mut plot, _log) = gesture_plot();
    assert_relative_eq!(wheel_zoom_factor(12.0, Modifiers::NONE), 1.0 / 2.2);
    assert_relative_eq!(wheel_zoom_factor(-12.0, Modifiers::NONE), 2.2);

    let outcome = plot.wheel(0.0, 100.0, 9.5, Modifiers::NONE).expect("wheel");
    assert!(outcome.is_applied());
    assert_relative_eq!(plot.window().expect("window").span_x(), 96.0 * 1.95, max_relative = 1e-9);

    for delta in [10.0, 12.0, 40.0] {
        plot.zoom_100().expect("reset");
        let outcome = plot.wheel(50.0, 50.0, delta, Modifiers::NONE).expect("wheel");
        assert!(outcome.is_applied(), "delta {delta}");
        assert_relative_eq!(
            plot.zoom_factor().expect("zoom"),
            1.0 / (1.0 + 0.1 * delta),
            max_relative = 1e-9
        );
    }

    plot.zoom_100().expect("reset");
    let outcome = plot.wheel(50.0, 50.0, -12.0, Modifiers::NONE).expect("wheel");
    assert!(outcome.is_applied());
    assert_relative_eq!(plot.zoom_factor().expect("zoom"), 2.2, max_relative = 1e-9);
}

#[test]
fn hover_fires_once_the_pointer_rests() {
    let (mut plot, log) = gesture_plot();
    plot.pointer_move(52.0, 48.0).expect("move");
    assert_eq!(plot.cursor(), (52.0, 48.0));
    assert!(plot.advance_hover_timer(Duration::from_millis(100)).is_none());
    let hits = plot
        .advance_hover_timer(Duration::from_millis(30))
        .expect("timer fired");
    assert_eq!(hits.as_slice(), &[1]);
    assert!(plot.advance_hover_timer(Duration::from_millis(500)).is_none());

    plot.pointer_move(70.0, 5.0).expect("move");
    plot.advance_hover_timer(Duration::from_millis(130));

    plot.select_set(&[0]).expect("select");
    plot.pointer_move(70.0, 6.0).expect("move");
    plot.advance_hover_timer(Duration::from_millis(130));

    let hovers: Vec<PlotEvent> = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, PlotEvent::PointHover { .. } | PlotEvent::NoPointHover))
        .cloned()
        .collect();
    assert_eq!(
        hovers,
        vec![
            PlotEvent::PointHover { ids: vec![1] },
            PlotEvent::NoPointHover,
            PlotEvent::PointHover { ids: Vec::new() },
        ]
    );
}

#[test]
fn pressing_cancels_a_pending_hover() {
    let (mut plot, _log) = gesture_plot();
    plot.pointer_move(52.0, 48.0).expect("move");
    plot.pointer_down(52.0, 48.0, Modifiers::NONE).expect("down");
    assert!(plot.advance_hover_timer(Duration::from_millis(500)).is_none());
}

#[test]
fn label_hover_reports_transitions_only() {
    let (mut plot, log) = gesture_plot();
    plot.pointer_move(30.0, 25.0).expect("move");
    plot.pointer_move(31.0, 25.0).expect("move");
    assert_eq!(plot.hovered_label(), Some(0));
    plot.pointer_move(70.0, 5.0).expect("move");
    assert_eq!(plot.hovered_label(), None);

    let label_events: Vec<PlotEvent> = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, PlotEvent::LabelHover { .. } | PlotEvent::NoLabelHover))
        .cloned()
        .collect();
    assert_eq!(
        label_events,
        vec![
            PlotEvent::LabelHover {
                index: 0,
                text: "L".to_owned(),
            },
            PlotEvent::NoLabelHover,
        ]
    );
}

#[test]
fn line_hover_reports_the_label_under_the_pointer() {
    let (mut plot, log) = gesture_plot();
    // lines are projected without the border, y = 48 lands on row 50
    plot.pointer_move(20.0, 50.0).expect("move");
    plot.pointer_move(21.0, 51.0).expect("move");
    plot.pointer_move(20.0, 58.0).expect("move");

    let line_events: Vec<PlotEvent> = log
        .borrow()
        .iter()
        .filter(|event| matches!(event, PlotEvent::LineHover { .. }))
        .cloned()
        .collect();
    assert_eq!(
        line_events,
        vec![
            PlotEvent::LineHover {
                label: Some("path".to_owned()),
            },
            PlotEvent::LineHover { label: None },
        ]
    );
}

#[test]
fn release_without_press_is_ignored() {
    let (mut plot, log) = gesture_plot();
    plot.pointer_up(52.0, 48.0).expect("up");
    assert!(plot.selection().is_empty());
    assert!(log.borrow().is_empty());
}
