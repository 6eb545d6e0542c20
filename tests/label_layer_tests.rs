use cell_scatter::PlotError;
use cell_scatter::api::{PlotConfig, ScatterPlot};
use cell_scatter::core::{LabelAnchor, Palette, PointData, ProjectedLabel, ZoomWindow};
use cell_scatter::render::{Color, DrawMode, NullRenderer, TextStyle};

// 200x200 surface over 0..100 with radius 0: two pixels per data unit and
// no border.
fn two_cluster_plot() -> ScatterPlot<NullRenderer> {
    let coords = vec![
        10.0, 10.0, 20.0, 20.0, 30.0, 30.0, 60.0, 60.0, 70.0, 70.0, 80.0, 80.0,
    ];
    let data = PointData::new(coords, vec![0, 0, 0, 1, 1, 1], Palette::from_hex(&["aa0000", "0000aa"]))
        .expect("valid data");
    let window = ZoomWindow::new(0.0, 100.0, 0.0, 100.0).expect("valid window");
    let config = PlotConfig::new(200, 200)
        .with_radius(0)
        .with_draw_mode(DrawMode::Sprite);
    let mut plot = ScatterPlot::new(NullRenderer::default(), config).expect("plot init");
    plot.load_points(data, Some(window)).expect("load");
    plot
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn category_labels_sit_on_the_median_of_each_cluster() {
    let mut plot = two_cluster_plot();
    let placed = plot.set_category_labels(&names(&["A", "B"])).expect("labels");
    assert_eq!(placed, 2);

    assert_eq!(
        plot.projected_labels()[0],
        Some(ProjectedLabel {
            x: 40,
            y: 160,
            text: "A".to_owned(),
        })
    );
    assert_eq!(plot.projected_labels()[1].as_ref().map(|label| (label.x, label.y)), Some((140, 60)));

    // one glyph is 9.6 px, rounded to 10 and centered on x = 40
    let label_box = plot.label_boxes()[0].expect("drawn");
    assert_eq!((label_box.x1, label_box.y1, label_box.x2, label_box.y2), (34.0, 159.0, 46.0, 177.0));
    assert_eq!(plot.label_at(40.0, 165.0), Some((0, "A".to_owned())));
}

#[test]
fn missing_names_fall_back_to_the_category_number() {
    let mut plot = two_cluster_plot();
    plot.set_category_labels(&[]).expect("labels");
    let texts: Vec<&str> = plot.texts().iter().map(|text| text.text.as_str()).collect();
    assert_eq!(texts, vec!["0", "1"]);
}

#[test]
fn clusters_without_visible_points_get_no_label() {
    let mut plot = two_cluster_plot();
    plot.select_by_color(1).expect("select");
    plot.hide_selected().expect("hide");
    assert_eq!(plot.set_category_labels(&names(&["A", "B"])).expect("labels"), 1);
}

#[test]
fn labels_use_a_halo_and_annotations_stay_plain() {
    let mut plot = two_cluster_plot();
    plot.set_category_labels(&names(&["A", "B"])).expect("labels");
    plot.set_annotations(vec![LabelAnchor::new(50.0, 50.0, "note")])
        .expect("annotations");

    let texts = plot.texts();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0].style, TextStyle::Halo);
    assert_eq!(texts[0].color, Color::rgba(0.0, 0.0, 0.0, 0.8));
    assert_eq!(texts[2].text, "note");
    assert_eq!(texts[2].style, TextStyle::Plain);
    assert_eq!(texts[2].color, Color::rgb(0.0, 0.0, 0.0));
    assert_eq!(plot.label_boxes().len(), 2);

    plot.draw().expect("draw");
    assert_eq!(plot.renderer().last_text_count, 3);
}

#[test]
fn hiding_labels_keeps_annotations_and_ends_emphasis() {
    let mut plot = two_cluster_plot();
    plot.set_category_labels(&names(&["A", "B"])).expect("labels");
    plot.set_annotations(vec![LabelAnchor::new(50.0, 50.0, "note")])
        .expect("annotations");
    plot.set_emphasis(Some(1)).expect("emphasis");

    plot.set_show_labels(false);
    assert!(!plot.show_labels());
    assert_eq!(plot.emphasis(), None);
    assert!(plot.label_boxes().is_empty());
    assert_eq!(plot.texts().len(), 1);
    assert_eq!(plot.label_at(40.0, 165.0), None);

    plot.set_show_labels(true);
    assert_eq!(plot.texts().len(), 3);
}

#[test]
fn label_texts_are_replaced_in_order() {
    let mut plot = two_cluster_plot();
    plot.set_category_labels(&names(&["A", "B"])).expect("labels");
    plot.set_label_texts(names(&["first", "second"])).expect("rename");
    assert_eq!(plot.label_at(40.0, 165.0).map(|(_, text)| text), Some("first".to_owned()));

    let err = plot.set_label_texts(names(&["only one"])).expect_err("count mismatch");
    assert!(matches!(err, PlotError::InvalidData(_)));
}

#[test]
fn replacing_labels_reports_whether_labels_existed() {
    let mut plot = two_cluster_plot();
    let had = plot
        .set_labels(vec![LabelAnchor::new(50.0, 50.0, "center")])
        .expect("labels");
    assert!(!had);
    let had = plot.set_labels(Vec::new()).expect("labels");
    assert!(had);
    assert!(plot.texts().is_empty());
}

#[test]
fn labels_follow_the_zoom() {
    let mut plot = two_cluster_plot();
    plot.set_category_labels(&names(&["A", "B"])).expect("labels");
    plot.zoom_by(2.0, Some((0.0, 200.0))).expect("zoom");
    // window is now 0..50, the B cluster median at (70, 70) is outside
    assert!(plot.projected_labels()[1].is_none());
    assert!(plot.label_boxes()[1].is_none());
    assert_eq!(plot.projected_labels()[0].as_ref().map(|label| (label.x, label.y)), Some((80, 120)));
}
