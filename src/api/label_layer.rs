use tracing::debug;

use crate::core::ProjectedLabel;
use crate::error::{PlotError, PlotResult};
use crate::render::{Color, Renderer, TextMetrics, TextPrimitive, TextStyle};

use super::ScatterPlot;

const LABEL_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.8);
const ANNOTATION_COLOR: Color = Color::rgb(0.0, 0.0, 0.0);

/// Click box of one drawn cluster label, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBox {
    /// Index into the label list.
    pub index: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LabelBox {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Top-left text position of a label centered on its anchor, or `None` when
/// that corner is off the surface.
fn place_label(
    label: &ProjectedLabel,
    metrics: &dyn TextMetrics,
    font_size_px: f64,
    surface_width: f64,
    surface_height: f64,
) -> Option<(f64, f64, f64)> {
    let width = metrics.text_width(&label.text, font_size_px).round();
    let left = f64::from(label.x) - (width * 0.5).round();
    let top = f64::from(label.y);
    if left < 0.0 || top < 0.0 || left > surface_width || top > surface_height {
        return None;
    }
    Some((left, top, width))
}

impl<R: Renderer> ScatterPlot<R> {
    /// Rebuilds label text primitives and click boxes from the projected
    /// labels and annotations.
    pub(super) fn layout_labels(&mut self) {
        self.label_boxes.clear();
        self.texts.clear();
        let font = self.config.font_size_px;
        let margin = self.config.label_margin_px;
        let width = f64::from(self.config.surface.width);
        let height = f64::from(self.config.surface.height);
        let metrics = self.text_metrics.as_ref();

        if self.show_labels {
            for (index, label) in self.labels_px.iter().enumerate() {
                let placed = label
                    .as_ref()
                    .and_then(|label| place_label(label, metrics, font, width, height).map(|p| (label, p)));
                let Some((label, (left, top, text_width))) = placed else {
                    self.label_boxes.push(None);
                    continue;
                };
                if label.text.is_empty() {
                    self.label_boxes.push(None);
                    continue;
                }
                self.texts.push(TextPrimitive::new(
                    label.text.clone(),
                    left,
                    top,
                    font,
                    LABEL_COLOR,
                    TextStyle::Halo,
                ));
                self.label_boxes.push(Some(LabelBox {
                    index,
                    x1: left - margin,
                    y1: top - margin,
                    x2: left + text_width + margin,
                    y2: top + font + margin,
                }));
            }
        }

        for label in self.annotations_px.iter().flatten() {
            if label.text.is_empty() {
                continue;
            }
            if let Some((left, top, _)) = place_label(label, metrics, font, width, height) {
                self.texts.push(TextPrimitive::new(
                    label.text.clone(),
                    left,
                    top,
                    font,
                    ANNOTATION_COLOR,
                    TextStyle::Plain,
                ));
            }
        }
    }

    /// Click boxes aligned with the label list; `None` for labels not drawn.
    #[must_use]
    pub fn label_boxes(&self) -> &[Option<LabelBox>] {
        &self.label_boxes
    }

    /// Replaces label texts in order. The count must match the labels.
    pub fn set_label_texts(&mut self, texts: Vec<String>) -> PlotResult<()> {
        let points = self.loaded_points()?;
        points.borrow_mut().set_label_texts(texts)?;
        self.scale_data()
    }

    /// Places one label per category at the median of its unhidden points.
    pub fn set_category_labels(&mut self, names: &[String]) -> PlotResult<usize> {
        let points = self.loaded_points()?;
        let anchors = points.borrow().category_label_anchors(names);
        let count = anchors.len();
        points.borrow_mut().set_labels(anchors);
        debug!(count, "category labels placed");
        self.scale_data()?;
        Ok(count)
    }

    #[must_use]
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Toggles cluster labels. Hiding them also ends emphasis mode.
    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
        if !show {
            self.emphasis = None;
        }
        self.hovered_label = None;
        self.layout_labels();
        self.invalidated = true;
    }

    #[must_use]
    pub fn emphasis(&self) -> Option<u8> {
        self.emphasis
    }

    /// Draws one category enlarged and flattens the rest; `None` ends
    /// emphasis mode.
    pub fn set_emphasis(&mut self, category: Option<u8>) -> PlotResult<()> {
        if let Some(category) = category {
            let points = self.loaded_points()?;
            let palette_len = points.borrow().palette().len();
            if usize::from(category) >= palette_len {
                return Err(PlotError::InvalidData(format!(
                    "emphasis category {category} is outside the palette of {palette_len} colors"
                )));
            }
        }
        self.emphasis = category;
        self.invalidated = true;
        Ok(())
    }
}
