use std::collections::BTreeMap;

use tracing::debug;

use crate::core::palette::Palette;
use crate::core::types::{HIDDEN_DATA_COORD, LabelAnchor, LineSegment, is_hidden_data};
use crate::error::{PlotError, PlotResult};

/// Coordinates, categories and overlays of one loaded dataset.
///
/// Point identity is the index into the coordinate array. Hiding rewrites
/// coordinates to the hidden sentinel and never removes entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PointData {
    coords: Vec<f64>,
    shadow: Option<Vec<f64>>,
    colors: Vec<u8>,
    palette: Palette,
    labels: Vec<LabelAnchor>,
    annotations: Vec<LabelAnchor>,
    lines: Vec<LineSegment>,
}

impl PointData {
    /// Validates and wraps one dataset. Every precondition is checked before
    /// anything is stored.
    pub fn new(coords: Vec<f64>, colors: Vec<u8>, palette: Palette) -> PlotResult<Self> {
        if coords.is_empty() {
            return Err(PlotError::EmptyCoordinates);
        }
        if coords.len() % 2 != 0 {
            return Err(PlotError::InvalidData(format!(
                "coordinate array length must be even, got {}",
                coords.len()
            )));
        }
        for (index, pair) in coords.chunks_exact(2).enumerate() {
            let (x, y) = (pair[0], pair[1]);
            if is_hidden_data(x, y) {
                continue;
            }
            if !x.is_finite() || !y.is_finite() {
                return Err(PlotError::InvalidData(format!(
                    "point {index} has a non-finite coordinate ({x}, {y})"
                )));
            }
        }

        let point_count = coords.len() / 2;
        validate_colors(&colors, point_count, &palette)?;

        debug!(
            points = point_count,
            palette = palette.len(),
            "point data loaded"
        );

        Ok(Self {
            coords,
            shadow: None,
            colors,
            palette,
            labels: Vec::new(),
            annotations: Vec::new(),
            lines: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<LabelAnchor>) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: Vec<LabelAnchor>) -> Self {
        self.annotations = annotations;
        self
    }

    #[must_use]
    pub fn with_lines(mut self, lines: Vec<LineSegment>) -> Self {
        self.lines = lines;
        self
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.coords.len() / 2
    }

    #[must_use]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    #[must_use]
    pub fn colors(&self) -> &[u8] {
        &self.colors
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[must_use]
    pub fn labels(&self) -> &[LabelAnchor] {
        &self.labels
    }

    #[must_use]
    pub fn annotations(&self) -> &[LabelAnchor] {
        &self.annotations
    }

    #[must_use]
    pub fn lines(&self) -> &[LineSegment] {
        &self.lines
    }

    #[must_use]
    pub fn has_hidden_shadow(&self) -> bool {
        self.shadow.is_some()
    }

    /// `true` when point `index` carries the hidden sentinel.
    #[must_use]
    pub fn is_hidden(&self, index: usize) -> bool {
        match (self.coords.get(2 * index), self.coords.get(2 * index + 1)) {
            (Some(&x), Some(&y)) => is_hidden_data(x, y),
            _ => true,
        }
    }

    /// Number of points not carrying the hidden sentinel.
    #[must_use]
    pub fn unhidden_count(&self) -> usize {
        self.coords
            .chunks_exact(2)
            .filter(|pair| !is_hidden_data(pair[0], pair[1]))
            .count()
    }

    /// Replaces the category array and palette together.
    pub fn set_colors(&mut self, colors: Vec<u8>, palette: Palette) -> PlotResult<()> {
        validate_colors(&colors, self.point_count(), &palette)?;
        self.colors = colors;
        self.palette = palette;
        Ok(())
    }

    /// Replaces label texts in order; the count must match the current labels.
    pub fn set_label_texts(&mut self, texts: Vec<String>) -> PlotResult<()> {
        if texts.len() != self.labels.len() {
            return Err(PlotError::InvalidData(format!(
                "expected {} label texts, got {}",
                self.labels.len(),
                texts.len()
            )));
        }
        for (label, text) in self.labels.iter_mut().zip(texts) {
            label.text = text;
        }
        Ok(())
    }

    pub fn set_labels(&mut self, labels: Vec<LabelAnchor>) {
        self.labels = labels;
    }

    pub fn set_annotations(&mut self, annotations: Vec<LabelAnchor>) {
        self.annotations = annotations;
    }

    pub fn set_lines(&mut self, lines: Vec<LineSegment>) {
        self.lines = lines;
    }

    /// Overwrites the coordinates of every point matching `should_hide`.
    ///
    /// Hides are cumulative: the shadow copy is captured by the first hide
    /// after a load or `unhide_all`, so later hides add to the hidden set and
    /// one `unhide_all` restores every point.
    pub fn hide_where(&mut self, mut should_hide: impl FnMut(usize) -> bool) -> usize {
        if self.shadow.is_none() {
            self.shadow = Some(self.coords.clone());
        }
        let mut hidden = 0;
        for (index, pair) in self.coords.chunks_exact_mut(2).enumerate() {
            if is_hidden_data(pair[0], pair[1]) || !should_hide(index) {
                continue;
            }
            pair[0] = HIDDEN_DATA_COORD;
            pair[1] = HIDDEN_DATA_COORD;
            hidden += 1;
        }
        debug!(hidden, "points hidden");
        hidden
    }

    /// Restores coordinates captured before the first hide. Returns `false`
    /// when nothing was hidden.
    pub fn unhide_all(&mut self) -> bool {
        match self.shadow.take() {
            Some(original) => {
                self.coords = original;
                true
            }
            None => false,
        }
    }

    /// Median position of the unhidden points of every category, labelled
    /// with `names[category]` (or the category number when no name exists).
    /// Categories without unhidden points are skipped.
    #[must_use]
    pub fn category_label_anchors(&self, names: &[String]) -> Vec<LabelAnchor> {
        let mut per_category: BTreeMap<u8, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for (pair, &category) in self.coords.chunks_exact(2).zip(&self.colors) {
            if is_hidden_data(pair[0], pair[1]) {
                continue;
            }
            let entry = per_category.entry(category).or_default();
            entry.0.push(pair[0]);
            entry.1.push(pair[1]);
        }

        per_category
            .into_iter()
            .map(|(category, (mut xs, mut ys))| {
                let text = names
                    .get(usize::from(category))
                    .cloned()
                    .unwrap_or_else(|| category.to_string());
                LabelAnchor::new(median(&mut xs), median(&mut ys), text)
            })
            .collect()
    }
}

fn validate_colors(colors: &[u8], point_count: usize, palette: &Palette) -> PlotResult<()> {
    if colors.len() != point_count {
        return Err(PlotError::ColorCountMismatch {
            colors: colors.len(),
            points: point_count,
        });
    }
    if let Some((point, &value)) = colors
        .iter()
        .enumerate()
        .find(|(_, value)| usize::from(**value) >= palette.len())
    {
        return Err(PlotError::ColorIndexOutOfRange {
            point,
            value,
            palette_len: palette.len(),
        });
    }
    Ok(())
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) * 0.5
    } else {
        values[mid]
    }
}
