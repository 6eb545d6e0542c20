use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::point_segment_distance;
use crate::render::Renderer;

use super::ScatterPlot;

/// Maximum distance in pixels between the pointer and a line it hovers.
pub const LINE_HIT_TOLERANCE_PX: f64 = 2.0;

/// Hits under a pointer; almost always a handful of points.
pub type PointHits = SmallVec<[u32; 8]>;

impl<R: Renderer> ScatterPlot<R> {
    /// Points whose `pixel ± radius` box contains `(px, py)`, nearest first.
    /// Equal distances keep index order.
    #[must_use]
    pub fn points_at(&self, px: f64, py: f64) -> PointHits {
        let radius = f64::from(self.radius());
        let mut hits: SmallVec<[(OrderedFloat<f64>, u32); 8]> = self
            .pixels
            .iter_visible()
            .filter_map(|(index, x, y)| {
                let (x, y) = (f64::from(x), f64::from(y));
                let inside = px >= x - radius && px <= x + radius && py >= y - radius && py <= y + radius;
                inside.then(|| (OrderedFloat((px - x).hypot(py - y)), index as u32))
            })
            .collect();
        hits.sort_unstable();
        hits.into_iter().map(|(_, index)| index).collect()
    }

    /// First label whose box contains `(px, py)` as `(index, text)`.
    #[must_use]
    pub fn label_at(&self, px: f64, py: f64) -> Option<(usize, String)> {
        let label_box = self
            .label_boxes
            .iter()
            .flatten()
            .find(|label_box| label_box.contains(px, py))?;
        let label = self.labels_px.get(label_box.index)?.as_ref()?;
        Some((label_box.index, label.text.clone()))
    }

    /// Index of the first projected line within the hit tolerance.
    #[must_use]
    pub fn line_index_at(&self, px: f64, py: f64) -> Option<usize> {
        self.lines_px
            .iter()
            .find(|line| {
                point_segment_distance(
                    px,
                    py,
                    f64::from(line.x1),
                    f64::from(line.y1),
                    f64::from(line.x2),
                    f64::from(line.y2),
                ) <= LINE_HIT_TOLERANCE_PX
            })
            .map(|line| line.source)
    }

    /// Label of the first line near `(px, py)`; `None` when no line is hit
    /// or the hit line has no label.
    #[must_use]
    pub fn line_at(&self, px: f64, py: f64) -> Option<String> {
        let source = self.line_index_at(px, py)?;
        let points = self.points.as_ref()?;
        let data = points.borrow();
        data.lines().get(source)?.label.clone()
    }
}
