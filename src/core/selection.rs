use indexmap::IndexSet;

use crate::core::point_data::PointData;
use crate::core::transform::PixelCoords;
use crate::error::{PlotError, PlotResult};

/// Axis-aligned pixel rectangle, always stored with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl PixelRect {
    /// Normalizes two corners given in any drag direction.
    #[must_use]
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    #[must_use]
    pub fn width(self) -> i32 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(self) -> i32 {
        self.max_y - self.min_y
    }
}

/// Set of selected point indices.
///
/// Membership never includes hidden points; every operation that takes
/// point data filters them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<u32>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, index: u32) -> bool {
        self.ids.contains(&index)
    }

    /// Iterates members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.ids.iter().copied()
    }

    /// Members in ascending order.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.ids.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replaces the selection. Rejects the whole call when any index is out
    /// of range; hidden points are dropped.
    pub fn set(&mut self, ids: &[u32], data: &PointData) -> PlotResult<()> {
        check_indices(ids, data)?;
        self.ids = ids
            .iter()
            .copied()
            .filter(|&id| !data.is_hidden(id as usize))
            .collect();
        Ok(())
    }

    /// Adds `index` when absent, removes it when present. Returns the new
    /// membership. Hidden points are left unselected.
    pub fn toggle(&mut self, index: u32, data: &PointData) -> PlotResult<bool> {
        check_indices(&[index], data)?;
        if self.ids.shift_remove(&index) {
            return Ok(false);
        }
        if data.is_hidden(index as usize) {
            return Ok(false);
        }
        self.ids.insert(index);
        Ok(true)
    }

    /// Adds every point that carries a real coordinate.
    pub fn select_all(&mut self, data: &PointData) {
        for index in 0..data.point_count() {
            if !data.is_hidden(index) {
                self.ids.insert(index as u32);
            }
        }
    }

    /// Adds every point currently projected inside the zoom window.
    pub fn select_visible(&mut self, pixels: &PixelCoords) -> usize {
        let before = self.ids.len();
        self.ids
            .extend(pixels.iter_visible().map(|(index, _, _)| index as u32));
        self.ids.len() - before
    }

    /// Adds every unhidden point of category `color`. Returns how many
    /// points matched.
    pub fn select_by_color(&mut self, color: u8, data: &PointData) -> usize {
        let mut matched = 0;
        for (index, &value) in data.colors().iter().enumerate() {
            if value == color && !data.is_hidden(index) {
                self.ids.insert(index as u32);
                matched += 1;
            }
        }
        matched
    }

    /// Removes every point of category `color`. Returns how many members were
    /// removed.
    pub fn unselect_by_color(&mut self, color: u8, data: &PointData) -> usize {
        let colors = data.colors();
        let before = self.ids.len();
        self.ids
            .retain(|&id| colors.get(id as usize).is_none_or(|&value| value != color));
        before - self.ids.len()
    }

    /// Adds every visible point whose pixel lies in `rect` (inclusive).
    pub fn select_in_rect(&mut self, rect: PixelRect, pixels: &PixelCoords) -> usize {
        let before = self.ids.len();
        for (index, x, y) in pixels.iter_visible() {
            if rect.contains(i32::from(x), i32::from(y)) {
                self.ids.insert(index as u32);
            }
        }
        self.ids.len() - before
    }

    /// Replaces the selection with every unhidden point not currently selected.
    pub fn invert(&mut self, data: &PointData) {
        let inverted: IndexSet<u32> = (0..data.point_count())
            .filter(|&index| !data.is_hidden(index))
            .map(|index| index as u32)
            .filter(|id| !self.ids.contains(id))
            .collect();
        self.ids = inverted;
    }

    /// Drops members that became hidden.
    pub fn retain_unhidden(&mut self, data: &PointData) {
        self.ids.retain(|&id| !data.is_hidden(id as usize));
    }
}

fn check_indices(ids: &[u32], data: &PointData) -> PlotResult<()> {
    let count = data.point_count();
    match ids.iter().find(|&&id| id as usize >= count) {
        Some(&index) => Err(PlotError::PointIndexOutOfRange { index, count }),
        None => Ok(()),
    }
}
