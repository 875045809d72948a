//! Visible-slice computation for long scrolling lists.

use crate::error::ConfigError;
use std::ops::Range;

pub const DEFAULT_OVERSCAN: usize = 5;

/// Rows to materialize for the current scroll position, plus the geometry
/// needed to place them inside a full-height scroll area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
    pub total_height: f32,
    /// Vertical offset of row `start` from the top of the content.
    pub offset_y: f32,
}

impl VirtualWindow {
    /// `overscan` extra rows are kept on both sides of the viewport.
    /// Negative or non-finite scroll offsets count as 0. The window never
    /// extends past `len`, however far the content is scrolled.
    pub fn compute(
        len: usize,
        row_height: f32,
        viewport_height: f32,
        scroll_top: f32,
        overscan: usize,
    ) -> Result<Self, ConfigError> {
        if !(row_height.is_finite() && row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight(row_height));
        }
        Ok(Self::with_valid_row_height(len, row_height, viewport_height, scroll_top, overscan))
    }

    pub(crate) fn with_valid_row_height(
        len: usize,
        row_height: f32,
        viewport_height: f32,
        scroll_top: f32,
        overscan: usize,
    ) -> Self {
        let non_negative = |v: f32| if v.is_finite() { v.max(0.0) as f64 } else { 0.0 };
        let scroll_top = non_negative(scroll_top);
        let viewport = non_negative(viewport_height);
        let row = row_height as f64;

        let first_visible = (scroll_top / row).floor() as usize;
        let last_visible = ((scroll_top + viewport) / row).ceil() as usize;

        let end = last_visible.saturating_add(overscan).min(len);
        let start = first_visible.saturating_sub(overscan).min(end);

        Self {
            start,
            end,
            total_height: len as f32 * row_height,
            offset_y: start as f32 * row_height,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Visible items paired with their index in `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> Vec<(usize, &'a T)> {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        items[start..end]
            .iter()
            .enumerate()
            .map(|(i, item)| (start + i, item))
            .collect()
    }
}
