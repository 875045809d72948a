//! Scrolling table of the visible samples, newest first.

use crate::data_types::{CanvasPoint, Sample, Timestamp};
use crate::error::ConfigError;
use crate::surface::{DrawSurface, TextAnchor};
use crate::theme::ChartTheme;
use crate::utils::{format_timestamp, format_value, DateFormat};
use crate::virtualization::{VirtualWindow, DEFAULT_OVERSCAN};
use std::cmp::Reverse;

pub const DEFAULT_ROW_HEIGHT: f32 = 40.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 400.0;

/// Height of the title and column header band above the rows.
const HEADER_HEIGHT: f32 = 56.0;
const CELL_PADDING: f32 = 12.0;

/// One formatted table line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    /// Position in the newest-first ordering.
    pub index: usize,
    pub timestamp: String,
    pub category: String,
    pub value: String,
}

#[derive(Clone, Debug)]
pub struct DataTable {
    rows: Vec<Sample>,
    row_height: f32,
    viewport_height: f32,
    overscan: usize,
    scroll_top: f32,
}

impl Default for DataTable {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            row_height: DEFAULT_ROW_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            scroll_top: 0.0,
        }
    }
}

impl DataTable {
    pub fn new(row_height: f32, viewport_height: f32, overscan: usize) -> Result<Self, ConfigError> {
        if !(row_height.is_finite() && row_height > 0.0) {
            return Err(ConfigError::InvalidRowHeight(row_height));
        }
        Ok(Self {
            row_height,
            viewport_height: viewport_height.max(0.0),
            overscan,
            ..Self::default()
        })
    }

    /// Replaces the contents, ordered newest first. Ties keep their input order.
    pub fn set_data(&mut self, samples: &[Sample]) {
        self.rows.clear();
        self.rows.extend_from_slice(samples);
        self.rows.sort_by_key(|s| Reverse(s.timestamp));
        self.scroll_to(self.scroll_top);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn header(&self) -> String {
        format!("Data Points ({})", self.rows.len())
    }

    pub fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    pub fn max_scroll(&self) -> f32 {
        (self.rows.len() as f32 * self.row_height - self.viewport_height).max(0.0)
    }

    pub fn scroll_to(&mut self, offset: f32) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_top = offset.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.scroll_top + delta);
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.scroll_to(self.scroll_top);
    }

    pub fn window(&self) -> VirtualWindow {
        VirtualWindow::with_valid_row_height(
            self.rows.len(),
            self.row_height,
            self.viewport_height,
            self.scroll_top,
            self.overscan,
        )
    }

    pub fn visible_rows(&self) -> Vec<TableRow> {
        self.window()
            .slice(&self.rows)
            .into_iter()
            .map(|(index, sample)| TableRow {
                index,
                timestamp: format_row_time(sample.timestamp),
                category: sample.category.clone(),
                value: format_value(sample.value, 2),
            })
            .collect()
    }

    /// Paints the header band and the rows intersecting the viewport.
    pub fn paint(&self, surface: &mut dyn DrawSurface, theme: &ChartTheme) {
        let (width, _) = surface.size();
        let size = theme.axis_label_size;
        let col_w = (width - 2.0 * CELL_PADDING).max(0.0) / 3.0;
        let columns = [
            CELL_PADDING,
            CELL_PADDING + col_w,
            CELL_PADDING + 2.0 * col_w,
        ];

        surface.clear(theme.background);
        surface.fill_text(
            &self.header(),
            CanvasPoint::new(CELL_PADDING, size + 8.0),
            TextAnchor::Start,
            size + 2.0,
            theme.table_text,
        );
        for (label, x) in ["Timestamp", "Category", "Value"].iter().zip(columns) {
            surface.fill_text(
                label,
                CanvasPoint::new(x, HEADER_HEIGHT - 8.0),
                TextAnchor::Start,
                size,
                theme.axis_label,
            );
        }

        let window = self.window();
        let text_offset = (self.row_height + size) / 2.0;
        for (slot, row) in self.visible_rows().into_iter().enumerate() {
            let y = HEADER_HEIGHT + window.offset_y - self.scroll_top + slot as f32 * self.row_height;
            if y + self.row_height < HEADER_HEIGHT || y > HEADER_HEIGHT + self.viewport_height {
                continue;
            }
            if row.index % 2 == 1 {
                surface.fill_rect(0.0, y, width, self.row_height, theme.table_stripe);
            }
            let baseline = y + text_offset;
            for (text, x) in [&row.timestamp, &row.category, &row.value].into_iter().zip(columns) {
                surface.fill_text(text, CanvasPoint::new(x, baseline), TextAnchor::Start, size, theme.table_text);
            }
        }
    }
}

fn format_row_time(ts: Timestamp) -> String {
    format_timestamp(ts, DateFormat::DateTime)
}
