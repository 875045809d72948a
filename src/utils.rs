use gpui::Pixels;

pub mod date_formatter;

pub use date_formatter::{format_time_tick, format_timestamp, DateFormat};

pub trait PixelsExt {
    fn as_f32(&self) -> f32;
}

impl PixelsExt for Pixels {
    fn as_f32(&self) -> f32 {
        f32::from(*self)
    }
}

/// Value label with the given number of decimals; non-finite values render empty.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        String::new()
    }
}
