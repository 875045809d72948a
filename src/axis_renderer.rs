use crate::data_types::{AxisConfig, CanvasConfig, CanvasPoint};
use crate::scales::LinearScale;
use crate::surface::{DrawSurface, TextAnchor};
use crate::theme::ChartTheme;
use crate::transform::PlotTransform;
use crate::utils::{format_time_tick, format_value};

const LABEL_GAP: f32 = 4.0;

/// Paints the value axis on the left edge of the plot area and the time axis
/// along its baseline.
pub struct AxisRenderer;

impl AxisRenderer {
    fn ticks(scale: &LinearScale, steps: usize) -> Vec<f64> {
        // Every tick of a degenerate scale lands on the same pixel.
        if scale.is_degenerate() {
            return vec![scale.domain().0];
        }
        scale.even_ticks(steps)
    }

    pub fn paint(
        surface: &mut dyn DrawSurface,
        canvas: &CanvasConfig,
        transform: &PlotTransform,
        config: &AxisConfig,
        theme: &ChartTheme,
    ) {
        if !config.show_axes {
            return;
        }

        let left = canvas.padding.left;
        let right = canvas.width - canvas.padding.right;
        let top = canvas.padding.top;
        let baseline = canvas.baseline_y();
        let tick_len = config.tick_length;
        let font_size = theme.axis_label_size;

        // 1. Axis lines
        surface.stroke_line(
            CanvasPoint::new(left, top),
            CanvasPoint::new(left, baseline),
            1.0,
            theme.axis_line,
        );
        surface.stroke_line(
            CanvasPoint::new(left, baseline),
            CanvasPoint::new(right, baseline),
            1.0,
            theme.axis_line,
        );

        // 2. Value ticks and labels
        for value in Self::ticks(&transform.y_scale, config.tick_steps) {
            let y = transform.y_scale.map(value);
            surface.stroke_line(
                CanvasPoint::new(left - tick_len, y),
                CanvasPoint::new(left, y),
                1.0,
                theme.axis_line,
            );
            surface.fill_text(
                &format_value(value, 1),
                CanvasPoint::new(left - tick_len - LABEL_GAP, y + font_size / 3.0),
                TextAnchor::End,
                font_size,
                theme.axis_label,
            );
        }

        // 3. Time ticks and labels
        for time in Self::ticks(&transform.x_scale, config.tick_steps) {
            let x = transform.x_scale.map(time);
            surface.stroke_line(
                CanvasPoint::new(x, baseline),
                CanvasPoint::new(x, baseline + tick_len),
                1.0,
                theme.axis_line,
            );
            surface.fill_text(
                &format_time_tick(time),
                CanvasPoint::new(x, baseline + tick_len + LABEL_GAP + font_size),
                TextAnchor::Middle,
                font_size,
                theme.axis_label,
            );
        }
    }
}
