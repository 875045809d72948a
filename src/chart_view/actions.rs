use super::DashboardView;
use crate::data_types::{AGGREGATION_PRESETS, TIME_RANGE_PRESETS};
use crate::producer::system_now;
use gpui::*;
use tracing::warn;

actions!(
    telemetry_chart,
    [
        ToggleStream,
        ClearData,
        CycleAggregation,
        CycleTimeRange,
        ScrollTableUp,
        ScrollTableDown
    ]
);

const TABLE_SCROLL_STEP: f32 = 40.0;

/// Next preset index in the cycle `None -> 0 -> 1 -> ... -> None`.
fn next_preset(current: Option<usize>, len: usize) -> Option<usize> {
    match current {
        None if len > 0 => Some(0),
        Some(i) if i + 1 < len => Some(i + 1),
        _ => None,
    }
}

impl DashboardView {
    pub(super) fn handle_toggle_stream(&mut self, _: &ToggleStream, _win: &mut Window, cx: &mut Context<Self>) {
        if self.is_streaming() {
            self.stop_stream(cx);
        } else {
            self.start_stream(cx);
        }
    }

    pub(super) fn handle_clear_data(&mut self, _: &ClearData, _win: &mut Window, cx: &mut Context<Self>) {
        self.dashboard.lock().clear();
        // Clearing also stops the stream.
        self.ingest_task = None;
        cx.notify();
    }

    pub(super) fn handle_cycle_aggregation(
        &mut self,
        _: &CycleAggregation,
        _win: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let next = next_preset(self.aggregation_preset, AGGREGATION_PRESETS.len());
        let period = next.map(|i| AGGREGATION_PRESETS[i]);
        match self.dashboard.lock().state_mut().set_aggregation_period(period) {
            Ok(()) => self.aggregation_preset = next,
            Err(err) => warn!(error = %err, "aggregation preset rejected"),
        }
        cx.notify();
    }

    pub(super) fn handle_cycle_time_range(
        &mut self,
        _: &CycleTimeRange,
        _win: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let next = next_preset(self.time_range_preset, TIME_RANGE_PRESETS.len());
        {
            let mut dashboard = self.dashboard.lock();
            let state = dashboard.state_mut();
            match next {
                Some(i) => state.set_time_range_preset(TIME_RANGE_PRESETS[i], system_now()),
                None => state.set_time_range(None),
            }
        }
        self.time_range_preset = next;
        cx.notify();
    }

    pub(super) fn handle_scroll_table_up(&mut self, _: &ScrollTableUp, _win: &mut Window, cx: &mut Context<Self>) {
        self.dashboard.lock().table_mut().scroll_by(-TABLE_SCROLL_STEP);
        cx.notify();
    }

    pub(super) fn handle_scroll_table_down(
        &mut self,
        _: &ScrollTableDown,
        _win: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.dashboard.lock().table_mut().scroll_by(TABLE_SCROLL_STEP);
        cx.notify();
    }
}
