//! Self-monitoring of the render loop: rolling FPS and render-time averages,
//! best-effort memory readings, and the adaptive point budget they drive.

use crate::error::ConfigError;
use serde::Serialize;
use std::collections::VecDeque;
use std::time::Instant;
use tracing::debug;

pub const DEFAULT_MONITOR_WINDOW: usize = 60;

/// Source of the process memory figure shown in the metrics panel.
pub trait MemoryProbe: Send + Sync {
    /// Resident memory in MiB, or 0 when unavailable.
    fn memory_usage_mb(&self) -> f64;
}

/// Probe for platforms without a memory counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMemoryProbe;

impl MemoryProbe for NoMemoryProbe {
    fn memory_usage_mb(&self) -> f64 {
        0.0
    }
}

/// Reads the resident set size from `/proc/self/statm` (Linux).
#[derive(Clone, Copy, Debug)]
pub struct ProcStatmProbe {
    pub page_size: u64,
}

impl Default for ProcStatmProbe {
    fn default() -> Self {
        Self { page_size: 4096 }
    }
}

impl ProcStatmProbe {
    /// Resident pages are the second field of `statm`.
    pub fn parse_statm(contents: &str, page_size: u64) -> Option<f64> {
        let resident: u64 = contents.split_whitespace().nth(1)?.parse().ok()?;
        Some((resident * page_size) as f64 / (1024.0 * 1024.0))
    }
}

impl MemoryProbe for ProcStatmProbe {
    fn memory_usage_mb(&self) -> f64 {
        std::fs::read_to_string("/proc/self/statm")
            .ok()
            .and_then(|s| Self::parse_statm(&s, self.page_size))
            .unwrap_or(0.0)
    }
}

/// Rolling frame statistics over the last `window` frames.
pub struct PerformanceMonitor {
    window: usize,
    frame_count: u64,
    last_frame: Instant,
    fps_history: VecDeque<f64>,
    render_history: VecDeque<f64>,
    probe: Box<dyn MemoryProbe>,
}

impl PerformanceMonitor {
    pub fn new(window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroMonitorWindow);
        }
        Ok(Self {
            window,
            frame_count: 0,
            last_frame: Instant::now(),
            fps_history: VecDeque::with_capacity(window),
            render_history: VecDeque::with_capacity(window),
            probe: Box::new(NoMemoryProbe),
        })
    }

    /// Reference instant the first frame's delta is measured from.
    pub fn with_start(mut self, start: Instant) -> Self {
        self.last_frame = start;
        self
    }

    pub fn with_probe(mut self, probe: impl MemoryProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Records a frame that finished now after `render_ms` of drawing.
    pub fn measure_frame(&mut self, render_ms: f64) {
        self.record_frame(Instant::now(), render_ms);
    }

    /// Records a frame that finished at `now`.
    pub fn record_frame(&mut self, now: Instant, render_ms: f64) {
        self.frame_count += 1;
        let delta_ms = now.saturating_duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;

        let fps = if delta_ms > 0.0 { 1000.0 / delta_ms } else { 0.0 };
        self.fps_history.push_back(fps);
        self.render_history.push_back(render_ms);
        while self.fps_history.len() > self.window {
            self.fps_history.pop_front();
            self.render_history.pop_front();
        }
    }

    /// Mean instantaneous FPS over the window; 0 before the first frame.
    pub fn fps(&self) -> f64 {
        mean(&self.fps_history)
    }

    pub fn average_render_time(&self) -> f64 {
        mean(&self.render_history)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn memory_usage_mb(&self) -> f64 {
        self.probe.memory_usage_mb()
    }

    pub fn reset(&mut self) {
        self.frame_count = 0;
        self.fps_history.clear();
        self.render_history.clear();
        self.last_frame = Instant::now();
    }
}

fn mean(values: &VecDeque<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FpsHealth {
    Good,
    Fair,
    Poor,
}

impl FpsHealth {
    pub fn from_fps(fps: f64) -> Self {
        if fps >= 55.0 {
            Self::Good
        } else if fps >= 30.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

/// Snapshot shown by the metrics panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub fps: f64,
    pub memory_usage_mb: f64,
    pub render_time_ms: f64,
    pub data_processing_time_ms: f64,
    pub frame_count: u64,
}

impl PerformanceMetrics {
    pub fn health(&self) -> FpsHealth {
        FpsHealth::from_fps(self.fps)
    }
}

/// Line point budget that shrinks while frames run slow and grows back once
/// they are comfortably fast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdaptiveBudget {
    ceiling: usize,
    floor: usize,
    target_frame_ms: f64,
    current: usize,
}

impl AdaptiveBudget {
    pub fn new(ceiling: usize, floor: usize, target_frame_ms: f64) -> Result<Self, ConfigError> {
        if ceiling == 0 || floor == 0 {
            return Err(ConfigError::ZeroPointBudget);
        }
        let floor = floor.min(ceiling);
        Ok(Self {
            ceiling,
            floor,
            target_frame_ms,
            current: ceiling,
        })
    }

    /// Budget pinned at `points`.
    pub fn fixed(points: usize) -> Result<Self, ConfigError> {
        Self::new(points, points, f64::INFINITY)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Feeds the latest average render time; returns the new budget.
    pub fn adjust(&mut self, average_render_ms: f64) -> usize {
        let previous = self.current;
        if average_render_ms > self.target_frame_ms {
            self.current = (self.current / 2).max(self.floor);
        } else if average_render_ms < self.target_frame_ms / 2.0 {
            self.current = self.current.saturating_mul(2).min(self.ceiling);
        }
        if self.current != previous {
            debug!(previous, current = self.current, average_render_ms, "point budget adjusted");
        }
        self.current
    }
}
