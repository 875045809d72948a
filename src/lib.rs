//! telemetry_chart: real-time telemetry dashboard charts for GPUI.
//!
//! Samples flow from a [`SampleProducer`] into a bounded [`StreamBuffer`], are
//! filtered and time-bucketed by [`aggregation`], projected by
//! [`PlotTransform`] and drawn each frame by a [`RenderLoop`] per chart onto
//! any [`DrawSurface`]. The [`chart_view`] module hosts the whole thing in a
//! gpui window.

pub mod aggregation;
pub mod axis_renderer;
pub mod chart_view;
pub mod config;
pub mod dashboard;
pub mod data_table;
pub mod data_types;
pub mod decimation;
pub mod endpoint;
pub mod error;
pub mod performance;
pub mod plot_types;
pub mod producer;
pub mod render_loop;
pub mod rendering;
pub mod scales;
pub mod stream;
pub mod surface;
pub mod theme;
pub mod transform;
pub mod utils;
pub mod virtualization;

pub use aggregation::{aggregate, filter_samples};
pub use chart_view::{init, DashboardView};
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use data_types::{DashboardState, FilterOptions, Sample, TimeRange, ValueRange};
pub use decimation::decimate;
pub use endpoint::{BulkEndpoint, DataRequest, EndpointResponse};
pub use error::{ConfigError, EndpointError, ProducerError};
pub use performance::{PerformanceMetrics, PerformanceMonitor};
pub use plot_types::{ChartKind, PlotRenderer};
pub use producer::{SampleProducer, SimulatedProducer};
pub use render_loop::{FrameScheduler, ManualScheduler, RenderLoop};
pub use stream::{IngestionTimer, StreamBuffer};
pub use surface::{DrawSurface, RecordingSurface};
pub use transform::PlotTransform;
pub use virtualization::VirtualWindow;
