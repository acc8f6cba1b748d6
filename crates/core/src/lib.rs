pub mod chart;
pub mod error;
pub mod event;
pub mod state;
pub mod widget;

pub use chart::{AggregatedSeries, BarSeries, ChartKind, Granularity, Metric, MetricSeries};
pub use error::{DashError, Result};
pub use event::Message;
pub use state::{DashState, RawPoint, SensorReading, SourceSnapshot, WateringSchedule, Zone};
pub use widget::{Line, Panel, Span, Tone};
