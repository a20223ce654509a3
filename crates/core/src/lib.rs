pub mod error;
pub mod event;
pub mod history;
pub mod render;
pub mod severity;
pub mod state;
pub mod trend;

pub use error::{MonitorError, Result};
pub use event::Message;
pub use history::MetricBuffer;
pub use render::{DisplayMode, GridScale, HistoryRenderer, SeriesView};
pub use severity::{classify, Severity, Thresholds};
pub use state::{MetricFamily, MetricId, Readings};
pub use trend::{Trend, TrendAnalyzer, TrendDirection};
