//! Renderers that turn a metric's history into text.

pub mod grid;
pub mod sparkline;

pub use grid::MetricGrid;
pub use sparkline::SparklineRenderer;

use socmon_core::{DisplayMode, HistoryRenderer};

/// Marker shown when a buffer is too short to draw anything.
pub const NO_DATA: &str = "no data";

/// The renderer implementing a [`DisplayMode`].
pub fn renderer_for(mode: DisplayMode) -> &'static dyn HistoryRenderer {
    match mode {
        DisplayMode::Sparkline => &SparklineRenderer,
        DisplayMode::Grid => &MetricGrid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_has_its_renderer() {
        assert_eq!(renderer_for(DisplayMode::Sparkline).id(), "sparkline");
        assert_eq!(renderer_for(DisplayMode::Grid).id(), "grid");
    }
}
