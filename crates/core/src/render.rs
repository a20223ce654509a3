use crate::history::MetricBuffer;
use serde::{Deserialize, Serialize};

/// Which [`HistoryRenderer`] draws a metric's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One-line glyph strip over a short window.
    #[default]
    Sparkline,
    /// Eight-row block graph over the whole buffer.
    Grid,
}

impl DisplayMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Sparkline => Self::Grid,
            Self::Grid => Self::Sparkline,
        }
    }
}

/// Vertical scale used by the grid renderer.
///
/// The ceiling starts at [`GridScale::DEFAULT_MAX`] and only ever grows: a
/// sample above it lifts it to `sample * 1.1`.  The floor is fixed at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    pub max_value: f64,
    pub min_value: f64,
}

impl GridScale {
    pub const DEFAULT_MAX: f64 = 100.0;
    pub const HEADROOM: f64 = 1.1;

    /// Account for a freshly appended sample.
    pub fn observe(&mut self, value: f64) {
        if value > self.max_value {
            self.max_value = value * Self::HEADROOM;
        }
    }
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            max_value: Self::DEFAULT_MAX,
            min_value: 0.0,
        }
    }
}

/// Read-only view of one metric handed to a renderer.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    pub title:  &'a str,
    pub unit:   &'a str,
    pub buffer: &'a MetricBuffer,
    pub scale:  &'a GridScale,
    /// Column budget for width-limited renderers.
    pub width:  usize,
}

/// Turns a metric's history into display lines.
///
/// Implementations are pure: they never touch the buffer and return plain
/// text without color tags.
pub trait HistoryRenderer: Send + Sync + std::fmt::Debug {
    /// Short identifier, e.g. `"sparkline"`.
    fn id(&self) -> &str;

    fn render(&self, view: &SeriesView<'_>) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_starts_at_default_ceiling() {
        let scale = GridScale::default();
        assert_eq!(scale.max_value, 100.0);
        assert_eq!(scale.min_value, 0.0);
    }

    #[test]
    fn lower_values_never_shrink_the_ceiling() {
        let mut scale = GridScale::default();
        scale.observe(40.0);
        scale.observe(0.0);
        assert_eq!(scale.max_value, 100.0);
    }

    #[test]
    fn higher_value_grows_with_headroom() {
        let mut scale = GridScale::default();
        scale.observe(200.0);
        assert!((scale.max_value - 220.0).abs() < 1e-9);

        scale.observe(210.0);
        assert!((scale.max_value - 220.0).abs() < 1e-9);
    }

    #[test]
    fn value_equal_to_ceiling_does_not_grow() {
        let mut scale = GridScale::default();
        scale.observe(100.0);
        assert_eq!(scale.max_value, 100.0);
    }

    #[test]
    fn mode_toggles_back_and_forth() {
        assert_eq!(DisplayMode::Sparkline.toggled(), DisplayMode::Grid);
        assert_eq!(DisplayMode::Grid.toggled(), DisplayMode::Sparkline);
    }
}
