use socmon_config::{DisplayConfig, ModeOverrides};
use socmon_core::{DisplayMode, HistoryRenderer, MetricFamily};

/// Presentation flags owned by the dashboard.
///
/// Toggling any of these never touches metric history.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// Renderer for every family without an override.
    pub mode:             DisplayMode,
    pub overrides:        ModeOverrides,
    pub show_trends:      bool,
    pub show_graphs:      bool,
    pub graph_width:      usize,
    pub zone_graph_width: usize,
}

impl DisplayState {
    pub fn from_config(cfg: &DisplayConfig) -> Self {
        Self {
            mode:             cfg.mode,
            overrides:        cfg.overrides,
            show_trends:      cfg.show_trends,
            show_graphs:      cfg.show_history_graphs,
            graph_width:      cfg.graph_width,
            zone_graph_width: cfg.zone_graph_width,
        }
    }

    /// Mode in effect for a family after overrides.
    pub fn mode_for(&self, family: MetricFamily) -> DisplayMode {
        self.overrides.get(family).unwrap_or(self.mode)
    }

    pub fn renderer_for(&self, family: MetricFamily) -> &'static dyn HistoryRenderer {
        socmon_widgets::renderer_for(self.mode_for(family))
    }

    pub fn width_for(&self, family: MetricFamily) -> usize {
        match family {
            MetricFamily::Cpu | MetricFamily::Memory => self.graph_width,
            MetricFamily::Temperature | MetricFamily::Npu => self.zone_graph_width,
        }
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::from_config(&DisplayConfig::default())
    }
}
