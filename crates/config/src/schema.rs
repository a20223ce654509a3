use serde::{Deserialize, Serialize};
use socmon_core::{DisplayMode, MetricFamily, Thresholds};
use std::time::Duration;

/// Root configuration structure parsed from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocmonConfig {
    /// Sampling cadence, history depth and severity thresholds.
    pub monitor: MonitorConfig,
    /// Presentation flags.
    pub display: DisplayConfig,
    /// Which sensor families are read and where from.
    pub sensors: SensorConfig,
    /// Terminal colors for the severity tags.
    pub theme: ThemeConfig,
}

impl SocmonConfig {
    /// Severity thresholds for one sensor family.
    pub fn thresholds(&self, family: MetricFamily) -> Thresholds {
        let m = &self.monitor;
        match family {
            MetricFamily::Cpu => Thresholds::new(m.cpu_warning_threshold, m.cpu_critical_threshold),
            MetricFamily::Memory => {
                Thresholds::new(m.memory_warning_threshold, m.memory_critical_threshold)
            }
            MetricFamily::Temperature => {
                Thresholds::new(m.temp_warning_threshold, m.temp_critical_threshold)
            }
            MetricFamily::Npu => Thresholds::new(m.npu_warning_threshold, m.npu_critical_threshold),
        }
    }
}

/// `[monitor]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Seconds between samples.
    pub update_interval: f64,
    /// Samples kept per metric.
    pub history_length: usize,
    pub temp_warning_threshold: f64,
    pub temp_critical_threshold: f64,
    pub cpu_warning_threshold: f64,
    pub cpu_critical_threshold: f64,
    pub memory_warning_threshold: f64,
    pub memory_critical_threshold: f64,
    pub npu_warning_threshold: f64,
    pub npu_critical_threshold: f64,
}

impl MonitorConfig {
    /// Shortest interval the sampler accepts.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

    /// `update_interval` as a [`Duration`]; non-finite or tiny values are
    /// raised to [`Self::MIN_INTERVAL`].
    pub fn interval(&self) -> Duration {
        if !self.update_interval.is_finite() {
            return Self::MIN_INTERVAL;
        }
        Duration::from_secs_f64(self.update_interval.max(0.0)).max(Self::MIN_INTERVAL)
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            update_interval:           1.0,
            history_length:            60,
            temp_warning_threshold:    60.0,
            temp_critical_threshold:   70.0,
            cpu_warning_threshold:     70.0,
            cpu_critical_threshold:    90.0,
            memory_warning_threshold:  80.0,
            memory_critical_threshold: 95.0,
            npu_warning_threshold:     70.0,
            npu_critical_threshold:    90.0,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Sparkline width for CPU and memory.
    pub graph_width: usize,
    /// Sparkline width for thermal zones and NPU cores.
    pub zone_graph_width: usize,
    /// `false` renders without any color styling.
    pub use_colors: bool,
    pub show_history_graphs: bool,
    pub show_trends: bool,
    /// Renderer used by every family without an override.
    pub mode: DisplayMode,
    pub overrides: ModeOverrides,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            graph_width:         20,
            zone_graph_width:    15,
            use_colors:          true,
            show_history_graphs: true,
            show_trends:         true,
            mode:                DisplayMode::Sparkline,
            overrides:           ModeOverrides::default(),
        }
    }
}

/// `[display.overrides]`: pin a family to one renderer regardless of the
/// global mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModeOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<DisplayMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npu: Option<DisplayMode>,
}

impl ModeOverrides {
    pub fn get(&self, family: MetricFamily) -> Option<DisplayMode> {
        match family {
            MetricFamily::Cpu => self.cpu,
            MetricFamily::Memory => self.memory,
            MetricFamily::Temperature => self.temperature,
            MetricFamily::Npu => self.npu,
        }
    }
}

/// `[sensors]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    pub enable_temperature: bool,
    pub enable_npu: bool,
    /// Debugfs file holding the NPU load line.  Read through `sudo -n`.
    pub npu_load_path: String,
    /// Seconds before the privileged NPU read is abandoned.
    pub npu_timeout: f64,
    /// NPU cores tracked, in display order.
    pub npu_cores: Vec<String>,
    /// Thermal zones tracked, in display priority order.
    pub thermal_zones: Vec<ThermalZone>,
}

impl SensorConfig {
    pub fn npu_timeout(&self) -> Duration {
        if self.npu_timeout.is_finite() && self.npu_timeout > 0.0 {
            Duration::from_secs_f64(self.npu_timeout)
        } else {
            Duration::from_secs(2)
        }
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            enable_temperature: true,
            enable_npu:         true,
            npu_load_path:      "/sys/kernel/debug/rknpu/load".to_string(),
            npu_timeout:        2.0,
            npu_cores:          ["Core0", "Core1", "Core2"].map(String::from).to_vec(),
            thermal_zones:      ThermalZone::rk3588_defaults(),
        }
    }
}

/// A sysfs thermal zone and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermalZone {
    /// `N` in `/sys/class/thermal/thermal_zoneN`.
    pub index: u32,
    pub name:  String,
}

impl ThermalZone {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self { index, name: name.into() }
    }

    /// The seven zones the RK3588 exposes.
    pub fn rk3588_defaults() -> Vec<Self> {
        vec![
            Self::new(0, "SoC center"),
            Self::new(1, "A76_0/1 (CPU4/5)"),
            Self::new(2, "A76_2/3 (CPU6/7)"),
            Self::new(3, "A55_0/1/2/3 (CPU0-3)"),
            Self::new(4, "PD_CENTER"),
            Self::new(5, "GPU"),
            Self::new(6, "NPU"),
        ]
    }
}

/// `[theme]` section: hex colors for each severity tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub normal:   String,
    pub warning:  String,
    pub critical: String,
    /// Header accent (NPU section).
    pub accent:   String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            normal:   "#a6e3a1".to_string(), // Catppuccin Mocha — green
            warning:  "#f9e2af".to_string(), // Catppuccin Mocha — yellow
            critical: "#f38ba8".to_string(), // Catppuccin Mocha — red
            accent:   "#cba6f7".to_string(), // Catppuccin Mocha — mauve
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = SocmonConfig::default();
        assert_eq!(cfg.monitor.history_length, 60);
        assert_eq!(cfg.monitor.interval(), Duration::from_secs(1));
        assert_eq!(cfg.display.graph_width, 20);
        assert_eq!(cfg.sensors.thermal_zones.len(), 7);
        assert_eq!(cfg.sensors.npu_cores, vec!["Core0", "Core1", "Core2"]);
        assert_eq!(cfg.thresholds(MetricFamily::Memory), Thresholds::new(80.0, 95.0));
        assert_eq!(cfg.thresholds(MetricFamily::Temperature), Thresholds::new(60.0, 70.0));
    }

    #[test]
    fn interval_is_clamped() {
        let mut m = MonitorConfig::default();
        m.update_interval = 0.0;
        assert_eq!(m.interval(), MonitorConfig::MIN_INTERVAL);
        m.update_interval = f64::NAN;
        assert_eq!(m.interval(), MonitorConfig::MIN_INTERVAL);
        m.update_interval = 2.5;
        assert_eq!(m.interval(), Duration::from_millis(2500));
    }

    #[test]
    fn overrides_are_per_family() {
        let overrides = ModeOverrides {
            temperature: Some(DisplayMode::Grid),
            ..Default::default()
        };
        assert_eq!(overrides.get(MetricFamily::Temperature), Some(DisplayMode::Grid));
        assert_eq!(overrides.get(MetricFamily::Cpu), None);
    }
}
