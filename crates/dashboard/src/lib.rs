//! The dashboard model: one [`MetricSeries`] per tracked metric, fed once per
//! tick and rendered to tagged text.
//!
//! Display text carries inline color tags, `[red]…[/red]`, `[yellow]…`,
//! `[green]…`, optionally prefixed with `bold`.  The front-end resolves them
//! to terminal styles; [`strip_tags`] removes them for plain output.

pub mod display;
pub mod series;

pub use display::DisplayState;
pub use series::MetricSeries;

use chrono::{DateTime, Local};
use socmon_config::SocmonConfig;
use socmon_core::{MetricFamily, MetricId, Readings, SeriesView, TrendAnalyzer};
use socmon_system::format_bytes;
use std::fmt::Write as _;
use tracing::{debug, info, warn};

const INDENT: &str = "  ";

/// Owns all metric history and the presentation flags.
#[derive(Debug, Clone)]
pub struct DashboardModel {
    series:        Vec<MetricSeries>,
    display:       DisplayState,
    analyzer:      TrendAnalyzer,
    temperature:   bool,
    npu:           bool,
    memory_bytes:  Option<(u64, u64)>,
    last_update:   Option<DateTime<Local>>,
}

impl DashboardModel {
    /// Build every series in display order: CPU, memory, thermal zones, NPU
    /// cores.  The set is fixed for the life of the model.
    pub fn new(cfg: &SocmonConfig) -> Self {
        let capacity = cfg.monitor.history_length;
        let mut series = vec![
            MetricSeries::new(MetricId::Cpu, "CPU", cfg.thresholds(MetricFamily::Cpu), capacity),
            MetricSeries::new(
                MetricId::Memory,
                "Memory",
                cfg.thresholds(MetricFamily::Memory),
                capacity,
            ),
        ];

        if cfg.sensors.enable_temperature {
            let thresholds = cfg.thresholds(MetricFamily::Temperature);
            series.extend(cfg.sensors.thermal_zones.iter().map(|zone| {
                MetricSeries::new(MetricId::Thermal(zone.index), &zone.name, thresholds, capacity)
            }));
        }
        if cfg.sensors.enable_npu {
            let thresholds = cfg.thresholds(MetricFamily::Npu);
            series.extend(cfg.sensors.npu_cores.iter().map(|core| {
                MetricSeries::new(MetricId::Npu(core.clone()), core, thresholds, capacity)
            }));
        }

        debug!("tracking {} metrics", series.len());

        Self {
            series,
            display: DisplayState::from_config(&cfg.display),
            analyzer: TrendAnalyzer::default(),
            temperature: cfg.sensors.enable_temperature,
            npu: cfg.sensors.enable_npu,
            memory_bytes: None,
            last_update: None,
        }
    }

    /// Append this tick's readings.  A metric without a reading keeps its
    /// buffer untouched.
    pub fn ingest(&mut self, readings: &Readings) {
        for series in &mut self.series {
            match readings.read(&series.id) {
                Some(value) => series.append(value),
                None => debug!("no reading for {:?} this tick", series.id),
            }
        }
        if readings.memory_bytes.is_some() {
            self.memory_bytes = readings.memory_bytes;
        }
        self.last_update = Some(readings.taken_at);
    }

    /// Ingest then render, as one tick.
    pub fn tick(&mut self, readings: &Readings) -> String {
        self.ingest(readings);
        self.display_text()
    }

    /// Switch between sparkline and grid for families without an override.
    pub fn toggle_display_mode(&mut self) {
        self.display.mode = self.display.mode.toggled();
    }

    pub fn toggle_trend_annotations(&mut self) {
        self.display.show_trends = !self.display.show_trends;
    }

    /// Apply a reloaded config.  Thresholds and display flags take effect
    /// immediately; the metric set and buffer capacity stay as started.
    pub fn apply_config(&mut self, cfg: &SocmonConfig) {
        for series in &mut self.series {
            series.thresholds = cfg.thresholds(series.family());
        }
        self.display = DisplayState::from_config(&cfg.display);

        let capacity = self.series.first().map(|s| s.buffer().capacity());
        if capacity.is_some_and(|c| c != cfg.monitor.history_length.max(1)) {
            info!("history_length change takes effect after restart");
        }
        if cfg.sensors.enable_temperature != self.temperature || cfg.sensors.enable_npu != self.npu {
            warn!("sensor family changes take effect after restart");
        }
    }

    pub fn series(&self) -> &[MetricSeries] {
        &self.series
    }

    /// Look up a series by metric id.
    pub fn get(&self, id: &MetricId) -> Option<&MetricSeries> {
        self.series.iter().find(|s| &s.id == id)
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    /// Multi-line text for the current state with embedded color tags.
    pub fn display_text(&self) -> String {
        let mut lines = Vec::new();

        for family in [MetricFamily::Cpu, MetricFamily::Memory] {
            for series in self.family(family) {
                self.push_series(&mut lines, series, "");
            }
        }

        if self.temperature {
            lines.push(String::new());
            lines.push("[bold red]SoC temperatures:[/bold red]".to_string());
            for series in self.family(MetricFamily::Temperature) {
                self.push_series(&mut lines, series, INDENT);
            }
        }

        if self.npu {
            lines.push(String::new());
            lines.push("[bold magenta]NPU load:[/bold magenta]".to_string());
            for series in self.family(MetricFamily::Npu) {
                self.push_series(&mut lines, series, INDENT);
            }
        }

        lines.join("\n")
    }

    fn family(&self, family: MetricFamily) -> impl Iterator<Item = &MetricSeries> {
        self.series.iter().filter(move |s| s.family() == family)
    }

    fn push_series(&self, lines: &mut Vec<String>, series: &MetricSeries, indent: &str) {
        let (Some(current), Some(severity)) = (series.buffer().latest(), series.severity()) else {
            return;
        };
        let family = series.family();
        let unit = family.unit();

        let mut head = format!("{}: {current:.1}{unit}", series.label);
        if family == MetricFamily::Memory {
            if let Some((used, total)) = self.memory_bytes {
                let _ = write!(head, " ({}/{})", format_bytes(used), format_bytes(total));
            }
        }

        // Top-level metrics are bold, per-sensor rows are not.
        let tag = if indent.is_empty() {
            format!("bold {}", severity.tag())
        } else {
            severity.tag().to_string()
        };
        let mut line = format!("{indent}[{tag}]{head}[/{tag}]");

        if self.display.show_trends {
            if let Some(trend) = self.analyzer.annotate(series.buffer()) {
                let _ = write!(line, " {} avg {:.1}{unit}", trend.direction.arrow(), trend.average);
            }
        }
        lines.push(line);

        if self.display.show_graphs {
            let view = SeriesView {
                title:  &series.label,
                unit,
                buffer: series.buffer(),
                scale:  series.scale(),
                width:  self.display.width_for(family),
            };
            let renderer = self.display.renderer_for(family);
            lines.extend(
                renderer
                    .render(&view)
                    .into_iter()
                    .map(|l| format!("{indent}{INDENT}{l}")),
            );
        }
    }
}

/// Remove the markup tags produced by [`DashboardModel::display_text`].
///
/// Only bracketed runs made of known style words are treated as tags; any
/// other bracketed text is kept as-is.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open..];
        match after.find(']').filter(|&close| is_tag(&after[1..close])) {
            Some(close) => rest = &after[close + 1..],
            None => {
                out.push('[');
                rest = &after[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Style words understood inside `[...]` tags.
pub const STYLE_WORDS: &[&str] = &["bold", "red", "yellow", "green", "magenta"];

/// `true` for `bold red`, `/bold red`, `green` and the like.
pub fn is_tag(inner: &str) -> bool {
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let mut words = inner.split(' ').peekable();
    words.peek().is_some() && words.all(|w| STYLE_WORDS.contains(&w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use socmon_config::ThermalZone;
    use socmon_core::DisplayMode;

    fn config() -> SocmonConfig {
        let mut cfg = SocmonConfig::default();
        cfg.sensors.thermal_zones = vec![ThermalZone::new(0, "SoC center"), ThermalZone::new(5, "GPU")];
        cfg.sensors.npu_cores = vec!["Core0".into(), "Core1".into()];
        cfg
    }

    fn full_tick(cpu: f64) -> Readings {
        let mut r = Readings::new();
        r.insert(MetricId::Cpu, cpu);
        r.insert(MetricId::Memory, 40.0);
        r.insert(MetricId::Thermal(0), 45.0);
        r.insert(MetricId::Thermal(5), 50.0);
        r.insert(MetricId::Npu("Core0".into()), 0.0);
        r.insert(MetricId::Npu("Core1".into()), 10.0);
        r
    }

    #[test]
    fn declared_order() {
        let model = DashboardModel::new(&config());
        let ids: Vec<_> = model.series().iter().map(|s| s.id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                MetricId::Cpu,
                MetricId::Memory,
                MetricId::Thermal(0),
                MetricId::Thermal(5),
                MetricId::Npu("Core0".into()),
                MetricId::Npu("Core1".into()),
            ]
        );
    }

    #[test]
    fn missing_reading_leaves_only_that_buffer_unchanged() {
        let mut model = DashboardModel::new(&config());
        model.ingest(&full_tick(10.0));

        let mut partial = Readings::new();
        for s in model.series().iter().filter(|s| s.id != MetricId::Thermal(5)) {
            partial.insert(s.id.clone(), 20.0);
        }
        model.ingest(&partial);

        for s in model.series() {
            let expected = if s.id == MetricId::Thermal(5) { 1 } else { 2 };
            assert_eq!(s.buffer().len(), expected, "{:?}", s.id);
        }
        assert_eq!(model.get(&MetricId::Thermal(5)).unwrap().buffer().latest(), Some(50.0));
    }

    #[test]
    fn severity_tags_in_text() {
        let mut model = DashboardModel::new(&config());
        let mut r = full_tick(95.0);
        r.insert(MetricId::Thermal(0), 65.0);
        let text = model.tick(&r);

        assert!(text.contains("[bold red]CPU: 95.0%[/bold red]"), "{text}");
        assert!(text.contains("[bold green]Memory: 40.0%"), "{text}");
        assert!(text.contains("  [yellow]SoC center: 65.0°C[/yellow]"), "{text}");
        assert!(text.contains("  [green]Core0: 0.0%[/green]"), "{text}");
    }

    #[test]
    fn metrics_without_samples_are_omitted() {
        let mut model = DashboardModel::new(&config());
        let mut r = Readings::new();
        r.insert(MetricId::Cpu, 5.0);
        let text = model.tick(&r);

        assert!(text.contains("CPU: 5.0%"));
        assert!(!text.contains("Memory"));
        assert!(!text.contains("GPU"));
        assert!(text.contains("SoC temperatures:"));
    }

    #[test]
    fn trend_annotation_after_two_samples() {
        let mut model = DashboardModel::new(&config());
        let first = model.tick(&full_tick(50.0));
        assert!(!first.contains("avg"));

        let second = model.tick(&full_tick(52.0));
        assert!(second.contains("CPU: 52.0%[/bold green] ↑ avg 51.0%"), "{second}");

        model.toggle_trend_annotations();
        assert!(!model.display_text().contains("avg"));
    }

    #[test]
    fn sparkline_lines_follow_metric() {
        let mut model = DashboardModel::new(&config());
        model.ingest(&full_tick(0.0));
        model.ingest(&full_tick(100.0));
        let text = model.display_text();
        let lines: Vec<_> = text.lines().collect();
        let cpu = lines.iter().position(|l| l.contains("CPU:")).unwrap();
        assert_eq!(lines[cpu + 1], "  ▁█");

        let gpu = lines.iter().position(|l| l.contains("GPU:")).unwrap();
        assert_eq!(lines[gpu + 1], "    ━━");
    }

    #[test]
    fn single_sample_shows_no_data_marker() {
        let mut model = DashboardModel::new(&config());
        let text = model.tick(&full_tick(1.0));
        let lines: Vec<_> = text.lines().collect();
        let cpu = lines.iter().position(|l| l.contains("CPU:")).unwrap();
        assert_eq!(lines[cpu + 1], "  no data");
    }

    #[test]
    fn toggling_mode_switches_renderer_not_history() {
        let mut model = DashboardModel::new(&config());
        model.ingest(&full_tick(10.0));
        model.ingest(&full_tick(20.0));
        let before: Vec<_> = model.series().iter().map(|s| s.buffer().snapshot()).collect();

        model.toggle_display_mode();
        assert_eq!(model.display().mode, DisplayMode::Grid);
        let text = model.display_text();
        assert!(text.contains("  max: 100.0"), "{text}");
        assert!(text.contains("  min: 0.0"));

        let after: Vec<_> = model.series().iter().map(|s| s.buffer().snapshot()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn graphs_can_be_hidden() {
        let mut cfg = config();
        cfg.display.show_history_graphs = false;
        let mut model = DashboardModel::new(&cfg);
        model.ingest(&full_tick(0.0));
        let text = model.tick(&full_tick(100.0));
        assert!(!text.contains('█'));
        assert!(!text.contains("no data"));
    }

    #[test]
    fn memory_detail_uses_byte_totals() {
        let mut model = DashboardModel::new(&config());
        let mut r = full_tick(1.0);
        r.memory_bytes = Some((2 << 30, 8 << 30));
        let text = model.tick(&r);
        assert!(text.contains("Memory: 40.0% (2.0 GiB/8.0 GiB)"), "{text}");
    }

    #[test]
    fn disabled_families_have_no_series_or_header() {
        let mut cfg = config();
        cfg.sensors.enable_temperature = false;
        cfg.sensors.enable_npu = false;
        let mut model = DashboardModel::new(&cfg);
        assert_eq!(model.series().len(), 2);

        let text = model.tick(&full_tick(1.0));
        assert!(!text.contains("SoC temperatures"));
        assert!(!text.contains("NPU load"));
    }

    #[test]
    fn reload_updates_thresholds_but_keeps_history() {
        let mut model = DashboardModel::new(&config());
        model.ingest(&full_tick(75.0));
        assert!(model.display_text().contains("[bold yellow]CPU"));

        let mut cfg = config();
        cfg.monitor.cpu_warning_threshold = 80.0;
        cfg.monitor.history_length = 5;
        model.apply_config(&cfg);

        assert!(model.display_text().contains("[bold green]CPU"));
        assert_eq!(model.get(&MetricId::Cpu).unwrap().buffer().len(), 1);
        assert_eq!(model.get(&MetricId::Cpu).unwrap().buffer().capacity(), 60);
    }

    #[test]
    fn strip_tags_keeps_plain_brackets() {
        let text = "[bold red]CPU: 95.0%[/bold red] [x] [green]ok[/green]";
        assert_eq!(strip_tags(text), "CPU: 95.0% [x] ok");
        assert_eq!(strip_tags("unclosed [red"), "unclosed [red");
        assert_eq!(strip_tags("[]"), "[]");
    }
}
