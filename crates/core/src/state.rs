use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Sensor family a metric belongs to.  Thresholds, graph widths and renderer
/// overrides are configured per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    Cpu,
    Memory,
    Temperature,
    Npu,
}

impl MetricFamily {
    /// Unit suffix appended to displayed values.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Cpu | Self::Memory | Self::Npu => "%",
        }
    }
}

/// Identifies one tracked metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricId {
    Cpu,
    Memory,
    /// Thermal zone by its sysfs index (`thermal_zone{N}`).
    Thermal(u32),
    /// NPU core by the name the driver reports, e.g. `"Core0"`.
    Npu(String),
}

impl MetricId {
    pub fn family(&self) -> MetricFamily {
        match self {
            Self::Cpu => MetricFamily::Cpu,
            Self::Memory => MetricFamily::Memory,
            Self::Thermal(_) => MetricFamily::Temperature,
            Self::Npu(_) => MetricFamily::Npu,
        }
    }
}

/// The readings gathered by one acquisition pass.
///
/// A metric missing from the map had no value this tick.  Absence is never
/// encoded as a sentinel such as `0.0` or `-1.0`.
#[derive(Debug, Clone)]
pub struct Readings {
    values: HashMap<MetricId, f64>,
    /// RAM `(used, total)` in bytes, when the OS reported them.
    pub memory_bytes: Option<(u64, u64)>,
    /// Wall-clock time the pass started.
    pub taken_at: DateTime<Local>,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            memory_bytes: None,
            taken_at: Local::now(),
        }
    }
}

impl Readings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `id`, replacing any earlier value this pass.
    pub fn insert(&mut self, id: MetricId, value: f64) {
        self.values.insert(id, value);
    }

    /// The value obtained for `id` this tick, if any.
    #[must_use]
    pub fn read(&self, id: &MetricId) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_metric_reads_as_none() {
        let mut readings = Readings::new();
        readings.insert(MetricId::Cpu, 12.5);

        assert_eq!(readings.read(&MetricId::Cpu), Some(12.5));
        assert_eq!(readings.read(&MetricId::Memory), None);
        assert_eq!(readings.read(&MetricId::Npu("Core0".into())), None);
    }

    #[test]
    fn zero_is_a_real_reading() {
        let mut readings = Readings::new();
        readings.insert(MetricId::Npu("Core1".into()), 0.0);
        assert_eq!(readings.read(&MetricId::Npu("Core1".into())), Some(0.0));
    }

    #[test]
    fn family_of_each_id() {
        assert_eq!(MetricId::Thermal(3).family(), MetricFamily::Temperature);
        assert_eq!(MetricId::Npu("Core2".into()).family(), MetricFamily::Npu);
        assert_eq!(MetricFamily::Temperature.unit(), "°C");
    }
}
