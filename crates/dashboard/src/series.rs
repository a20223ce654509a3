use socmon_core::{GridScale, MetricBuffer, MetricFamily, MetricId, Severity, Thresholds};

/// One tracked metric: its history, thresholds and grid scale.
///
/// Created once at startup; only [`MetricSeries::append`] mutates it.
#[derive(Debug, Clone)]
pub struct MetricSeries {
    pub id:         MetricId,
    pub label:      String,
    pub thresholds: Thresholds,
    buffer:         MetricBuffer,
    scale:          GridScale,
}

impl MetricSeries {
    pub fn new(id: MetricId, label: impl Into<String>, thresholds: Thresholds, capacity: usize) -> Self {
        Self {
            id,
            label: label.into(),
            thresholds,
            buffer: MetricBuffer::new(capacity),
            scale: GridScale::default(),
        }
    }

    pub fn family(&self) -> MetricFamily {
        self.id.family()
    }

    /// Record a sample in the history and the grid's running scale.
    pub fn append(&mut self, sample: f64) {
        self.buffer.append(sample);
        self.scale.observe(sample);
    }

    pub fn buffer(&self) -> &MetricBuffer {
        &self.buffer
    }

    pub fn scale(&self) -> &GridScale {
        &self.scale
    }

    /// Band of the latest sample, `None` before the first sample.
    pub fn severity(&self) -> Option<Severity> {
        self.buffer.latest().map(|v| self.thresholds.classify(v))
    }
}
