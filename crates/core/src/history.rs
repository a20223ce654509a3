use std::collections::VecDeque;

/// Fixed-capacity rolling history of samples for one metric.
///
/// Oldest samples are evicted first.  Values are stored exactly as given:
/// NaN or negative readings pass through untouched.
#[derive(Debug, Clone)]
pub struct MetricBuffer {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl MetricBuffer {
    /// Default number of samples kept per metric.
    pub const DEFAULT_CAPACITY: usize = 60;

    /// A zero capacity is raised to one so `latest()` stays meaningful.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if at capacity.
    pub fn append(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Owned copy of the contents, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Most recent sample, `None` before the first append.
    #[must_use]
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    /// The last `n` samples (all of them when fewer exist), oldest first.
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).copied().collect()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &f64> + ExactSizeIterator {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MetricBuffer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl FromIterator<f64> for MetricBuffer {
    /// Collects into a buffer sized to fit every item.
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let samples: VecDeque<f64> = iter.into_iter().collect();
        let capacity = samples.len().max(1);
        Self { samples, capacity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buf = MetricBuffer::new(5);
        for i in 0..100 {
            buf.append(i as f64);
            assert!(buf.len() <= buf.capacity());
        }
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut buf = MetricBuffer::new(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buf.append(v);
        }
        assert_eq!(buf.snapshot(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut buf = MetricBuffer::new(4);
        buf.append(1.0);
        let snap = buf.snapshot();
        buf.append(2.0);
        assert_eq!(snap, vec![1.0]);
    }

    #[test]
    fn latest_on_empty_is_none() {
        let buf = MetricBuffer::default();
        assert_eq!(buf.latest(), None);
        assert_eq!(buf.capacity(), 60);
    }

    #[test]
    fn duplicates_and_nan_are_kept() {
        let mut buf = MetricBuffer::new(4);
        buf.append(7.0);
        buf.append(7.0);
        buf.append(f64::NAN);
        assert_eq!(buf.len(), 3);
        assert!(buf.latest().is_some_and(f64::is_nan));
    }

    #[test]
    fn last_n_takes_the_tail() {
        let buf: MetricBuffer = [1.0, 2.0, 3.0, 4.0].into_iter().collect();
        assert_eq!(buf.last_n(2), vec![3.0, 4.0]);
        assert_eq!(buf.last_n(10), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn zero_capacity_is_raised() {
        let mut buf = MetricBuffer::new(0);
        buf.append(1.0);
        buf.append(2.0);
        assert_eq!(buf.snapshot(), vec![2.0]);
    }
}
