use crate::history::MetricBuffer;

/// Minimum change between the last two samples before a move counts as a
/// trend.  Absolute, not scaled to the metric's range.
pub const TREND_MARGIN: f64 = 1.0;

/// Number of trailing samples averaged by default.
pub const DEFAULT_AVERAGE_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
    Steady,
}

impl TrendDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Rising => "↑",
            Self::Falling => "↓",
            Self::Steady => "→",
        }
    }
}

/// Direction plus short-window average, ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    pub average:   f64,
}

/// Short-window statistics over a [`MetricBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer {
    pub window: usize,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self { window: DEFAULT_AVERAGE_WINDOW }
    }
}

impl TrendAnalyzer {
    /// Compare the last sample with the one before it.
    ///
    /// With fewer than two samples this returns `Steady` as a neutral
    /// default; it does not describe a real trend.
    pub fn direction(buffer: &MetricBuffer) -> TrendDirection {
        let mut recent = buffer.iter().rev();
        let (Some(&last), Some(&previous)) = (recent.next(), recent.next()) else {
            return TrendDirection::Steady;
        };

        if last > previous + TREND_MARGIN {
            TrendDirection::Rising
        } else if last < previous - TREND_MARGIN {
            TrendDirection::Falling
        } else {
            TrendDirection::Steady
        }
    }

    /// Mean of the last `min(window, len)` samples; `0.0` for an empty buffer.
    pub fn windowed_average(buffer: &MetricBuffer, window: usize) -> f64 {
        let n = buffer.len().min(window);
        if n == 0 {
            return 0.0;
        }
        buffer.iter().rev().take(n).sum::<f64>() / n as f64
    }

    /// `None` until the buffer holds two samples, so the neutral default
    /// never reaches the screen.
    pub fn annotate(&self, buffer: &MetricBuffer) -> Option<Trend> {
        if buffer.len() < 2 {
            return None;
        }
        Some(Trend {
            direction: Self::direction(buffer),
            average:   Self::windowed_average(buffer, self.window),
        })
    }
}
