use crate::NO_DATA;
use socmon_core::{GridScale, HistoryRenderer, SeriesView};

/// Minimum number of columns drawn.
pub const MIN_WIDTH: usize = 50;
/// Number of rows drawn.
pub const HEIGHT: usize = 8;

const POINT: char = '█';

/// Full-height history graph against a [`GridScale`].
///
/// Unlike the sparkline, the vertical scale is shared across renders: the
/// floor is fixed at the scale's minimum and the ceiling is the running
/// maximum, so earlier points keep their height as new samples arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricGrid;

impl MetricGrid {
    /// Map a value to a row, 0 being the top (highest) row.
    pub fn row_for(value: f64, scale: &GridScale) -> usize {
        let normalized = if scale.max_value > scale.min_value {
            (value - scale.min_value) / (scale.max_value - scale.min_value)
        } else {
            0.0
        };
        let y = ((1.0 - normalized) * (HEIGHT - 1) as f64).round();
        y.clamp(0.0, (HEIGHT - 1) as f64) as usize
    }

    /// The bare plot: `HEIGHT` rows of at least `MIN_WIDTH` columns.
    pub fn plot(samples: &[f64], scale: &GridScale) -> Vec<String> {
        let width = MIN_WIDTH.max(samples.len());
        let mut grid = vec![vec![' '; width]; HEIGHT];

        if samples.len() > 1 {
            for (x, &value) in samples.iter().enumerate().take(width) {
                grid[Self::row_for(value, scale)][x] = POINT;
            }
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    /// Title with the current value, the ceiling, the plot and the floor.
    pub fn render(title: &str, unit: &str, samples: &[f64], scale: &GridScale) -> Vec<String> {
        let Some(current) = samples.last() else {
            return vec![title.to_string(), NO_DATA.to_string()];
        };

        let mut lines = Vec::with_capacity(HEIGHT + 3);
        lines.push(format!("{title}  now: {current:.1}{unit}"));
        lines.push(format!("max: {:.1}", scale.max_value));
        lines.extend(Self::plot(samples, scale));
        lines.push(format!("min: {:.1}", scale.min_value));
        lines
    }
}

impl HistoryRenderer for MetricGrid {
    fn id(&self) -> &str {
        "grid"
    }

    fn render(&self, view: &SeriesView<'_>) -> Vec<String> {
        Self::render(view.title, view.unit, &view.buffer.snapshot(), view.scale)
    }
}
