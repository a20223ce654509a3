use crate::NO_DATA;
use socmon_core::{HistoryRenderer, SeriesView};

/// Eight intensity levels, lowest first.
pub const GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Drawn once per sample when the window has no variation.
pub const FLAT: char = '━';

/// One-line history strip scaled to its own window.
///
/// Normalization is local: the lowest sample in the window maps to `▁` and
/// the highest to `█`, so the same buffer can look different at different
/// widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct SparklineRenderer;

impl SparklineRenderer {
    /// Render the last `width` samples (all of them when fewer exist).
    pub fn render(samples: &[f64], width: usize) -> String {
        if samples.len() < 2 {
            return NO_DATA.to_string();
        }

        let window = &samples[samples.len().saturating_sub(width)..];
        if window.is_empty() {
            return String::new();
        }

        let min_val = window.iter().copied().fold(f64::INFINITY, f64::min);
        let max_val = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max_val == min_val {
            return std::iter::repeat(FLAT).take(window.len()).collect();
        }

        let range = max_val - min_val;
        let last = GLYPHS.len() - 1;
        window
            .iter()
            .map(|&value| {
                let normalized = (value - min_val) / range;
                let idx = (normalized * GLYPHS.len() as f64).floor() as usize;
                GLYPHS[idx.min(last)]
            })
            .collect()
    }
}

impl HistoryRenderer for SparklineRenderer {
    fn id(&self) -> &str {
        "sparkline"
    }

    fn render(&self, view: &SeriesView<'_>) -> Vec<String> {
        vec![Self::render(&view.buffer.snapshot(), view.width)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socmon_core::{GridScale, MetricBuffer};

    #[test]
    fn too_few_samples_is_no_data() {
        assert_eq!(SparklineRenderer::render(&[], 20), NO_DATA);
        assert_eq!(SparklineRenderer::render(&[42.0], 20), NO_DATA);
    }

    #[test]
    fn flat_window_repeats_flat_glyph() {
        assert_eq!(SparklineRenderer::render(&[50.0, 50.0, 50.0], 20), "━━━");
    }

    #[test]
    fn extremes_map_to_lowest_and_highest() {
        assert_eq!(SparklineRenderer::render(&[0.0, 100.0], 20), "▁█");
    }

    #[test]
    fn intermediate_levels_use_floor() {
        // 0.5 * 8 = 4 → '▅'; 0.25 * 8 = 2 → '▃'.
        assert_eq!(SparklineRenderer::render(&[0.0, 25.0, 50.0, 100.0], 20), "▁▃▅█");
    }

    #[test]
    fn only_last_width_samples_are_drawn() {
        let out = SparklineRenderer::render(&[1000.0, 0.0, 10.0, 20.0], 3);
        assert_eq!(out.chars().count(), 3);
        assert_eq!(out, "▁▅█");
    }

    #[test]
    fn normalization_depends_on_window() {
        let samples = [0.0, 100.0, 50.0, 60.0];
        assert_ne!(
            SparklineRenderer::render(&samples, 4).chars().last(),
            SparklineRenderer::render(&samples, 2).chars().last()
        );
    }

    #[test]
    fn flat_tail_of_varied_buffer_is_flat() {
        assert_eq!(SparklineRenderer::render(&[0.0, 7.0, 7.0], 2), "━━");
    }

    #[test]
    fn renders_through_trait() {
        let buffer: MetricBuffer = [0.0, 100.0].into_iter().collect();
        let scale = GridScale::default();
        let view = SeriesView {
            title:  "CPU",
            unit:   "%",
            buffer: &buffer,
            scale:  &scale,
            width:  20,
        };
        assert_eq!(HistoryRenderer::render(&SparklineRenderer, &view), vec!["▁█"]);
    }

    #[test]
    fn single_column_counts_whole_history() {
        let buffer: MetricBuffer = [10.0, 20.0, 30.0].into_iter().collect();
        let scale = GridScale::default();
        let view = SeriesView {
            title:  "CPU",
            unit:   "%",
            buffer: &buffer,
            scale:  &scale,
            width:  1,
        };

        let direct = SparklineRenderer::render(&buffer.snapshot(), 1);
        assert_eq!(direct, "━");
        assert_eq!(HistoryRenderer::render(&SparklineRenderer, &view), vec![direct]);
    }
}
