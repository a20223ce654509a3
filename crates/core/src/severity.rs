/// Severity band of a reading, ordered `Normal < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Semantic color tag embedded in display text.  Downstream consumers
    /// match on these exact names.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Normal => "green",
            Self::Warning => "yellow",
            Self::Critical => "red",
        }
    }
}

/// Per-metric `(warning, critical)` pair.
///
/// `warning < critical` is expected but not enforced: with
/// `warning >= critical` the Warning band is simply unreachable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub warning:  f64,
    pub critical: f64,
}

impl Thresholds {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    #[inline]
    pub fn classify(&self, value: f64) -> Severity {
        classify(value, self)
    }
}

/// Map a reading to its band.  Comparisons are strict: a value equal to a
/// threshold stays in the lower band.
pub fn classify(value: f64, thresholds: &Thresholds) -> Severity {
    if value > thresholds.critical {
        Severity::Critical
    } else if value > thresholds.warning {
        Severity::Warning
    } else {
        Severity::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: Thresholds = Thresholds::new(70.0, 90.0);
    const EPS: f64 = 1e-9;

    #[test]
    fn critical_boundary_is_exclusive() {
        assert_eq!(classify(90.0, &T), Severity::Warning);
        assert_eq!(classify(90.0 + EPS, &T), Severity::Critical);
    }

    #[test]
    fn warning_boundary_is_exclusive() {
        assert_eq!(classify(70.0, &T), Severity::Normal);
        assert_eq!(classify(70.0 + EPS, &T), Severity::Warning);
    }

    #[test]
    fn inverted_thresholds_skip_warning() {
        let t = Thresholds::new(90.0, 70.0);
        assert_eq!(t.classify(80.0), Severity::Critical);
        assert_eq!(t.classify(60.0), Severity::Normal);
    }

    #[test]
    fn bands_are_ordered() {
        assert!(Severity::Normal < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn tags_match_color_names() {
        assert_eq!(Severity::Normal.tag(), "green");
        assert_eq!(Severity::Warning.tag(), "yellow");
        assert_eq!(Severity::Critical.tag(), "red");
    }
}
