pub mod colors;

pub use colors::Color;

use socmon_config::ThemeConfig;
use socmon_core::Severity;

/// Compiled theme derived from [`ThemeConfig`].
///
/// Resolves the semantic color tags embedded in display text (`red`,
/// `yellow`, `green`, `magenta`) to terminal colors.  Calling
/// [`Theme::from_config`] is infallible — invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub normal:     Color,
    pub warning:    Color,
    pub critical:   Color,
    pub accent:     Color,
    /// When `false`, every tag resolves to no color at all.
    pub use_colors: bool,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig, use_colors: bool) -> Self {
        Self {
            normal:   Color::from_hex(&cfg.normal).unwrap_or(Color::GREEN),
            warning:  Color::from_hex(&cfg.warning).unwrap_or(Color::YELLOW),
            critical: Color::from_hex(&cfg.critical).unwrap_or(Color::RED),
            accent:   Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE),
            use_colors,
        }
    }

    /// Color for a severity band.
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Critical => self.critical,
        }
    }

    /// Terminal color for a markup tag name, `None` for unknown names or
    /// when colors are disabled.
    pub fn resolve(&self, tag: &str) -> Option<ratatui::style::Color> {
        if !self.use_colors {
            return None;
        }
        let color = match tag {
            "green" => self.severity(Severity::Normal),
            "yellow" => self.severity(Severity::Warning),
            "red" => self.severity(Severity::Critical),
            "magenta" => self.accent,
            _ => return None,
        };
        Some(color.to_ratatui())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tags_resolve_to_their_band() {
        let theme = Theme::default();
        for severity in [Severity::Normal, Severity::Warning, Severity::Critical] {
            assert_eq!(
                theme.resolve(severity.tag()),
                Some(theme.severity(severity).to_ratatui())
            );
        }
    }

    #[test]
    fn invalid_hex_falls_back() {
        let cfg = ThemeConfig {
            critical: "nope".into(),
            ..ThemeConfig::default()
        };
        assert_eq!(Theme::from_config(&cfg, true).critical, Color::RED);
    }

    #[test]
    fn colors_can_be_disabled() {
        let theme = Theme::from_config(&ThemeConfig::default(), false);
        assert_eq!(theme.resolve("red"), None);
        assert_eq!(Theme::default().resolve("bold"), None);
    }
}
