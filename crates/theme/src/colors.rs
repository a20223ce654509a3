/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN:  Self = Self { r: 0xa6, g: 0xe3, b: 0xa1 }; // #a6e3a1
    pub const YELLOW: Self = Self { r: 0xf9, g: 0xe2, b: 0xaf }; // #f9e2af
    pub const RED:    Self = Self { r: 0xf3, g: 0x8b, b: 0xa8 }; // #f38ba8
    pub const PURPLE: Self = Self { r: 0xcb, g: 0xa6, b: 0xf7 }; // #cba6f7

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RGB`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])?,
                g: byte(&hex[2..4])?,
                b: byte(&hex[4..6])?,
            }),
            // `#abc` is shorthand for `#aabbcc`.
            3 => Some(Self {
                r: byte(&hex[0..1])? * 0x11,
                g: byte(&hex[1..2])? * 0x11,
                b: byte(&hex[2..3])? * 0x11,
            }),
            _ => None,
        }
    }

    /// Convert to a [`ratatui::style::Color`].
    #[inline]
    pub fn to_ratatui(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#f38ba8"), Some(Color::RED));
        assert_eq!(Color::from_hex("fff"), Some(Color { r: 255, g: 255, b: 255 }));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }
}
