//! Converts the dashboard's inline tags into styled ratatui lines.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use socmon_dashboard::is_tag;
use socmon_theme::Theme;

/// Parse tagged text into one [`Line`] per input line.
///
/// Open tags push a style, close tags pop the most recent one.  Bracketed
/// text that is not a tag is rendered literally.
pub fn to_lines(text: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut stack: Vec<Style> = Vec::new();
    text.lines().map(|line| parse_line(line, theme, &mut stack)).collect()
}

fn parse_line(line: &str, theme: &Theme, stack: &mut Vec<Style>) -> Line<'static> {
    let mut spans = Vec::new();
    let mut buf = String::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        buf.push_str(&rest[..open]);
        let after = &rest[open..];
        let Some(close) = after.find(']').filter(|&c| is_tag(&after[1..c])) else {
            buf.push('[');
            rest = &after[1..];
            continue;
        };

        if !buf.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut buf), current(stack)));
        }
        let inner = &after[1..close];
        if inner.starts_with('/') {
            stack.pop();
        } else {
            stack.push(style_for(inner, theme, current(stack)));
        }
        rest = &after[close + 1..];
    }
    buf.push_str(rest);
    if !buf.is_empty() {
        spans.push(Span::styled(buf, current(stack)));
    }
    Line::from(spans)
}

fn current(stack: &[Style]) -> Style {
    stack.last().copied().unwrap_or_default()
}

/// Layer the tag's words on top of the enclosing style.
fn style_for(words: &str, theme: &Theme, base: Style) -> Style {
    words.split(' ').fold(base, |style, word| match word {
        "bold" => style.add_modifier(Modifier::BOLD),
        color => match theme.resolve(color) {
            Some(c) => style.fg(c),
            None => style,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use socmon_core::Severity;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn tags_become_styles() {
        let theme = Theme::default();
        let lines = to_lines("[bold red]CPU: 95.0%[/bold red] ↑ avg 90.0%", &theme);
        assert_eq!(lines.len(), 1);

        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "CPU: 95.0%");
        assert_eq!(spans[0].style.fg, Some(theme.severity(Severity::Critical).to_ratatui()));
        assert!(spans[0].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[1].content, " ↑ avg 90.0%");
        assert_eq!(spans[1].style, Style::default());
    }

    #[test]
    fn literal_brackets_survive() {
        let lines = to_lines("  [green]A76 [big]: 40.0°C[/green]", &Theme::default());
        assert_eq!(plain(&lines[0]), "  A76 [big]: 40.0°C");
    }

    #[test]
    fn one_line_per_input_line() {
        let lines = to_lines("a\n\n[yellow]b[/yellow]", &Theme::default());
        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[2]), "b");
    }

    #[test]
    fn colors_off_keeps_bold_only() {
        let theme = Theme { use_colors: false, ..Theme::default() };
        let lines = to_lines("[bold green]ok[/bold green]", &theme);
        assert_eq!(lines[0].spans[0].style.fg, None);
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
