// Minimal markdown styling for the draft pane

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Style a block of markdown-ish text, one `Line` per input line.
pub fn styled_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(styled_line).collect()
}

fn styled_line(line: &str) -> Line<'static> {
    if let Some(rest) = line.strip_prefix("### ") {
        return header(rest, Color::Blue);
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return header(rest, Color::Cyan);
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return header(rest, Color::Yellow);
    }
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
    {
        let mut spans = vec![Span::styled("• ", Style::default().fg(Color::Cyan))];
        spans.extend(inline_spans(rest));
        return Line::from(spans);
    }

    Line::from(inline_spans(line))
}

fn header(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(
        text.trim().to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Split a line into plain, `**bold**` and backtick-code spans. Unterminated
/// markers stay literal text.
fn inline_spans(line: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let next_bold = rest.find("**");
        let next_code = rest.find('`');

        let take_bold = match (next_bold, next_code) {
            (Some(bold), Some(code)) => bold < code,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => {
                spans.push(Span::raw(rest.to_string()));
                break;
            }
        };

        if take_bold {
            let start = next_bold.unwrap_or_default();
            let after = &rest[start + 2..];
            if let Some(end) = after.find("**") {
                if start > 0 {
                    spans.push(Span::raw(rest[..start].to_string()));
                }
                spans.push(Span::styled(
                    after[..end].to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                rest = &after[end + 2..];
            } else {
                spans.push(Span::raw(rest.to_string()));
                break;
            }
        } else {
            let start = next_code.unwrap_or_default();
            let after = &rest[start + 1..];
            if let Some(end) = after.find('`') {
                if start > 0 {
                    spans.push(Span::raw(rest[..start].to_string()));
                }
                spans.push(Span::styled(
                    after[..end].to_string(),
                    Style::default().fg(Color::Magenta),
                ));
                rest = &after[end + 1..];
            } else {
                spans.push(Span::raw(rest.to_string()));
                break;
            }
        }
    }

    if spans.is_empty() {
        spans.push(Span::raw(String::new()));
    }
    spans
}
