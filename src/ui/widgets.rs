use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormField};
use crate::models::{AdjustOption, Severity};

pub fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Draft Master",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " :: AI-powered email and message drafting",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let adjust_value = app
        .adjust_option
        .map_or("(none)", AdjustOption::directive);

    let mut lines = vec![
        field_line(app, FormField::ApiKey, "API key", &mask(&app.api_key)),
        field_line(app, FormField::Tone, "Tone", app.tone.label()),
        field_line(app, FormField::Length, "Length", app.length.label()),
        Line::from(""),
        field_line(
            app,
            FormField::InitialMessage,
            "Message",
            &app.initial_message,
        ),
        field_line(
            app,
            FormField::CustomInstructions,
            "Instructions",
            &app.custom_instructions,
        ),
        Line::from(""),
        toggle_line(app, FormField::EmailMode, "Email mode", app.email_mode),
        toggle_line(app, FormField::FixSpelling, "Fix spelling", app.fix_spelling),
        toggle_line(app, FormField::FixGrammar, "Fix grammar", app.fix_grammar),
        toggle_line(
            app,
            FormField::FixPunctuation,
            "Fix punctuation",
            app.fix_punctuation,
        ),
        Line::from(""),
        field_line(app, FormField::AdjustOption, "Adjust", adjust_value),
    ];

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Your API key is never stored.",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Form ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(form, area);
}

fn field_line(app: &App, field: FormField, label: &str, value: &str) -> Line<'static> {
    let focused = app.focus == field;
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value.to_string()),
    ])
}

fn toggle_line(app: &App, field: FormField, label: &str, on: bool) -> Line<'static> {
    let focused = app.focus == field;
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let box_style = if on {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} ", toggle_marker(on)), box_style),
        Span::styled(label.to_string(), label_style),
    ])
}

pub const fn toggle_marker(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Hide the key on screen; only its length shows.
pub fn mask(key: &str) -> String {
    "•".repeat(key.chars().count())
}

pub fn render_draft(frame: &mut Frame, app: &mut App, area: Rect) {
    let draft = app.current_draft();

    let lines = if draft.is_empty() {
        vec![Line::from(Span::styled(
            "Generated message will appear here...",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        super::markdown::styled_lines(&draft)
    };

    // Account for the borders, then clamp the scroll position to the visual
    // height of the wrapped text, like the chat history pane this grew from.
    let available_width = (area.width.saturating_sub(2)).max(1) as usize;
    let mut total_visual_lines = 0;
    for line in &lines {
        let line_width = line.width();
        total_visual_lines += if line_width == 0 {
            1
        } else {
            line_width.div_ceil(available_width)
        };
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);
    if app.scroll_offset != actual_scroll {
        app.scroll_offset = actual_scroll;
    }

    let draft_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Draft ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(draft_widget, area);
}

pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    if let Some(notification) = &app.notification {
        let color = match notification.severity {
            Severity::Info => Color::Green,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        };
        let text = format!(
            "[{}] {}",
            notification.raised.format("%H:%M:%S"),
            notification.message
        );
        let notice =
            Paragraph::new(text).style(Style::default().fg(color).add_modifier(Modifier::BOLD));
        frame.render_widget(notice, halves[0]);
    }

    let working = if app.is_loading() { " [Working...]" } else { "" };
    let status = Paragraph::new(format!("{}{working}", app.model))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, halves[1]);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "Ctrl+G: Generate | Ctrl+J: Adjust | Ctrl+Y: Copy | Ctrl+R: Reset | Ctrl+H: Help",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Draft Master - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Actions:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Ctrl+G        - Generate a draft"),
        Line::from("  Ctrl+J        - Adjust the draft"),
        Line::from("  Ctrl+Y        - Copy draft to clipboard"),
        Line::from("  Ctrl+R        - Reset form and draft"),
        Line::from(""),
        Line::from(Span::styled(
            "Form:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Tab/Shift+Tab - Move between fields"),
        Line::from("  Left/Right    - Change a select"),
        Line::from("  Space/Enter   - Flip a toggle"),
        Line::from("  Typing        - Edit the focused field"),
        Line::from(""),
        Line::from(Span::styled(
            "Draft pane:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Up/Down       - Scroll"),
        Line::from("  PgUp/PgDn     - Scroll faster"),
        Line::from("  Home/End      - Jump to start/end"),
        Line::from(""),
        Line::from(Span::styled(
            "General:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit"),
        Line::from("  Ctrl+C twice  - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    // Calculate centered position
    let popup_width = 60;
    let popup_height = 28;
    let x = (area.width.saturating_sub(popup_width)) / 2;
    let y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: popup_width.min(area.width),
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_content_but_keeps_length() {
        assert_eq!(mask(""), "");
        assert_eq!(mask("abc"), "•••");
        assert_eq!(mask("sk-1234"), "•••••••");
    }

    #[test]
    fn test_toggle_marker() {
        assert_eq!(toggle_marker(true), "[x]");
        assert_eq!(toggle_marker(false), "[ ]");
    }
}
