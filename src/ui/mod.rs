pub mod markdown;
pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(0),    // Form and draft panes
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_title(frame, chunks[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(46), Constraint::Min(0)])
        .split(chunks[1]);

    widgets::render_form(frame, app, panes[0]);
    widgets::render_draft(frame, app, panes[1]);

    widgets::render_status_bar(frame, app, chunks[2]);
    widgets::render_bottom_bar(frame, app, chunks[3]);

    // Help window on top if active
    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}
