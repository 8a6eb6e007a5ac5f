mod api;
mod app;
mod clipboard;
mod config;
mod controller;
mod draft;
mod events;
mod models;
mod prompt;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

use api::OpenAiClient;
use app::App;
use controller::Controller;
use draft::DraftStore;
use events::AppEvent;
use models::Notification;

#[tokio::main]
async fn main() -> Result<()> {
    // Wire up state before touching the terminal so a failure leaves it sane
    let app_config = config::load_config().unwrap_or_default();
    let client = OpenAiClient::from_config(&app_config)?;

    let store = DraftStore::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let controller = Controller::new(client, store.clone(), app_config.model.clone(), tx);
    let mut app = App::new(store.subscribe(), config::default_api_key(), app_config.model);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &controller, &mut rx);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    controller: &Controller<OpenAiClient>,
    events: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Apply anything the action tasks sent back
        while let Ok(app_event) = events.try_recv() {
            handle_app_event(app, app_event);
        }

        app.expire_notification();

        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, controller, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Notice(notification) => app.notify(notification),
        AppEvent::CopyToClipboard(text) => {
            // The copy notification is already on screen; only a bridge
            // failure replaces it
            if let Err(err) = clipboard::copy_to_clipboard(&text) {
                app.notify(Notification::error(format!("Clipboard error: {err}")));
            }
        }
        AppEvent::RequestFinished => app.request_finished(),
    }
}

fn handle_key(
    app: &mut App,
    controller: &Controller<OpenAiClient>,
    key: KeyCode,
    modifiers: KeyModifiers,
) {
    // The help window swallows everything except its own close keys
    if app.show_help {
        if key == KeyCode::Esc
            || (key == KeyCode::Char('h') && modifiers.contains(KeyModifiers::CONTROL))
        {
            app.show_help = false;
        }
        return;
    }

    // Two-step exit on Ctrl+C
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        if app.exit_pending {
            app.quit();
        } else {
            app.exit_pending = true;
        }
        return;
    }
    if app.exit_pending {
        if key == KeyCode::Esc {
            app.exit_pending = false;
            return;
        }
        // Any other key cancels the pending exit and is handled normally
        app.exit_pending = false;
    }

    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Char('h') => app.toggle_help(),
            KeyCode::Char('g') => dispatch_generate(app, controller),
            KeyCode::Char('j') => dispatch_adjust(app, controller),
            KeyCode::Char('y') => controller.copy(),
            KeyCode::Char('r') => {
                app.reset_form();
                controller.reset();
            }
            _ => {}
        }
        return;
    }

    match key {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Left => app.cycle_focused(false),
        KeyCode::Right => app.cycle_focused(true),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_bottom(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Enter => app.toggle_focused(),
        KeyCode::Char(' ') if !app.focus.is_text() => app.toggle_focused(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

// Each press spawns its own attempt; overlapping requests race on the store
// and the last response wins.
fn dispatch_generate(app: &mut App, controller: &Controller<OpenAiClient>) {
    app.request_started();
    let form = app.snapshot();
    let controller = controller.clone();
    tokio::spawn(async move {
        controller.generate(form).await;
    });
}

fn dispatch_adjust(app: &mut App, controller: &Controller<OpenAiClient>) {
    app.request_started();
    let form = app.snapshot();
    let controller = controller.clone();
    tokio::spawn(async move {
        controller.adjust(form).await;
    });
}
