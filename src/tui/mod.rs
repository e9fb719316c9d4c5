// TUI module - Terminal User Interface
//
// Sets up the terminal, runs the event loop and restores the terminal on exit.
// The loop waits on three sources at once: keyboard input, fetch outcomes
// from the list controller, and a redraw tick for spinners and toasts.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod theme;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::paginated::PaginatedList;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use std::io;
use std::time::Duration;
use traits::Interactive;

/// Run the TUI until the user quits
///
/// Mounts `list` (issuing the first fetch) once the terminal is ready.
pub async fn run_tui(
    list: PaginatedList<Value>,
    config: &Config,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(list, config, log_buffer);
    app.list.mount();

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore the terminal even if the loop failed
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = poll_input() => {
                if let Some(Event::Key(key_event)) = input {
                    handle_key_event(app, key_event);
                }
            }

            Some(outcome) = app.list.next_outcome() => {
                app.on_outcome(outcome);
            }

            _ = tick_interval.tick() => {
                app.tick();
            }
        }

        // Outcomes that raced a keypress are applied before the next draw
        app.drain_outcomes();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Short blocking poll for terminal input
async fn poll_input() -> Option<Event> {
    if event::poll(Duration::from_millis(10)).unwrap_or(false) {
        event::read().ok()
    } else {
        None
    }
}

/// Handle keyboard input: global keys first, then the list panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    app.list_panel.handle_key(key_event);
}

fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),
        KeyCode::Home => app.first_page(),
        KeyCode::End => app.last_page(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('y') => app.copy_selected(),
        KeyCode::Char('L') => app.toggle_logs(),
        _ => return false,
    }
    true
}
