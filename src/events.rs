//! Event handling functions for user input and viewer state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::app::App;

/// Polls for keyboard events, dispatches them and advances the animation.
///
/// The poll times out so the animation keeps running without input.
///
/// # Errors
///
/// - [`std::io::Error`]
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(50))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    app.animation_manager.update();

    Ok(())
}

/// Applies a single key press to the viewer state.
///
/// `q` quits, `j` and `k` cycle through the solutions and `h` restarts the animation.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('h') => app.restart(),
        _ => {}
    }
}
