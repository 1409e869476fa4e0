//! Screen lifecycle of the list view.
//!
//! Each screen instance owns the terminal in raw mode on the alternate
//! screen. When the session asks for a restart (an external program used
//! the terminal), the instance is torn down and a new one is built around
//! the same in-memory session.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::core::{screen_channel, Action, Component, EventHandler, EventType, ScreenExit, ScreenSignals};
use super::session::ListSession;
use crate::config::UiConfig;

type ListTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the list until the user quits.
pub async fn run_list_ui(session: &mut ListSession, config: &UiConfig) -> Result<()> {
    loop {
        let (control, mut signals) = screen_channel();
        session.attach_screen(control);

        let mut terminal = init_terminal().context("Failed to set up the terminal")?;
        let result = run_screen(&mut terminal, session, &mut signals, config).await;
        restore_terminal(&mut terminal)?;

        match result? {
            ScreenExit::Quit => return Ok(()),
            ScreenExit::Restart => log::debug!("Restarting list screen"),
        }
    }
}

fn init_terminal() -> Result<ListTerminal> {
    enable_raw_mode()?;
    let screen = enter_alternate_screen();
    undo_on_error(screen, disable_raw_mode)
}

fn enter_alternate_screen() -> Result<ListTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Run `undo` when `result` failed, keeping the original error.
fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce() -> io::Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(e) = undo() {
            log::warn!("Could not restore the terminal: {e}");
        }
    }
    result
}

fn restore_terminal(terminal: &mut ListTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_screen(
    terminal: &mut ListTerminal,
    session: &mut ListSession,
    signals: &mut ScreenSignals,
    config: &UiConfig,
) -> Result<ScreenExit> {
    let size = terminal.size()?;
    session
        .handle_event(EventType::Resize(size.width, size.height))
        .await;

    let mut event_handler = EventHandler::new();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            session.render(f, area);
        })?;
        event_handler.set_ticking(session.state().timer.running);

        let event = event_handler.next_event().await?;
        let action = session.handle_event(event).await;

        if action == Action::Bell && config.bell {
            ring_bell(terminal.backend_mut())?;
        }

        if let Some(exit) = signals.poll() {
            return Ok(exit);
        }
    }
}

fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}
