// Terminal UI - the face of LocalTube
// Pure consumer of engine snapshots; key presses become intents sent back to the engine

mod app;          // main application state and event loop
pub mod events;   // keyboard/resize event handling
pub mod grid;     // card grid selection + boundary detection
pub mod launcher; // hands videos to an external player

pub use app::App;
pub use events::{AppEvent, EventHandler};
pub use grid::GridCursor;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

/// Owns the alternate screen for the lifetime of the app
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    _restore: RestoreGuard,
}

/// Puts the terminal back even if the app unwinds
struct RestoreGuard;

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);
    }
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        // Guard first, so a failure halfway through still restores the terminal
        let restore = RestoreGuard;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            _restore: restore,
        })
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for TerminalManager {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        let _ = self.terminal.show_cursor();
    }
}
