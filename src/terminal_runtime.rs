use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::canvas::Canvas;
use crate::config::GridSize;

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Holds the terminal in raw mode on the alternate screen while a game runs.
///
/// Dropping it puts the terminal back, ignoring errors.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Takes over the terminal. Raw mode is undone again if any later step fails.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    /// Returns the terminal size in cells.
    pub fn size(&self) -> io::Result<GridSize> {
        let size = self.terminal.size()?;
        Ok(GridSize {
            width: size.width,
            height: size.height,
        })
    }

    /// Flushes the canvas to the screen, writing only changed cells.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(canvas, area);
        })?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Leaves raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
