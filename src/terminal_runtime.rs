use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::error::{Result, SnakeError};
use crate::game::GameState;
use crate::renderer::{self, CanvasLayout, board_size};

type BoardTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Full-screen terminal that shows one board for the length of a game run.
///
/// Raw mode and the alternate screen are left again on drop and on panic.
pub struct BoardSession {
    terminal: BoardTerminal,
    layout: CanvasLayout,
}

impl BoardSession {
    /// Takes over the terminal, failing early when the board cannot fit.
    pub fn open(layout: CanvasLayout) -> Result<Self> {
        let (columns, rows) = terminal::size()?;
        ensure_board_fits(board_size(layout.grid), (columns, rows))?;

        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error.into());
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal, layout }),
            Err(error) => {
                let _ = leave_board_screen();
                Err(error.into())
            }
        }
    }

    /// Draws `state` as the next frame.
    pub fn show(&mut self, state: &GameState) -> Result<()> {
        let layout = self.layout;
        self.terminal
            .draw(|frame| renderer::render(frame, state, layout))?;
        Ok(())
    }
}

impl Drop for BoardSession {
    fn drop(&mut self) {
        let _ = leave_board_screen();
    }
}

/// Checks that a `needed` board (columns, rows) fits in `actual`.
pub fn ensure_board_fits(needed: (u16, u16), actual: (u16, u16)) -> Result<()> {
    if needed.0 > actual.0 || needed.1 > actual.1 {
        return Err(SnakeError::TerminalTooSmall { needed, actual });
    }
    Ok(())
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave_board_screen();
        previous(info);
    }));
}

fn leave_board_screen() -> io::Result<()> {
    let _ = disable_raw_mode();
    execute!(io::stdout(), Show, LeaveAlternateScreen)
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::error::SnakeError;
    use crate::renderer::board_size;

    use super::ensure_board_fits;

    #[test]
    fn default_board_fits_a_large_terminal() {
        let needed = board_size(GridSize {
            width: 35,
            height: 35,
        });

        assert!(ensure_board_fits(needed, (72, 37)).is_ok());
        assert!(ensure_board_fits(needed, (200, 60)).is_ok());
    }

    #[test]
    fn narrow_or_short_terminal_is_rejected() {
        let needed = board_size(GridSize {
            width: 35,
            height: 35,
        });

        for actual in [(71, 37), (72, 36), (80, 24)] {
            assert!(matches!(
                ensure_board_fits(needed, actual),
                Err(SnakeError::TerminalTooSmall { .. })
            ));
        }
    }
}
