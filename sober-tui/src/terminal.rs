//! Raw-mode terminal lifecycle
//!
//! The tracker draws on the alternate screen. Whatever way the loop ends,
//! normal return or panic, the user's shell gets its screen, cursor and
//! line discipline back.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::Result;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enter raw mode and the alternate screen
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    tracing::debug!("Terminal ready");

    Ok(terminal)
}

/// Hand the terminal back to the shell
pub fn restore_terminal(mut terminal: Tui) -> Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;

    tracing::debug!("Terminal restored");
    Ok(())
}

/// Leave the alternate screen and make the cursor visible again
fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

/// Restore the terminal before the default panic report is printed
///
/// The panic is also recorded through `tracing`, so it lands in the log
/// file when `SOBRIETY_LOG_FILE` is set.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());

        tracing::error!(panic = %panic_info, "sober-tui panicked");
        original_hook(panic_info);
    }));
}
