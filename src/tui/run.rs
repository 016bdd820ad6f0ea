//! Terminal lifecycle and the review loop.
//!
//! While the review runs the terminal is in raw mode on the alternate
//! screen with the cursor hidden. [`run_tui`] puts it back on every exit
//! path, and a panic hook does the same if drawing code panics.
//!
//! # Example
//!
//! ```no_run
//! use dupereview::actions::FileRemover;
//! use dupereview::duplicates::Registry;
//! use dupereview::scanner::{Walker, WalkerConfig};
//! use dupereview::tui::{run_tui, App};
//! use std::path::Path;
//!
//! let mut registry = Registry::new(Walker::new(WalkerConfig::default()), FileRemover::trash());
//! registry.scan(Path::new("."), None).unwrap();
//!
//! let mut app = App::new(registry);
//! run_tui(&mut app).unwrap();
//! ```

use std::io::{self, Stdout};
use std::panic;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use thiserror::Error;

use super::app::App;
use super::events::{EventError, EventHandler};
use super::ui::render;

/// Frame rate limit, roughly 60 FPS.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Failures that end the interactive review.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Drawing or terminal mode changes failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading input failed.
    #[error("event error: {0}")]
    Event(#[from] EventError),
}

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive review until the user quits.
///
/// # Errors
///
/// Returns [`TuiError`] if the terminal cannot be set up, drawn to, or read.
/// The terminal is restored in every case.
pub fn run_tui(app: &mut App) -> Result<(), TuiError> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app);

    restore_terminal();
    let _ = panic::take_hook();

    result
}

fn run_tui_inner(app: &mut App) -> Result<(), TuiError> {
    let mut terminal = setup_terminal()?;
    let event_handler = EventHandler::new();
    let mut last_render = Instant::now();

    while !app.should_quit() {
        terminal.draw(|frame| render(frame, app))?;

        if let Some(action) = event_handler.poll(POLL_TIMEOUT, app.mode())? {
            app.handle_action(action);
        }

        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }

    log::info!(
        "Review finished: {} files deleted, {} groups remaining",
        app.registry().deleted_paths().len(),
        app.registry().group_count()
    );
    Ok(())
}

fn setup_terminal() -> Result<Terminal, TuiError> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Best-effort terminal restore; safe to call more than once.
fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    log::debug!("Terminal restored");
}
