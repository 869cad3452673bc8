// pointfield - animated point-and-line constellation backdrop
// A portfolio-style page for the terminal with a live hero background

mod app;
mod field;
mod logging;
mod schedule;
mod theme;
mod ui;

use anyhow::Result;
use app::{event::handle_event, AppState};
use crossterm::{
    event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Instant;
use theme::{store::os_preference, FileThemeStore, ThemeState, ThemeStore};

fn main() -> Result<()> {
    logging::init()?;

    // Resolve the theme before entering the alternate screen
    let theme = ThemeState::init(theme_store(), os_preference());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, AppState::new(theme));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }
    Ok(())
}

/// Preference file in the config directory, in memory when there is none
fn theme_store() -> Box<dyn ThemeStore> {
    match FileThemeStore::from_env() {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "Theme preference will not be saved");
            Box::new(theme::store::MemoryThemeStore::default())
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: AppState,
) -> Result<()> {
    loop {
        let frame_start = Instant::now();
        let drew_frame = app.on_tick(frame_start);
        terminal.draw(|f| ui::draw(f, &mut app, frame_start))?;
        if drew_frame {
            app.record_frame_time(frame_start.elapsed());
        }

        if !app.running {
            return Ok(());
        }

        if event::poll(app.poll_timeout(Instant::now()))? {
            let event = event::read()?;
            if !handle_event(&mut app, event, Instant::now()) {
                return Ok(());
            }
        }
    }
}
