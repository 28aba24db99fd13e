pub mod action;
pub mod app;
pub mod keys;
pub mod layout;
pub mod mouse;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use action::{Action, Request};
pub use app::App;
pub use keys::key_to_action;
pub use layout::StripLayout;
pub use mouse::mouse_to_action;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::Config;
use crate::layout_constants::{TUI_DAY_GEOMETRY, TUI_MONTH_GEOMETRY};
use crate::picker::PickerSettings;
use crate::range::{BoundsResolver, ResolvedBounds};

/// Buffer size for resolved-bounds results
const BOUNDS_CHANNEL_BUFFER_SIZE: usize = 4;

/// Resolve bounds in the background and send the result back to the event loop
fn spawn_resolve(
    resolver: Arc<BoundsResolver>,
    today: NaiveDate,
    refresh: bool,
    tx: mpsc::Sender<ResolvedBounds>,
) {
    tokio::spawn(async move {
        let resolved = if refresh {
            resolver.refresh_on(today).await
        } else {
            resolver.resolve_on(today).await
        };
        debug!("Bounds resolved from {}: {}", resolved.source, resolved.bounds);
        if tx.send(resolved).await.is_err() {
            debug!("Event loop gone, dropping resolved bounds");
        }
    });
}

fn picker_settings(config: &Config) -> PickerSettings {
    PickerSettings {
        day_geometry: TUI_DAY_GEOMETRY,
        month_geometry: TUI_MONTH_GEOMETRY,
        ..config.picker_settings()
    }
}

/// Main entry point for interactive mode
pub async fn run(resolver: Arc<BoundsResolver>, config: Config) -> Result<(), io::Error> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(today, picker_settings(&config), config.theme.clone());

    let (tx, mut rx) = mpsc::channel::<ResolvedBounds>(BOUNDS_CHANNEL_BUFFER_SIZE);
    let Request::ResolveBounds { refresh } = app.initial_request();
    spawn_resolve(Arc::clone(&resolver), today, refresh, tx.clone());

    let result = loop {
        while let Ok(resolved) = rx.try_recv() {
            app.dispatch(Action::BoundsResolved(resolved));
        }

        if let Err(e) = terminal.draw(|f| {
            let area = f.area();
            let layout = StripLayout::calculate(area);
            if app.layout() != Some(layout) {
                debug!("DRAW: layout changed to {:?}", layout);
                app.dispatch(Action::Layout(layout));
            }
            view::render(&app, area, f.buffer_mut());
        }) {
            break Err(e);
        }

        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e),
        }

        let action = match event::read() {
            Ok(Event::Key(key)) => key_to_action(key),
            Ok(Event::Mouse(mouse)) => mouse_to_action(mouse, &app),
            Ok(_) => None,
            Err(e) => break Err(e),
        };

        if let Some(action) = action {
            if let Some(Request::ResolveBounds { refresh }) = app.dispatch(action) {
                spawn_resolve(Arc::clone(&resolver), today, refresh, tx.clone());
            }
        }

        if app.should_quit() {
            debug!("ACTION: Quitting application");
            break Ok(());
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
