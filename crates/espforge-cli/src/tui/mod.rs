//! Interactive TUI: the project form on the left, the generated plan on
//! the right.

pub mod app;
mod ui;
mod worker;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use espforge_core::{Catalog, Locale, TextGenerator};

use app::{App, Request};
use worker::RequestWorker;

/// Launch the interactive TUI.
pub async fn run_tui(
    generator: Arc<dyn TextGenerator>,
    response_language: &str,
    locale: Locale,
) -> Result<()> {
    let mut app = App::new(Catalog::builtin(), locale);
    let mut worker = RequestWorker::new(generator, response_language);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("tui started");
    let result = run_event_loop(&mut terminal, &mut app, &mut worker);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("tui stopped");

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &mut RequestWorker,
) -> Result<()> {
    let tick_rate = app.tick_rate;

    loop {
        // Apply finished requests before drawing.
        while let Some(action) = worker.try_recv() {
            app.apply(action);
        }

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too.
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.handle_key(key) {
                    Some(Request::Suggest) => worker.suggest(),
                    Some(Request::Generate(config)) => worker.generate(config),
                    None => {}
                }
            }
        } else {
            app.on_tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
