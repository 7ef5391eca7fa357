// Fungeputer: terminal editor and stepper for a Befunge-style language

use std::fs;
use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use fungeputer::config::{init_logging, Config};
use fungeputer::interpreter::engine::Interpreter;
use fungeputer::memory::grid::Grid;
use fungeputer::persistence::storage::{FileStorage, TimedStorage};
use fungeputer::session::SessionController;
use fungeputer::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    if let Err(e) = init_logging(&config) {
        eprintln!("Warning: could not open log file: {}", e);
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = Interpreter::new(Grid::default(), config.stack_limit, Box::new(rng));
    let storage = TimedStorage::new(FileStorage, config.storage_timeout());
    let mut session = SessionController::new(engine, Box::new(storage), config.program.clone());

    if let Some(path) = &config.import {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
        session.import_text(&source);
    } else if !config.no_autoload {
        session.autoload();
    }

    tracing::info!(
        program = %config.program.display(),
        interval_ms = config.interval().as_millis() as u64,
        stack_limit = config.stack_limit,
        "starting"
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, config.interval());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
