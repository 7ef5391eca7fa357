//! Session controller
//!
//! The [`SessionController`] owns the one [`Interpreter`] for the lifetime of
//! the process and maps discrete [`Command`]s onto it. It is a small state
//! machine:
//!
//! ```text
//!            run                      help
//!   Editing ─────────▶ Running    Editing ─────▶ HelpPopup
//!      ▲  ◀───────────   │            ▲   dismiss   │
//!      │   any command   │            └─────────────┘
//!      │   or halt       │
//!      └── step / navigate / write / admin (stay in Editing)
//! ```
//!
//! # Ticks
//!
//! [`SessionController::tick`] is the only entry point that advances time.
//! One tick handles at most one command and then, if the session is still
//! Running, exactly one engine step. The controller has no clock; the host
//! decides how often to tick (see [`crate::ui::app`]).
//!
//! A command received while Running first drops back to Editing and is then
//! handled as if it arrived in Editing, so the interruption always happens
//! before the next autoplay step.

pub mod command;
pub mod errors;
pub mod view;

pub use command::Command;
pub use errors::SessionError;
pub use view::SessionView;

use command::is_writable;
use crate::interpreter::constants::Cell;
use crate::interpreter::engine::{Interpreter, Position, StepOutcome};
use crate::memory::grid::Grid;
use crate::persistence::{self, storage::Storage};
use std::io;
use std::path::PathBuf;

/// Top-level session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Editing,
    Running,
    HelpPopup,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Editing => "EDIT",
            Mode::Running => "RUN",
            Mode::HelpPopup => "HELP",
        }
    }
}

/// Popup overlay shown above the program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Popup {
    #[default]
    None,
    Help,
}

/// What an open popup wants after seeing a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupResponse {
    Keep,
    Close,
}

impl Popup {
    /// Feed a command to the popup; everything but dismiss is swallowed
    ///
    /// The help popup also closes on a written backtick, the handheld's
    /// dismiss key.
    pub fn handle_command(self, command: Command) -> PopupResponse {
        match (self, command) {
            (Popup::None, _) => PopupResponse::Close,
            (Popup::Help, Command::Dismiss | Command::Write('`')) => PopupResponse::Close,
            (Popup::Help, _) => PopupResponse::Keep,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Popup::None => "",
            Popup::Help => " Help ",
        }
    }

    /// Body text of the popup, one entry per line
    pub fn lines(self) -> &'static [&'static str] {
        match self {
            Popup::None => &[],
            Popup::Help => &[
                "0-9 push digit     + - * / % arithmetic",
                "!  logical not     `  pop b, a; 1 if a>b else 0",
                "> < ^ v  set direction    ?  random direction",
                "_  pop; right if 0, left otherwise",
                "|  pop; down if 0, up otherwise",
                "\"  toggle string mode     :  duplicate top",
                "\\  swap top two           $  pop and discard",
                "#  skip next cell          @  halt",
                "g  pop y, x; push cell     p  pop y, x, v; store v",
                "",
                "arrows move   Tab step   Enter run   ^S save   ^L load",
                "^X clear program   ^K clear stack   ^R reset   ^Q quit",
                "Esc or ` closes this help",
            ],
        }
    }
}

/// What happened during one [`SessionController::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The display should repaint
    pub redraw: bool,
    /// An engine step ran this tick
    pub stepped: bool,
}

/// Owns the interpreter and drives it from commands
pub struct SessionController {
    engine: Interpreter,
    mode: Mode,
    storage: Box<dyn Storage>,
    program_path: PathBuf,
    status_message: String,
    last_error: Option<SessionError>,
}

impl SessionController {
    pub fn new(engine: Interpreter, storage: Box<dyn Storage>, program_path: PathBuf) -> Self {
        SessionController {
            engine,
            mode: Mode::Editing,
            storage,
            program_path,
            status_message: String::from("Ready!"),
            last_error: None,
        }
    }

    pub fn engine(&self) -> &Interpreter {
        &self.engine
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn popup(&self) -> Popup {
        match self.mode {
            Mode::HelpPopup => Popup::Help,
            _ => Popup::None,
        }
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        self.last_error.as_ref()
    }

    /// Handle at most one command, then step once if Running
    pub fn tick(&mut self, command: Option<Command>) -> TickReport {
        let mut report = TickReport::default();

        if let Some(command) = command {
            report.redraw = self.handle_command(command);
        }

        if self.mode == Mode::Running {
            self.step_engine();
            report.stepped = true;
            report.redraw = true;
        }

        report
    }

    /// Route a command according to the current mode; returns whether state changed
    fn handle_command(&mut self, command: Command) -> bool {
        match self.mode {
            Mode::HelpPopup => match self.popup().handle_command(command) {
                PopupResponse::Close => {
                    self.mode = Mode::Editing;
                    true
                }
                PopupResponse::Keep => false,
            },
            Mode::Running => {
                self.mode = Mode::Editing;
                self.set_status("Stopped");
                self.apply(command);
                true
            }
            Mode::Editing => self.apply(command),
        }
    }

    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Step => {
                if self.engine.is_halted() {
                    self.set_status("Program halted; reset or load to run again");
                } else {
                    self.set_status("Stepped");
                    self.step_engine();
                }
            }
            Command::Run => {
                if self.engine.is_halted() {
                    self.set_status("Program halted; reset or load to run again");
                } else {
                    self.mode = Mode::Running;
                    self.set_status("Running...");
                }
            }
            Command::Help => {
                self.mode = Mode::HelpPopup;
            }
            Command::Dismiss => return false,
            Command::Navigate(direction) => {
                self.engine.navigate(direction);
            }
            Command::Write(c) => {
                if !is_writable(c) {
                    return false;
                }
                self.engine.write_current(c as Cell);
            }
            Command::ClearProgram => {
                self.engine.grid_mut().clear();
                self.set_status("Program cleared");
                tracing::info!("program cleared");
            }
            Command::ClearStack => {
                self.engine.stack_mut().clear();
                self.set_status("Stack cleared");
            }
            Command::Reset => {
                self.engine.reset();
                self.set_status("Reset to origin");
            }
            Command::Save => {
                if let Err(e) = self.save_program() {
                    self.report_error("Save failed", e);
                }
            }
            Command::Load => {
                if let Err(e) = self.load_program() {
                    self.report_error("Load failed", e);
                }
            }
        }
        true
    }

    /// Run one engine step and fold its outcome into the session state
    fn step_engine(&mut self) {
        match self.engine.step() {
            Ok(StepOutcome::Continued) => {}
            Ok(StepOutcome::Halted) => {
                let Position { x, y } = self.engine.position();
                self.mode = Mode::Editing;
                self.set_status(format!(
                    "Halted at ({}, {}) after {} steps",
                    x,
                    y,
                    self.engine.steps()
                ));
            }
            Err(e) => {
                let Position { x, y } = e.position();
                tracing::debug!(x, y, fatal = e.is_fatal(), "step failed");
                if e.is_fatal() {
                    self.mode = Mode::Editing;
                }
                self.status_message = e.to_string();
                self.last_error = Some(SessionError::Runtime(e));
            }
        }
    }

    /// Encode the grid and write it to the program path
    pub fn save_program(&mut self) -> Result<(), SessionError> {
        let bytes = persistence::encode(self.engine.grid())?;
        self.storage.write(&self.program_path, &bytes)?;
        tracing::info!(path = %self.program_path.display(), bytes = bytes.len(), "program saved");
        self.set_status(format!("Saved {}", self.program_path.display()));
        Ok(())
    }

    /// Read and decode the program image; the grid is only replaced on success
    pub fn load_program(&mut self) -> Result<(), SessionError> {
        let bytes = self.storage.read(&self.program_path)?;
        let grid = persistence::decode(
            &bytes,
            self.engine.grid().width(),
            self.engine.grid().height(),
        )?;
        self.engine.replace_grid(grid);
        tracing::info!(path = %self.program_path.display(), bytes = bytes.len(), "program loaded");
        self.set_status(format!("Loaded {}", self.program_path.display()));
        Ok(())
    }

    /// Load the program image at startup
    ///
    /// A missing image is not an error: the session starts blank and says so.
    pub fn autoload(&mut self) {
        match self.load_program() {
            Ok(()) => {}
            Err(SessionError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.program_path.display(), "no program image, starting blank");
                self.set_status("No program image, starting blank");
            }
            Err(e) => self.report_error("Load failed", e),
        }
    }

    /// Replace the program with plain source text laid out from the origin
    pub fn import_text(&mut self, source: &str) {
        let grid = self.engine.grid();
        let (grid, dropped) = Grid::from_text(source, grid.width(), grid.height());
        self.engine.replace_grid(grid);
        if dropped > 0 {
            tracing::warn!(dropped, "imported source does not fit the grid");
            self.set_status(format!("Imported; {} characters did not fit", dropped));
        } else {
            self.set_status("Imported source");
        }
    }

    /// Record a failure for display and log it
    pub fn report_error(&mut self, context: &str, error: SessionError) {
        tracing::error!(kind = error.kind(), "{}: {}", context, error);
        self.status_message = format!("{}: {}", context, error);
        self.last_error = Some(error);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_error = None;
    }

    /// Snapshot the state for a display showing `cols` x `rows` cells
    pub fn view(&self, cols: usize, rows: usize) -> SessionView {
        let pointer = self.engine.position();
        let grid = self.engine.grid();
        let origin = Position::new(pointer.x - (cols / 2) as i64, pointer.y - (rows / 2) as i64);

        SessionView {
            mode: self.mode,
            popup: self.popup(),
            origin,
            cells: grid.window(origin.x, origin.y, cols, rows),
            cursor: (cols / 2, rows / 2),
            pointer,
            direction: self.engine.direction(),
            current_value: self.engine.current_cell(),
            stack: self.engine.stack().values().to_vec(),
            string_mode: self.engine.is_string_mode(),
            halted: self.engine.is_halted(),
            steps: self.engine.steps(),
            grid_size: (grid.width(), grid.height()),
            status: self.status_message.clone(),
            error: self.last_error.as_ref().map(|e| e.kind().to_string()),
        }
    }
}
