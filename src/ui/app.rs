//! Main TUI application loop

use super::keymap::{self, KeyAction};
use super::panes;
use crate::session::{Mode, SessionController};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How long to wait for input when nothing is running
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Width of the stack pane in terminal columns
const STACK_PANE_WIDTH: u16 = 14;

/// The main application state
pub struct App {
    /// The session being edited and run
    pub session: SessionController,

    /// Delay between autoplay steps
    pub interval: Duration,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Last time an autoplay step ran
    last_step_time: Instant,
}

impl App {
    pub fn new(session: SessionController, interval: Duration) -> Self {
        App {
            session,
            interval,
            should_quit: false,
            last_step_time: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|f| self.render(f))?;

        loop {
            let running = self.session.mode() == Mode::Running;
            let timeout = if running {
                self.interval.saturating_sub(self.last_step_time.elapsed())
            } else {
                IDLE_POLL
            };

            let mut command = None;
            let mut redraw = false;

            // Use poll with timeout so autoplay keeps stepping without input
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        match keymap::translate(key) {
                            KeyAction::Command(c) => command = Some(c),
                            KeyAction::Quit => self.should_quit = true,
                            KeyAction::Ignore => {}
                        }
                    }
                    Event::Resize(_, _) => redraw = true,
                    _ => {}
                }
            }

            if self.should_quit {
                break;
            }

            let step_due = running && self.last_step_time.elapsed() >= self.interval;
            if command.is_some() || step_due {
                let report = self.session.tick(command);
                if report.stepped {
                    self.last_step_time = Instant::now();
                }
                redraw |= report.redraw;
            }

            if redraw {
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    /// Split the frame into grid, stack and status areas
    fn layout(area: Rect) -> (Rect, Rect, Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(STACK_PANE_WIDTH)])
            .split(rows[0]);

        (columns[0], columns[1], rows[1])
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let (grid_area, stack_area, status_area) = Self::layout(frame.area());
        let (cols, rows) = panes::grid_window_size(grid_area);
        let view = self.session.view(cols, rows);

        panes::render_grid_pane(frame, grid_area, &view);
        panes::render_stack_pane(frame, stack_area, &view.stack);
        panes::render_status_bar(frame, status_area, &view);
        panes::render_popup(frame, grid_area, view.popup);
    }
}
