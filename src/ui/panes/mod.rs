//! TUI pane rendering modules
//!
//! Every pane is a stateless function of a [`SessionView`](crate::session::SessionView).
//!
//! # Pane Modules
//!
//! - [`grid`]: the program window centered on the pointer
//! - [`stack`]: the most recent operand stack values
//! - [`status`]: status bar with mode, pointer details and keybindings
//! - [`popup`]: overlay for the help popup

pub mod grid;
pub mod popup;
pub mod stack;
pub mod status;

pub use grid::{grid_window_size, render_grid_pane};
pub use popup::render_popup;
pub use stack::render_stack_pane;
pub use status::render_status_bar;
