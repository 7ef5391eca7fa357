//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — event loop, autoplay timing, drawing
//! - **[`keymap`]** — translation of key presses into session commands
//! - **[`panes`]** — stateless render functions for the grid, stack, status bar and popup
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`SessionController`] and call [`App::run`] to start the event loop.
//!
//! [`SessionController`]: crate::session::SessionController
//! [`App::run`]: app::App::run

pub mod app;
pub mod keymap;
pub mod panes;
pub mod theme;

pub use app::App;
