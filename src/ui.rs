//! Ratatui front-end for the phone directory. The submodules split state
//! handling (`app`), form input (`forms`), list cursors (`screens`), and the
//! terminal event loop (`terminal`).

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
