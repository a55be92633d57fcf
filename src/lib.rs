//! Core library surface for the phone directory.
//!
//! The record store is usable on its own; the TUI and the sample generator
//! are thin layers on top of it that the `bin` target wires together.
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod sample;
pub mod store;
pub mod ui;

pub use config::Config;
pub use error::StoreError;
pub use logging::{init_logging, init_logging_or_warn, LogTarget, Verbosity};
pub use models::{Record, RecordId};
pub use store::RecordStore;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
