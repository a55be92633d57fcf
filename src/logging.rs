//! Logging setup.
//!
//! The TUI owns the terminal while it runs, so its logs go to a file. The
//! `generate` command has no screen to protect and logs to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::{debug, Level};
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    #[must_use]
    pub fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    fn default_directive(self) -> String {
        format!("phone_directory={}", self.to_level())
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Append to a file, creating it and its parent directory as needed.
    File(PathBuf),
}

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `verbosity`. Calling this more than once keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity, target: LogTarget) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    match target {
        LogTarget::Stderr => {
            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .try_init();
            keep_existing_subscriber(installed);
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).context("failed to create log directory")?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let installed = tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init();
            keep_existing_subscriber(installed);
        }
    }

    Ok(())
}

/// Like [`init_logging`], but a failure only prints a warning on stderr and
/// the program carries on without logs. Returns whether logging is set up.
pub fn init_logging_or_warn(verbosity: Verbosity, target: LogTarget) -> bool {
    match init_logging(verbosity, target) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            false
        }
    }
}

/// A second install attempt leaves the first subscriber in place.
fn keep_existing_subscriber(installed: std::result::Result<(), TryInitError>) {
    if let Err(err) = installed {
        debug!(error = %err, "log subscriber already installed, keeping it");
    }
}
