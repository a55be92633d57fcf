//! Runtime configuration resolved from the command line.
//!
//! The only real setting is which file backs the directory; it travels in
//! [`Config`] instead of living in a global.

use std::path::PathBuf;

use directories::BaseDirs;

use crate::cli::Cli;

/// Directory file opened when neither `--file` nor the environment names one.
pub const DEFAULT_DIRECTORY_FILE: &str = "phone_directory.txt";
/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".phone-directory";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "phone-directory.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Text file holding one `name, phone` record per line.
    pub directory_file: PathBuf,
    /// Destination for TUI logs. `None` disables logging for the TUI since
    /// it cannot share the terminal with the alternate screen.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            directory_file: cli.file.clone(),
            log_file: cli.log_file.clone().or_else(default_log_path),
        }
    }
}

/// Resolve `~/.phone-directory/phone-directory.log`, if a home directory exists.
pub fn default_log_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new()?;
    Some(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOG_FILE_NAME))
}
