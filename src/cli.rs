//! Command-line interface for the phone directory.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::DEFAULT_DIRECTORY_FILE;
use crate::logging::Verbosity;
use crate::sample::{DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_FILE};

/// phone-directory - keep names and phone numbers in a plain text file
///
/// Without a subcommand the interactive terminal UI opens on the directory
/// file.
#[derive(Debug, Parser)]
#[command(name = "phone-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory file to open
    #[arg(
        short,
        long,
        env = "PHONE_DIRECTORY_FILE",
        value_name = "FILE",
        default_value = DEFAULT_DIRECTORY_FILE
    )]
    pub file: PathBuf,

    /// Where the TUI writes its log (defaults to ~/.phone-directory/)
    #[arg(long, env = "PHONE_DIRECTORY_LOG", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a file of random sample records
    Generate {
        /// File to overwrite with sample data
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SAMPLE_FILE)]
        output: PathBuf,

        /// Number of records to write
        #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        count: usize,
    },
}

impl Cli {
    /// Map the `-q`/`-v` flags onto a logging verbosity.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
