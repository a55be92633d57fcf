//! Binary entry point: parse the command line, set up logging, then either
//! write a sample file or open the directory in the TUI.
use anyhow::Context;
use clap::Parser;
use tracing::info;

use phone_directory::cli::{Cli, Command};
use phone_directory::sample::write_sample_file;
use phone_directory::{
    init_logging, init_logging_or_warn, run_app, App, Config, LogTarget, RecordStore,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbosity();
    let config = Config::from_cli(&cli);

    match cli.command {
        Some(Command::Generate { output, count }) => {
            init_logging(verbosity, LogTarget::Stderr)?;
            write_sample_file(&output, count)
                .with_context(|| format!("could not generate sample data in {}", output.display()))?;
            println!("Wrote {count} random records to {}.", output.display());
            Ok(())
        }
        None => {
            if let Some(log_file) = config.log_file {
                init_logging_or_warn(verbosity, LogTarget::File(log_file));
            }
            info!(file = %config.directory_file.display(), "starting phone directory");
            let mut app = App::open(RecordStore::new(config.directory_file));
            run_app(&mut app)
        }
    }
}
