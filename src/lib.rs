//! Core library entry for the `reposcope` CLI.
//!
//! The heart of the crate is [`scope::ScopedCommandRunner`], which runs
//! external commands and scopes work to a directory while guaranteeing the
//! process's current directory is restored. Everything that touches the
//! outside world goes through the traits in [`ports`].

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod command;
pub mod commands;
pub mod context;
pub mod error;
pub mod import;
pub mod logging;
pub mod ports;
pub mod scope;

pub use command::{CommandSpec, ExecutionResult};
pub use error::{Error, ErrorKind, Result};
pub use scope::ScopedCommandRunner;

use clap::error::ErrorKind as ClapErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// `--help` and `--version` print and return `Ok`.
///
/// # Errors
///
/// Returns a `Config` error when argument parsing fails, or the error of the
/// executed command.
pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err)
            if matches!(err.kind(), ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion) =>
        {
            err.print().map_err(|e| Error::io("failed to print help", e))?;
            return Ok(());
        }
        Err(err) => {
            let message = err.to_string();
            let message = message.trim_start_matches("error: ").trim_end();
            return Err(Error::Config(message.to_string()));
        }
    };

    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}
