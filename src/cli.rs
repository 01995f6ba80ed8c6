//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `reposcope`.
#[derive(Debug, Parser)]
#[command(
    name = "reposcope",
    version,
    about = "Clone a repository, work inside it, and come back"
)]
pub struct Cli {
    /// Log at debug level regardless of `RUST_LOG`.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clone a repository, check out a branch and prepare it in place.
    Import(ImportArgs),
    /// Run one program, optionally inside another directory.
    Exec(ExecArgs),
}

/// Arguments of `reposcope import`.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Repository to clone.
    #[arg(long, env = "REPOSCOPE_REPO_URL")]
    pub repo_url: String,

    /// Directory to clone into [default: last segment of the URL].
    #[arg(long, env = "REPOSCOPE_DEST")]
    pub dest: Option<PathBuf>,

    /// Branch to check out after cloning.
    #[arg(long, env = "REPOSCOPE_BRANCH")]
    pub branch: Option<String>,

    /// Environment variable to set; repeatable.
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// JSON object of environment variables, applied before `--env`.
    #[arg(long, value_name = "FILE", env = "REPOSCOPE_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// JSON file of `${PLACEHOLDER}` replacements per checked-out file.
    #[arg(long, value_name = "FILE", env = "REPOSCOPE_TRANSFORM")]
    pub transform: Option<PathBuf>,
}

/// Arguments of `reposcope exec`.
#[derive(Debug, Args)]
pub struct ExecArgs {
    /// Directory to run in; the current directory is restored afterwards.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Environment variable to set before running; repeatable.
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub env: Vec<(String, String)>,

    /// Program followed by its arguments.
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Parses `KEY=VALUE`, splitting at the first `=`.
fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    let (key, value) =
        raw.split_once('=').ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty variable name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}
