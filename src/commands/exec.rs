//! `reposcope exec` command.

use crate::cli::ExecArgs;
use crate::command::CommandSpec;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::scope::ScopedCommandRunner;

/// Execute the `exec` command: set the variables, then run the program.
///
/// # Errors
///
/// Returns the runner's error for the program.
pub fn run(ctx: &ServiceContext, args: &ExecArgs) -> Result<()> {
    let Some((program, rest)) = args.command.split_first() else {
        return Err(Error::Config("no program given".into()));
    };

    for (key, value) in &args.env {
        ctx.env.set(key, value);
    }

    let mut spec = CommandSpec::new(program.as_str()).args(rest.iter().map(String::as_str));
    if let Some(dir) = &args.dir {
        spec = spec.in_dir(dir);
    }

    let result = ScopedCommandRunner::new(ctx).run(&spec)?;
    tracing::debug!(exit_code = result.exit_code, "exec finished");
    Ok(())
}
