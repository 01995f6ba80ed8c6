//! `reposcope import` command.

use crate::cli::ImportArgs;
use crate::context::ServiceContext;
use crate::error::Result;
use crate::import::transform::TransformSet;
use crate::import::{self, env_file, ImportPlan};

/// Execute the `import` command.
///
/// Config files are read before anything is cloned, relative to the
/// directory the tool was started in.
///
/// # Errors
///
/// Returns a `Config` error for unreadable config files or an underivable
/// destination, and any error of the import itself.
pub fn run(ctx: &ServiceContext, args: &ImportArgs) -> Result<()> {
    let destination = match &args.dest {
        Some(dest) => dest.clone(),
        None => import::default_destination(&args.repo_url)?,
    };

    let mut env = match &args.env_file {
        Some(path) => env_file::load(ctx.fs.as_ref(), path)?,
        None => Vec::new(),
    };
    env.extend(args.env.iter().cloned());

    let transforms = args
        .transform
        .as_deref()
        .map(|path| TransformSet::load(ctx.fs.as_ref(), path))
        .transpose()?;

    let plan = ImportPlan {
        repo_url: args.repo_url.clone(),
        destination,
        branch: args.branch.clone(),
        env,
        transforms,
    };
    import::import(ctx, &plan)
}
