//! Clone a repository, prepare it in place, and come back.

pub mod env_file;
pub mod transform;

use std::path::{Path, PathBuf};

use crate::command::CommandSpec;
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::scope::ScopedCommandRunner;

use self::transform::TransformSet;

/// Executable used for clone and checkout.
pub const GIT: &str = "git";

/// Everything needed to import one repository.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    /// Repository to clone.
    pub repo_url: String,
    /// Local directory to clone into.
    pub destination: PathBuf,
    /// Branch to check out after cloning; the remote default when `None`.
    pub branch: Option<String>,
    /// Variables to set in the process environment, applied in order.
    pub env: Vec<(String, String)>,
    /// Placeholder substitutions applied inside the clone.
    pub transforms: Option<TransformSet>,
}

/// Derives a clone directory from a repository URL, the way `git clone` does.
///
/// `https://host/org/repo.git` and `git@host:org/repo` both yield `repo`.
///
/// # Errors
///
/// Returns a `Config` error if the URL has no usable final segment. A URL
/// naming only a host, such as `https://example.com/`, has none.
pub fn default_destination(repo_url: &str) -> Result<PathBuf> {
    // The path is what follows `scheme://authority/` or the `host:` of scp syntax.
    let path = match repo_url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or_default(),
        None => repo_url.split_once(':').map_or(repo_url, |(_, path)| path),
    };
    let last = path.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::Config(format!(
            "cannot derive a destination from {repo_url:?}; pass --dest"
        )));
    }
    Ok(PathBuf::from(name))
}

/// Runs the import: create the destination, clone, then inside the clone
/// check out the branch, set the environment and apply transforms.
///
/// The working directory on return equals the one on entry, whether or not
/// a step failed.
///
/// # Errors
///
/// Returns a `Config` error if the destination is not valid UTF-8, since it
/// is handed to `git clone` as an argument. Otherwise returns the first
/// failing step's error. A failed restore is reported as `RestoreFailed`
/// carrying that error.
pub fn import(ctx: &ServiceContext, plan: &ImportPlan) -> Result<()> {
    let runner = ScopedCommandRunner::new(ctx);
    let dest = plan.destination.as_path();
    let dest_arg = dest.to_str().ok_or_else(|| {
        Error::Config(format!("destination {} is not valid UTF-8", dest.display()))
    })?;

    runner.ensure_directory(dest)?;
    let clone = CommandSpec::new(GIT).args(["clone", plan.repo_url.as_str(), dest_arg]);
    runner.run(&clone)?;

    runner.with_directory(dest, || {
        if let Some(branch) = &plan.branch {
            runner.run(&CommandSpec::new(GIT).args(["checkout", branch.as_str()]))?;
        }
        for (key, value) in &plan.env {
            ctx.env.set(key, value);
            tracing::debug!(key = %key, "set environment variable");
        }
        if let Some(transforms) = &plan.transforms {
            transforms.apply(ctx.fs.as_ref(), Path::new("."))?;
        }
        Ok(())
    })?;

    tracing::info!(
        repo = %plan.repo_url,
        dest = %dest.display(),
        branch = plan.branch.as_deref().unwrap_or("(default)"),
        "import complete"
    );
    Ok(())
}
