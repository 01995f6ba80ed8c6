//! Directory-scoped command execution.
//!
//! The process has exactly one current directory. [`ScopedCommandRunner`]
//! treats it as a resource: [`ScopedCommandRunner::with_directory`] records
//! it, switches, runs the action, and switches back on every exit path.
//!
//! Scopes are not thread-safe against each other. At most one scope may be
//! active per process unless they are nested on the same thread, in which
//! case they unwind in LIFO order. Commands block until the child exits and
//! have no timeout.

use std::path::{Path, PathBuf};

use crate::command::{CommandSpec, ExecutionResult};
use crate::context::ServiceContext;
use crate::error::{Error, Result};
use crate::ports::WorkingDirectory;

/// Runs commands and scopes work to a directory, using the ports of a
/// [`ServiceContext`].
pub struct ScopedCommandRunner<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScopedCommandRunner<'a> {
    /// Creates a runner over the given context.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Creates `path` and any missing ancestors. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns `Io` if creation is blocked or `path` exists but is not a
    /// directory.
    pub fn ensure_directory(&self, path: &Path) -> Result<()> {
        if self.ctx.fs.is_dir(path) {
            tracing::debug!(path = %path.display(), "directory already present");
            return Ok(());
        }
        self.ctx
            .fs
            .create_dir_all(path)
            .map_err(|e| Error::io(format!("failed to create directory {}", path.display()), e))?;
        tracing::debug!(path = %path.display(), "created directory");
        Ok(())
    }

    /// Runs a command to completion with inherited output streams.
    ///
    /// When the spec names a working directory the run happens inside
    /// [`Self::with_directory`]; otherwise the current directory is untouched.
    ///
    /// # Errors
    ///
    /// Returns `CommandNotFound`, `CommandFailed` for a non-zero exit, `Io`
    /// for other spawn failures, and the scope errors of
    /// [`Self::with_directory`] when a working directory is set.
    pub fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        match spec.working_directory() {
            Some(dir) => self.with_directory(dir, || self.run_here(&spec.without_directory())),
            None => self.run_here(spec),
        }
    }

    fn run_here(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
        tracing::info!(command = %spec, "running");
        self.ctx.process.run(spec)?.into_result(spec)
    }

    /// Runs `action` with `path` as the current directory, then switches back.
    ///
    /// The directory active on entry is restored whether `action` succeeds,
    /// fails, or is never called because entering `path` failed. A panic in
    /// `action` also restores it during unwinding.
    ///
    /// # Errors
    ///
    /// - `Io` if the current directory cannot be read on entry.
    /// - `DirectoryChange` if `path` cannot be entered; `action` is not run.
    /// - Whatever `action` returns.
    /// - `RestoreFailed` if switching back fails, carrying the entry or action
    ///   error when there was one.
    pub fn with_directory<T, F>(&self, path: &Path, action: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let original = self
            .ctx
            .workdir
            .current()
            .map_err(|e| Error::io("failed to read current directory", e))?;
        let guard = DirectoryGuard::new(self.ctx.workdir.as_ref(), original);

        let outcome = match self.ctx.workdir.change_to(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "entered directory");
                action()
            }
            Err(source) => Err(Error::DirectoryChange { path: path.to_path_buf(), source }),
        };

        guard.restore(outcome)
    }
}

/// Switches back to a recorded directory exactly once.
///
/// [`DirectoryGuard::restore`] reports failure to the caller. If the guard is
/// dropped without it (a panic unwinding through the scope), the restore is
/// attempted in `Drop` and a failure can only be logged.
struct DirectoryGuard<'a> {
    workdir: &'a dyn WorkingDirectory,
    original: PathBuf,
    armed: bool,
}

impl<'a> DirectoryGuard<'a> {
    fn new(workdir: &'a dyn WorkingDirectory, original: PathBuf) -> Self {
        Self { workdir, original, armed: true }
    }

    /// Switches back, folding a restore failure together with `outcome`.
    fn restore<T>(mut self, outcome: Result<T>) -> Result<T> {
        self.armed = false;
        match self.workdir.change_to(&self.original) {
            Ok(()) => {
                tracing::debug!(path = %self.original.display(), "restored directory");
                outcome
            }
            Err(source) => Err(Error::RestoreFailed {
                path: std::mem::take(&mut self.original),
                source,
                action: outcome.err().map(Box::new),
            }),
        }
    }
}

impl Drop for DirectoryGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = self.workdir.change_to(&self.original) {
            tracing::error!(
                path = %self.original.display(),
                error = %e,
                "failed to restore working directory while unwinding"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::ProcessRunner;
    use serial_test::serial;
    use std::io;
    use std::sync::{Arc, Mutex};

    /// In-memory current directory with an optional path that refuses entry.
    #[derive(Clone)]
    struct FakeWorkdir {
        state: Arc<Mutex<FakeState>>,
    }

    struct FakeState {
        current: PathBuf,
        unreachable: Vec<PathBuf>,
        changes: usize,
    }

    impl FakeWorkdir {
        fn at(path: &str) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeState {
                    current: PathBuf::from(path),
                    unreachable: Vec::new(),
                    changes: 0,
                })),
            }
        }

        fn block(&self, path: &str) {
            self.state.lock().unwrap().unreachable.push(PathBuf::from(path));
        }

        fn current_path(&self) -> PathBuf {
            self.state.lock().unwrap().current.clone()
        }

        fn changes(&self) -> usize {
            self.state.lock().unwrap().changes
        }
    }

    impl WorkingDirectory for FakeWorkdir {
        fn current(&self) -> io::Result<PathBuf> {
            Ok(self.current_path())
        }

        fn change_to(&self, path: &Path) -> io::Result<()> {
            let mut state = self.state.lock().unwrap();
            state.changes += 1;
            if state.unreachable.iter().any(|p| p == path) {
                return Err(io::Error::from(io::ErrorKind::NotFound));
            }
            state.current = path.to_path_buf();
            Ok(())
        }
    }

    type SeenDirs = Arc<Mutex<Vec<PathBuf>>>;

    /// Returns scripted exit codes and records the directory of each run.
    struct ScriptedRunner {
        exit_code: i32,
        workdir: FakeWorkdir,
        seen_dirs: SeenDirs,
    }

    impl ProcessRunner for ScriptedRunner {
        fn run(&self, spec: &CommandSpec) -> Result<ExecutionResult> {
            if spec.executable() == "missing" {
                return Err(Error::CommandNotFound { executable: "missing".into() });
            }
            self.seen_dirs.lock().unwrap().push(self.workdir.current_path());
            Ok(ExecutionResult::from_exit_code(self.exit_code))
        }
    }

    fn fake_context(workdir: &FakeWorkdir, exit_code: i32) -> (ServiceContext, SeenDirs) {
        let seen_dirs = SeenDirs::default();
        let runner = ScriptedRunner {
            exit_code,
            workdir: workdir.clone(),
            seen_dirs: Arc::clone(&seen_dirs),
        };
        let ctx = ServiceContext {
            process: Box::new(runner),
            workdir: Box::new(workdir.clone()),
            ..ServiceContext::live()
        };
        (ctx, seen_dirs)
    }

    #[test]
    fn run_inside_directory_restores_afterwards() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, seen) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let spec = CommandSpec::new("git").args(["checkout", "dev"]).in_dir("/work");
        let result = runner.run(&spec).unwrap();

        assert_eq!(result.exit_code, 0);
        assert_eq!(*seen.lock().unwrap(), vec![PathBuf::from("/work")]);
        assert_eq!(workdir.current_path(), PathBuf::from("/home"));
    }

    #[test]
    fn run_missing_executable_changes_no_directory() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let err = runner.run(&CommandSpec::new("missing")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::CommandNotFound);
        assert_eq!(workdir.changes(), 0);
    }

    #[test]
    fn run_exit_three_is_command_failed() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 3);
        let runner = ScopedCommandRunner::new(&ctx);

        let err = runner.run(&CommandSpec::new("git").arg("pull")).unwrap_err();

        assert!(matches!(err, Error::CommandFailed { exit_code: 3, .. }));
    }

    #[test]
    fn failing_action_still_restores() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let result: Result<()> = runner.with_directory(Path::new("/work"), || {
            Err(Error::Config("boom".into()))
        });

        assert!(matches!(result, Err(Error::Config(ref m)) if m == "boom"));
        assert_eq!(workdir.current_path(), PathBuf::from("/home"));
    }

    #[test]
    fn failed_entry_skips_action() {
        let workdir = FakeWorkdir::at("/home");
        workdir.block("/nowhere");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let mut called = false;
        let result = runner.with_directory(Path::new("/nowhere"), || {
            called = true;
            Ok(())
        });

        assert_eq!(result.unwrap_err().kind(), ErrorKind::DirectoryChange);
        assert!(!called);
        assert_eq!(workdir.current_path(), PathBuf::from("/home"));
    }

    #[test]
    fn restore_failure_carries_action_error() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let result: Result<()> = runner.with_directory(Path::new("/work"), || {
            workdir.block("/home");
            Err(Error::CommandFailed { command: "git checkout dev".into(), exit_code: 1 })
        });

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RestoreFailed);
        assert_eq!(err.action_error().map(Error::kind), Some(ErrorKind::CommandFailed));
        assert_eq!(workdir.current_path(), PathBuf::from("/work"));
    }

    #[test]
    fn restore_failure_after_success_is_still_reported() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        let result = runner.with_directory(Path::new("/work"), || {
            workdir.block("/home");
            Ok(42)
        });

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RestoreFailed);
        assert!(err.action_error().is_none());
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);
        let runner = ScopedCommandRunner::new(&ctx);

        runner
            .with_directory(Path::new("/a"), || {
                runner.with_directory(Path::new("/a/b"), || {
                    assert_eq!(workdir.current_path(), PathBuf::from("/a/b"));
                    Ok(())
                })?;
                assert_eq!(workdir.current_path(), PathBuf::from("/a"));
                Ok(())
            })
            .unwrap();

        assert_eq!(workdir.current_path(), PathBuf::from("/home"));
    }

    #[test]
    fn panic_in_action_restores_directory() {
        let workdir = FakeWorkdir::at("/home");
        let (ctx, _) = fake_context(&workdir, 0);

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let runner = ScopedCommandRunner::new(&ctx);
            let _: Result<()> =
                runner.with_directory(Path::new("/work"), || panic!("action blew up"));
        }));

        assert!(outcome.is_err());
        assert_eq!(workdir.current_path(), PathBuf::from("/home"));
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("work/nested");
        let ctx = ServiceContext::live();
        let runner = ScopedCommandRunner::new(&ctx);

        runner.ensure_directory(&target).unwrap();
        runner.ensure_directory(&target).unwrap();

        assert!(target.is_dir());
    }

    #[test]
    fn ensure_directory_over_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("taken");
        std::fs::write(&file, "x").unwrap();
        let ctx = ServiceContext::live();

        let err = ScopedCommandRunner::new(&ctx).ensure_directory(&file).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    #[serial]
    fn live_scope_restores_even_if_action_changes_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let inner = tmp.path().join("inner");
        std::fs::create_dir(&inner).unwrap();
        let ctx = ServiceContext::live();
        let runner = ScopedCommandRunner::new(&ctx);
        let before = std::env::current_dir().unwrap();

        runner
            .with_directory(tmp.path(), || {
                std::env::set_current_dir("inner").map_err(|e| Error::io("cd", e))?;
                Ok(())
            })
            .unwrap();

        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn live_scope_missing_directory_leaves_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live();
        let before = std::env::current_dir().unwrap();

        let err = ScopedCommandRunner::new(&ctx)
            .with_directory(&tmp.path().join("absent"), || Ok(()))
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DirectoryChange);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn live_restore_fails_when_original_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let start = tmp.path().join("start");
        let target = tmp.path().join("target");
        std::fs::create_dir(&start).unwrap();
        std::fs::create_dir(&target).unwrap();
        let before = std::env::current_dir().unwrap();
        std::env::set_current_dir(&start).unwrap();

        let ctx = ServiceContext::live();
        let result = ScopedCommandRunner::new(&ctx).with_directory(&target, || {
            std::fs::remove_dir(&start).map_err(|e| Error::io("rmdir", e))?;
            Err::<(), _>(Error::Config("after removal".into()))
        });

        std::env::set_current_dir(&before).unwrap();
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RestoreFailed);
        assert!(err.to_string().contains("after removal"));
    }
}
