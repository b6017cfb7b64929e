//! Version-control side of the capability layer.
//!
//! The engine only needs five things from git: find the repository that
//! owns a directory, stage a path, unstage it again, commit, and push. They
//! are grouped in the [`Vcs`] trait so the engine can run against a double;
//! [`GitCli`] is the production implementation and shells out to `git`.
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::VcsError;
use crate::exec::{ExecResult, Executor, SystemExecutor};

/// Result of a successful `commit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was created.
    Committed,
    /// The index had no changes; no commit was created.
    NothingToCommit,
}

/// Version-control capability used by the sync engine.
#[cfg_attr(test, mockall::automock)]
pub trait Vcs {
    /// Return the top-level working directory of the repository containing
    /// `dir`, or `None` if `dir` is not inside one.
    fn locate_repo_root(&self, dir: &Path) -> Option<PathBuf>;

    /// Stage `path` in the repository rooted at `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or exits non-zero.
    fn stage(&self, repo: &Path, path: &Path) -> Result<(), VcsError>;

    /// Remove `path` from the index of `repo`, leaving the working file alone.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or exits non-zero.
    fn unstage(&self, repo: &Path, path: &Path) -> Result<(), VcsError>;

    /// Commit whatever is staged in `repo`.
    ///
    /// An index with no staged changes yields
    /// [`CommitOutcome::NothingToCommit`] instead of a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or exits non-zero.
    fn commit(&self, repo: &Path, message: &str) -> Result<CommitOutcome, VcsError>;

    /// Push `repo` to its configured upstream.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or exits non-zero.
    fn push(&self, repo: &Path) -> Result<(), VcsError>;
}

/// [`Vcs`] implementation that runs the `git` binary.
///
/// Repository discovery goes through libgit2 and never spawns a process.
pub struct GitCli {
    executor: Arc<dyn Executor>,
}

impl fmt::Debug for GitCli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitCli")
            .field("executor", &self.executor)
            .finish()
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(Arc::new(SystemExecutor))
    }
}

impl GitCli {
    /// Create a git capability backed by `executor`.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// Whether the `git` binary is on `PATH`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.executor.which("git")
    }

    fn git(&self, operation: &'static str, repo: &Path, args: &[&str]) -> Result<ExecResult, VcsError> {
        self.executor
            .run_unchecked_in(repo, "git", args)
            .map_err(|e| VcsError::Spawn {
                operation,
                repo: repo.to_path_buf(),
                message: format!("{e:#}"),
            })
    }

    fn git_checked(&self, operation: &'static str, repo: &Path, args: &[&str]) -> Result<ExecResult, VcsError> {
        let result = self.git(operation, repo, args)?;
        if result.success {
            Ok(result)
        } else {
            Err(command_failed(operation, repo, &result))
        }
    }
}

fn command_failed(operation: &'static str, repo: &Path, result: &ExecResult) -> VcsError {
    let stderr = if result.stderr.trim().is_empty() {
        result.stdout.trim()
    } else {
        result.stderr.trim()
    };
    VcsError::CommandFailed {
        operation,
        repo: repo.to_path_buf(),
        code: result.code.unwrap_or(-1),
        stderr: stderr.to_string(),
    }
}

/// Express `path` relative to `repo` so git never has to reconcile symlinked
/// spellings of the same directory. Falls back to `path` unchanged.
fn repo_relative(repo: &Path, path: &Path) -> PathBuf {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let (Ok(repo), Ok(parent)) = (dunce::canonicalize(repo), dunce::canonicalize(parent)) else {
        return path.to_path_buf();
    };
    parent
        .join(name)
        .strip_prefix(&repo)
        .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
}

impl Vcs for GitCli {
    fn locate_repo_root(&self, dir: &Path) -> Option<PathBuf> {
        let repo = git2::Repository::discover(dir).ok()?;
        let workdir = repo.workdir()?;
        Some(dunce::canonicalize(workdir).unwrap_or_else(|_| workdir.to_path_buf()))
    }

    fn stage(&self, repo: &Path, path: &Path) -> Result<(), VcsError> {
        let rel = repo_relative(repo, path);
        let rel = rel.to_string_lossy();
        self.git_checked("stage", repo, &["add", "--", &rel])?;
        Ok(())
    }

    fn unstage(&self, repo: &Path, path: &Path) -> Result<(), VcsError> {
        let rel = repo_relative(repo, path);
        let rel = rel.to_string_lossy();
        self.git_checked("unstage", repo, &["reset", "-q", "--", &rel])?;
        Ok(())
    }

    fn commit(&self, repo: &Path, message: &str) -> Result<CommitOutcome, VcsError> {
        // exit 0: index matches HEAD, exit 1: something is staged
        let staged = self.git("commit", repo, &["diff", "--cached", "--quiet"])?;
        match staged.code {
            Some(0) => return Ok(CommitOutcome::NothingToCommit),
            Some(1) => {}
            _ => return Err(command_failed("commit", repo, &staged)),
        }
        self.git_checked("commit", repo, &["commit", "-m", message])?;
        Ok(CommitOutcome::Committed)
    }

    fn push(&self, repo: &Path) -> Result<(), VcsError> {
        self.git_checked("push", repo, &["push"])?;
        Ok(())
    }
}
