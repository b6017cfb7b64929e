//! Commit and push: one of each per repository touched by a plan.
use std::path::PathBuf;

use super::Context;
use super::plan::Plan;
use crate::logging::OutcomeStatus;
use crate::vcs::CommitOutcome;

/// What happened in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoStatus {
    /// A commit was created.
    Committed,
    /// The index was clean; reported as a warning.
    NothingToCommit,
    /// The push succeeded.
    Pushed,
    /// The operation failed with the given message.
    Failed(String),
}

/// Per-repository result of a commit or push pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOutcome {
    /// Repository root.
    pub repo: PathBuf,
    /// Result in that repository.
    pub status: RepoStatus,
}

/// Commit message used when none is given, stamped with the local time.
#[must_use]
pub fn default_commit_message() -> String {
    format!(
        "Synk[@{}]: Synced files",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Commit once in every repository touched by `plan`.
///
/// An empty or missing `message` falls back to [`default_commit_message`].
/// Failures are reported per repository and never stop the pass.
pub fn commit_changes(ctx: &Context, plan: &Plan, message: Option<&str>) -> Vec<RepoOutcome> {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .map_or_else(default_commit_message, String::from);

    plan.touched_repos()
        .into_iter()
        .map(|repo| {
            let label = format!("Commit {}", repo.display());
            let status = match ctx.vcs.commit(&repo, &message) {
                Ok(CommitOutcome::Committed) => {
                    ctx.log.info(&format!("committed in {}", repo.display()));
                    ctx.log.record(&label, OutcomeStatus::Ok, None);
                    RepoStatus::Committed
                }
                Ok(CommitOutcome::NothingToCommit) => {
                    ctx.log
                        .warn(&format!("nothing to commit in {}", repo.display()));
                    ctx.log
                        .record(&label, OutcomeStatus::Warned, Some("nothing to commit"));
                    RepoStatus::NothingToCommit
                }
                Err(e) => {
                    let msg = e.to_string();
                    ctx.log.error(&msg);
                    ctx.log.record(&label, OutcomeStatus::Failed, Some(&msg));
                    RepoStatus::Failed(msg)
                }
            };
            RepoOutcome { repo, status }
        })
        .collect()
}

/// Push every repository touched by `plan`; each push stands alone.
pub fn push_changes(ctx: &Context, plan: &Plan) -> Vec<RepoOutcome> {
    plan.touched_repos()
        .into_iter()
        .map(|repo| {
            let label = format!("Push {}", repo.display());
            let status = match ctx.vcs.push(&repo) {
                Ok(()) => {
                    ctx.log.info(&format!("pushed {}", repo.display()));
                    ctx.log.record(&label, OutcomeStatus::Ok, None);
                    RepoStatus::Pushed
                }
                Err(e) => {
                    let msg = e.to_string();
                    ctx.log.error(&msg);
                    ctx.log.record(&label, OutcomeStatus::Failed, Some(&msg));
                    RepoStatus::Failed(msg)
                }
            };
            RepoOutcome { repo, status }
        })
        .collect()
}
