//! The confirmation-gated run over one profile.
use super::Context;
use super::apply::apply_plan;
use super::plan::{plan_syncs, report_plan};
use super::publish::{commit_changes, push_changes};
use crate::config::Profile;
use crate::error::SyncError;
use crate::logging::OutcomeStatus;
use crate::prompt::Confirm;

/// Where a run stands.
///
/// A run starts [`Planned`](Self::Planned) and ends in one of
/// [`UpToDate`](Self::UpToDate), [`Aborted`](Self::Aborted),
/// [`CommitSkipped`](Self::CommitSkipped), [`PushSkipped`](Self::PushSkipped)
/// or [`Pushed`](Self::Pushed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The plan has been built and reported.
    Planned,
    /// There was nothing to apply.
    UpToDate,
    /// The apply gate was declined.
    Aborted,
    /// Changes were copied and staged.
    Applied,
    /// The commit gate was declined.
    CommitSkipped,
    /// Commits were attempted.
    Committed,
    /// The push gate was declined.
    PushSkipped,
    /// Pushes were attempted.
    Pushed,
}

impl RunState {
    /// Whether the run is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Planned | Self::Applied | Self::Committed)
    }
}

/// Question asked before applying.
pub const APPLY_QUESTION: &str = "Proceed with these changes?";
/// Question asked before committing.
pub const COMMIT_QUESTION: &str = "Commit these changes?";
/// Question asked before pushing.
pub const PUSH_QUESTION: &str = "Push to remote?";

/// Plan, apply, commit and push `profile`, asking `confirm` before each
/// step that changes something.
///
/// A declined question ends the run without error. Per-repository commit and
/// push failures are reported, not returned.
///
/// # Errors
///
/// Returns the apply error after the batch has been rolled back.
pub fn sync_all(
    ctx: &Context,
    profile: &Profile,
    confirm: &dyn Confirm,
    message: Option<&str>,
) -> Result<RunState, SyncError> {
    ctx.log.stage(&format!("Planning profile {}", profile.name));
    let plan = plan_syncs(ctx, profile);
    report_plan(ctx, &plan);
    let mut state = RunState::Planned;

    while !state.is_terminal() {
        state = match state {
            RunState::Planned if plan.change_count() == 0 => {
                ctx.log.info("everything is up to date");
                ctx.log
                    .record("Apply", OutcomeStatus::Skipped, Some("up to date"));
                RunState::UpToDate
            }
            RunState::Planned if !confirm.confirm(APPLY_QUESTION) => {
                ctx.log.warn("sync plan aborted");
                ctx.log.record("Apply", OutcomeStatus::Skipped, Some("declined"));
                RunState::Aborted
            }
            RunState::Planned => {
                ctx.log.stage("Applying changes");
                match apply_plan(ctx, &plan) {
                    Ok(results) => {
                        let detail = format!("{} file(s)", results.len());
                        ctx.log.record("Apply", OutcomeStatus::Ok, Some(&detail));
                        RunState::Applied
                    }
                    Err(e) => {
                        ctx.log
                            .record("Apply", OutcomeStatus::Failed, Some(&e.to_string()));
                        return Err(e);
                    }
                }
            }
            RunState::Applied if !confirm.confirm(COMMIT_QUESTION) => {
                ctx.log.warn("skipped commit");
                ctx.log.record("Commit", OutcomeStatus::Skipped, Some("declined"));
                RunState::CommitSkipped
            }
            RunState::Applied => {
                ctx.log.stage("Committing");
                commit_changes(ctx, &plan, message);
                RunState::Committed
            }
            RunState::Committed if !confirm.confirm(PUSH_QUESTION) => {
                ctx.log.warn("skipped push");
                ctx.log.record("Push", OutcomeStatus::Skipped, Some("declined"));
                RunState::PushSkipped
            }
            RunState::Committed => {
                ctx.log.stage("Pushing");
                push_changes(ctx, &plan);
                RunState::Pushed
            }
            terminal => terminal,
        };
        ctx.log.debug(&format!("run state: {state:?}"));
    }
    Ok(state)
}
