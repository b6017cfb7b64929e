//! The sync engine: plan, apply with rollback, commit and push.
//!
//! A run goes through [`plan::plan_syncs`] → confirmation →
//! [`apply::apply_plan`] → confirmation → [`publish::commit_changes`] →
//! confirmation → [`publish::push_changes`]; [`run::sync_all`] drives the
//! whole sequence.
pub mod apply;
pub mod plan;
pub mod publish;
pub mod run;

use std::fmt;
use std::sync::Arc;

use crate::logging::Log;
use crate::vcs::Vcs;

pub use apply::{ApplyResult, apply_plan};
pub use plan::{Plan, PlanItem, PlanKind, plan_syncs, report_plan};
pub use publish::{RepoOutcome, RepoStatus, commit_changes, default_commit_message, push_changes};
pub use run::{RunState, sync_all};

/// Collaborators shared by every engine step.
#[derive(Clone)]
pub struct Context {
    /// Version-control capability.
    pub vcs: Arc<dyn Vcs>,
    /// Logger for progress and outcome recording.
    pub log: Arc<dyn Log>,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("vcs", &"<dyn Vcs>")
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl Context {
    /// Create a context from its collaborators.
    #[must_use]
    pub const fn new(vcs: Arc<dyn Vcs>, log: Arc<dyn Log>) -> Self {
        Self { vcs, log }
    }
}
