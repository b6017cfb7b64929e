//! Commands: plan and sync a profile.
use std::sync::Arc;

use anyhow::{Result, bail};

use super::{confirmer, finish, open_store};
use crate::cli::{GlobalOpts, PlanOpts, SyncOpts};
use crate::logging::Logger;
use crate::sync::{Context, plan_syncs, report_plan, sync_all};
use crate::vcs::GitCli;

/// Print the plan for a profile without changing anything.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or the profile is unknown.
pub fn plan(global: &GlobalOpts, opts: &PlanOpts, log: &Arc<Logger>) -> Result<()> {
    let store = open_store(global, log)?;
    let profile = store.config().profile(&opts.profile)?;
    let ctx = Context::new(Arc::new(GitCli::default()), log.clone());

    log.stage(&format!("Planning profile {}", profile.name));
    let plan = plan_syncs(&ctx, &profile);
    report_plan(&ctx, &plan);
    Ok(())
}

/// Run the full confirmation-gated sync of a profile.
///
/// # Errors
///
/// Returns an error if git is missing, the profile is unknown, the apply was
/// rolled back, or any commit or push failed.
pub fn run(global: &GlobalOpts, opts: &SyncOpts, log: &Arc<Logger>) -> Result<()> {
    let git = GitCli::default();
    if !git.is_available() {
        bail!("git not found on PATH");
    }

    let store = open_store(global, log)?;
    let profile = store.config().profile(&opts.profile)?;
    let ctx = Context::new(Arc::new(git), log.clone());

    let result = sync_all(&ctx, &profile, confirmer(global), opts.message.as_deref());
    let state = match result {
        Ok(state) => state,
        Err(e) => {
            log.print_summary();
            return Err(e.into());
        }
    };
    log.debug(&format!("run finished: {state:?}"));
    finish(log)
}
