//! Top-level subcommand handlers.
pub mod profile;
pub mod sync;
pub mod syncs;
pub mod version;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{self, Store};
use crate::logging::Logger;
use crate::prompt::{AssumeYes, Confirm, Prompt};

/// Open the config store selected by `--config`, `$SYNK_CONFIG` or the
/// default location.
///
/// # Errors
///
/// Returns an error if the file cannot be created, read, or parsed.
pub fn open_store(global: &GlobalOpts, log: &Logger) -> Result<Store> {
    let path = config::resolve_path(global.config.clone());
    log.debug(&format!("config: {}", path.display()));
    Ok(Store::open(&path)?)
}

/// The confirmation gate selected by `--yes`.
#[must_use]
pub const fn confirmer(global: &GlobalOpts) -> &'static dyn Confirm {
    if global.yes { &AssumeYes } else { &Prompt }
}

/// Print the summary and bail if any recorded step failed.
///
/// # Errors
///
/// Returns an error if one or more steps recorded a failure.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();
    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} step(s) failed");
    }
    Ok(())
}
