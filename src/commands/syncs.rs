//! Commands: add and remove sync definitions.
use anyhow::{Result, bail};

use super::{confirmer, open_store};
use crate::cli::{AddOpts, GlobalOpts, RemoveOpts};
use crate::config::SyncDefinition;
use crate::logging::Logger;
use crate::paths::{self, DestinationStatus};
use crate::prompt::Confirm;
use crate::vcs::{GitCli, Vcs};

/// Question asked before a new definition is saved.
pub const ADD_QUESTION: &str = "Confirm adding this sync?";

/// Validate both endpoints and, once confirmed, append the definition to the
/// profile.
///
/// Paths are stored resolved and absolute. Declining leaves the config
/// untouched.
///
/// # Errors
///
/// Returns an error if the source does not exist, the destination is not
/// inside a git repository, or the profile rejects the definition.
pub fn add(global: &GlobalOpts, opts: &AddOpts, log: &Logger) -> Result<()> {
    add_with(global, opts, &GitCli::default(), confirmer(global), log)
}

/// [`add`] with an explicit VCS for repository discovery and an explicit
/// confirmation gate.
///
/// # Errors
///
/// See [`add`].
pub fn add_with(
    global: &GlobalOpts,
    opts: &AddOpts,
    vcs: &dyn Vcs,
    confirm: &dyn Confirm,
    log: &Logger,
) -> Result<()> {
    let mut store = open_store(global, log)?;
    // fail on an unknown profile before touching the filesystem
    store.config().profile(&opts.profile)?;

    let (source, source_exists) = paths::validate_source(&opts.source);
    if !source_exists {
        bail!("source file does not exist: {}", source.display());
    }

    let destination = paths::validate_destination(&opts.destination, vcs);
    match destination.status {
        DestinationStatus::Invalid => bail!(
            "destination is not inside a git repository: {}",
            destination.path.display()
        ),
        DestinationStatus::WouldCreate => log.warn(&format!(
            "{} does not exist yet; it will be created on the next sync",
            destination.path.display()
        )),
        DestinationStatus::Exists => {}
    }

    log.info(&format!(
        "adding {} -> {} to {}",
        source.display(),
        destination.path.display(),
        opts.profile
    ));
    if !confirm.confirm(ADD_QUESTION) {
        log.warn("sync not added");
        return Ok(());
    }

    store.config_mut().add_sync(
        &opts.profile,
        SyncDefinition::new(
            source.to_string_lossy(),
            destination.path.to_string_lossy(),
        ),
    )?;
    store.save()?;
    log.info(&format!(
        "added {} -> {} to {}",
        source.display(),
        destination.path.display(),
        opts.profile
    ));
    Ok(())
}

/// Remove definition number `opts.number` (1-based) from the profile.
///
/// # Errors
///
/// Returns an error if the profile does not exist, the number is out of
/// range, or the store cannot be saved.
pub fn remove(global: &GlobalOpts, opts: &RemoveOpts, log: &Logger) -> Result<()> {
    let mut store = open_store(global, log)?;
    let removed = store
        .config_mut()
        .remove_sync(&opts.profile, opts.number)?;
    store.save()?;
    log.info(&format!(
        "removed {} -> {} from {}",
        removed.source_file, removed.destination_repo_file, opts.profile
    ));
    Ok(())
}
