//! Command: list, create and show profiles.
use anyhow::Result;

use super::open_store;
use crate::cli::{GlobalOpts, ProfileCommand};
use crate::logging::Logger;

/// Run a `profile` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or saved, or the profile
/// name is invalid, taken, or unknown.
pub fn run(global: &GlobalOpts, command: &ProfileCommand, log: &Logger) -> Result<()> {
    let mut store = open_store(global, log)?;
    match command {
        ProfileCommand::List => {
            let profiles = &store.config().profiles;
            if profiles.is_empty() {
                log.info("no profiles yet; create one with `synk profile create <name>`");
            }
            for (name, entry) in profiles {
                log.info(&format!("{name} ({} sync(s))", entry.syncs.len()));
            }
        }
        ProfileCommand::Create(opts) => {
            store.config_mut().add_profile(&opts.name)?;
            store.save()?;
            log.info(&format!("created profile {}", opts.name));
        }
        ProfileCommand::Show(opts) => {
            let profile = store.config().profile(&opts.name)?;
            log.stage(&format!("Profile {}", profile.name));
            if profile.syncs.is_empty() {
                log.info("no sync definitions");
            }
            for (number, sync) in (1..).zip(&profile.syncs) {
                log.info(&format!(
                    "{number}. {} -> {}",
                    sync.source_file, sync.destination_repo_file
                ));
            }
        }
    }
    Ok(())
}
