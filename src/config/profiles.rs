//! Profile and sync-definition edits on an in-memory [`Config`].
use serde::{Deserialize, Serialize};

use super::{Config, ProfileEntry};
use crate::error::ConfigError;

/// One file pair to keep identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncDefinition {
    /// File whose content is authoritative.
    pub source_file: String,
    /// Tracked file inside a repository that receives the content.
    pub destination_repo_file: String,
}

impl SyncDefinition {
    /// Create a definition from a source and destination path.
    #[must_use]
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source_file: source.into(),
            destination_repo_file: destination.into(),
        }
    }
}

/// A named, ordered collection of sync definitions, as handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Profile name.
    pub name: String,
    /// Definitions in user order.
    pub syncs: Vec<SyncDefinition>,
}

/// Whether `name` is a non-empty, single alphanumeric word.
#[must_use]
pub fn is_valid_profile_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_alphanumeric)
}

impl Config {
    /// Look up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if there is no such profile.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        self.profiles
            .get(name)
            .map(|entry| Profile {
                name: name.to_string(),
                syncs: entry.syncs.clone(),
            })
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    /// Create an empty profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a single alphanumeric word or is
    /// already taken.
    pub fn add_profile(&mut self, name: &str) -> Result<(), ConfigError> {
        if !is_valid_profile_name(name) {
            return Err(ConfigError::InvalidProfileName(name.to_string()));
        }
        if self.profiles.contains_key(name) {
            return Err(ConfigError::DuplicateProfile(name.to_string()));
        }
        self.profiles
            .insert(name.to_string(), ProfileEntry::default());
        Ok(())
    }

    /// Append a sync definition to a profile.
    ///
    /// Only the identical (source, destination) pair is rejected; other
    /// profiles may target the same destination.
    ///
    /// # Errors
    ///
    /// Returns an error if either path is empty, the profile does not exist,
    /// or the pair is already present in the profile.
    pub fn add_sync(&mut self, profile: &str, sync: SyncDefinition) -> Result<(), ConfigError> {
        if sync.source_file.is_empty() || sync.destination_repo_file.is_empty() {
            return Err(ConfigError::EmptySyncPath);
        }
        let entry = self
            .profiles
            .get_mut(profile)
            .ok_or_else(|| ConfigError::UnknownProfile(profile.to_string()))?;
        if entry.syncs.contains(&sync) {
            return Err(ConfigError::DuplicateSync {
                profile: profile.to_string(),
                source_file: sync.source_file,
                destination: sync.destination_repo_file,
            });
        }
        entry.syncs.push(sync);
        Ok(())
    }

    /// Remove the sync numbered `number` (1-based) from a profile and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or `number` is out of range.
    pub fn remove_sync(&mut self, profile: &str, number: usize) -> Result<SyncDefinition, ConfigError> {
        let entry = self
            .profiles
            .get_mut(profile)
            .ok_or_else(|| ConfigError::UnknownProfile(profile.to_string()))?;
        let count = entry.syncs.len();
        match number.checked_sub(1) {
            Some(index) if index < count => Ok(entry.syncs.remove(index)),
            _ => Err(ConfigError::SyncIndexOutOfRange {
                profile: profile.to_string(),
                number,
                count,
            }),
        }
    }
}
