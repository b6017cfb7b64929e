//! Domain-specific error types for the sync engine.
//!
//! Internal modules return typed errors (e.g., [`ConfigError`], [`SyncError`])
//! while command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! - [`ConfigError`]: config store I/O, profile and sync edits
//! - [`VcsError`]: git invocations
//! - [`SyncError`]: apply-time failures (already rolled back when returned)

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from the configuration store and profile edits.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read or written.
    #[error("IO error on config file {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid JSON or has the wrong shape.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// A profile name is empty or not a single alphanumeric word.
    #[error("Invalid profile name '{0}': must be a non-empty alphanumeric word")]
    InvalidProfileName(String),

    /// A profile with this name already exists.
    #[error("Profile '{0}' already exists")]
    DuplicateProfile(String),

    /// No profile with this name exists.
    #[error("Profile '{0}' does not exist")]
    UnknownProfile(String),

    /// A sync was given an empty source or destination.
    #[error("Source file and destination repo file cannot be empty")]
    EmptySyncPath,

    /// The identical source/destination pair is already in the profile.
    #[error("Sync '{source_file} -> {destination}' already exists in profile '{profile}'")]
    DuplicateSync {
        /// Profile name.
        profile: String,
        /// Source path of the duplicate.
        source_file: String,
        /// Destination path of the duplicate.
        destination: String,
    },

    /// A 1-based sync number does not address a sync in the profile.
    #[error("Invalid sync number {number} for profile '{profile}' ({count} syncs)")]
    SyncIndexOutOfRange {
        /// Profile name.
        profile: String,
        /// Requested 1-based number.
        number: usize,
        /// Number of syncs in the profile.
        count: usize,
    },
}

/// Errors that arise from invoking the version-control tool.
#[derive(Error, Debug)]
pub enum VcsError {
    /// The tool could not be started at all.
    #[error("could not run git {operation} in {repo}: {message}")]
    Spawn {
        /// Operation name (e.g. `"stage"`).
        operation: &'static str,
        /// Repository root the command was scoped to.
        repo: PathBuf,
        /// Rendered spawn error.
        message: String,
    },

    /// The tool ran and exited non-zero.
    #[error("git {operation} failed in {repo} (exit {code}): {stderr}")]
    CommandFailed {
        /// Operation name (e.g. `"push"`).
        operation: &'static str,
        /// Repository root the command was scoped to.
        repo: PathBuf,
        /// Exit code, `-1` when killed by a signal.
        code: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

/// Errors that abort an apply batch.
///
/// By the time one of these reaches a caller the batch has been rolled back.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Creating the private backup directory failed.
    #[error("failed to create backup directory: {0}")]
    BackupDir(#[source] std::io::Error),

    /// Backing up an existing destination failed.
    #[error("failed to back up {path}: {source}")]
    Backup {
        /// Destination that could not be backed up.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Copying the source over the destination failed.
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        /// Source file.
        from: PathBuf,
        /// Destination file.
        to: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Staging the destination failed.
    #[error("failed to stage {path}: {source}")]
    Stage {
        /// Destination that could not be staged.
        path: PathBuf,
        /// Underlying VCS error.
        source: VcsError,
    },

    /// An actionable plan item carried no repository root.
    #[error("no repository root recorded for {0}")]
    MissingRepoRoot(PathBuf),
}
