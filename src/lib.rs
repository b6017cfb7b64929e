//! Personal file synchronization into git repositories.
//!
//! A *profile* is a named list of sync definitions, each pairing a source
//! file with a destination file tracked in a git repository. Syncing a
//! profile plans what would change, copies and stages every changed file as
//! one all-or-nothing batch, then commits and pushes each touched repository
//! after confirmation.
//!
//! The crate is organised into layers:
//!
//! - **[`config`]**: profiles, sync definitions and the JSON store
//! - **[`paths`]**, **[`vcs`]**, **[`exec`]**: filesystem and git capabilities
//! - **[`sync`]**: planner, transactional applier, commit/push coordinator
//! - **[`commands`]**: subcommand handlers behind the [`cli`]
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod paths;
pub mod prompt;
pub mod sync;
pub mod vcs;
