//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI entry point for synk.
#[derive(Parser, Debug)]
#[command(
    name = "synk",
    about = "Keep personal files in sync with copies tracked in git repositories",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Config file to use instead of $SYNK_CONFIG or ~/.config/synk/config.json
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage profiles
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Add a sync definition to a profile
    Add(AddOpts),
    /// Remove a sync definition from a profile by number
    Remove(RemoveOpts),
    /// Show what a sync would do without changing anything
    Plan(PlanOpts),
    /// Apply, commit and push a profile
    Sync(SyncOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Profile(_) => "profile",
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
            Self::Plan(_) => "plan",
            Self::Sync(_) => "sync",
            Self::Version => "version",
        }
    }
}

/// `profile` subcommands.
#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List all profiles
    List,
    /// Create an empty profile
    Create(ProfileName),
    /// Show the numbered sync definitions of a profile
    Show(ProfileName),
}

/// A single profile name argument.
#[derive(Args, Debug, Clone)]
pub struct ProfileName {
    /// Profile name (a single alphanumeric word)
    pub name: String,
}

/// Options for the `add` subcommand.
#[derive(Args, Debug, Clone)]
pub struct AddOpts {
    /// Profile to add to
    pub profile: String,
    /// File whose content is authoritative
    pub source: String,
    /// File inside a git repository that receives the content
    pub destination: String,
}

/// Options for the `remove` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RemoveOpts {
    /// Profile to remove from
    pub profile: String,
    /// Number of the definition, as shown by `profile show`
    pub number: usize,
}

/// Options for the `plan` subcommand.
#[derive(Args, Debug, Clone)]
pub struct PlanOpts {
    /// Profile to plan
    pub profile: String,
}

/// Options for the `sync` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SyncOpts {
    /// Profile to sync
    pub profile: String,

    /// Commit message (defaults to a timestamped message)
    #[arg(short, long)]
    pub message: Option<String>,
}
