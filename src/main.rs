//! `synk` command-line entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use synk::cli::{self, Command};
use synk::commands;
use synk::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, Command::Version) {
        commands::version::run();
        return Ok(());
    }

    logging::init_subscriber(args.verbose, args.command.name());
    let log = Arc::new(Logger::new(args.command.name()));

    match &args.command {
        Command::Profile(cmd) => commands::profile::run(&args.global, cmd, &log),
        Command::Add(opts) => commands::syncs::add(&args.global, opts, &log),
        Command::Remove(opts) => commands::syncs::remove(&args.global, opts, &log),
        Command::Plan(opts) => commands::sync::plan(&args.global, opts, &log),
        Command::Sync(opts) => commands::sync::run(&args.global, opts, &log),
        Command::Version => Ok(()),
    }
}
