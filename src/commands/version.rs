//! Command: print version information.

/// Version string baked in at build time.
#[must_use]
pub fn version() -> &'static str {
    option_env!("SYNK_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the synk version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("synk {}", version());
}
