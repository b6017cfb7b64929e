//! Profiles and sync definitions, and the JSON file they persist in.
//!
//! The on-disk shape is
//!
//! ```json
//! {
//!   "settings": {},
//!   "profiles": {
//!     "work": {
//!       "syncs": [
//!         { "source_file": "/home/me/.bashrc", "destination_repo_file": "/home/me/dots/bashrc" }
//!       ]
//!     }
//!   }
//! }
//! ```
//!
//! `settings` is reserved; it is carried through load/save untouched.
pub mod profiles;
pub mod store;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use profiles::{Profile, SyncDefinition};
pub use store::Store;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SYNK_CONFIG";

/// In-memory form of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reserved settings, currently unused.
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
    /// Profiles keyed by name.
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileEntry>,
}

/// Stored body of one profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Sync definitions in user order.
    #[serde(default)]
    pub syncs: Vec<SyncDefinition>,
}

/// Resolve the config file location.
///
/// Precedence: explicit `--config` path, then `$SYNK_CONFIG`, then
/// `$XDG_CONFIG_HOME/synk/config.json` (default `~/.config/synk/config.json`).
#[must_use]
pub fn resolve_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map_or_else(
            || {
                std::env::var_os("HOME")
                    .or_else(|| std::env::var_os("USERPROFILE"))
                    .map_or_else(|| PathBuf::from("."), PathBuf::from)
                    .join(".config")
            },
            PathBuf::from,
        );
    config_dir.join("synk").join("config.json")
}
