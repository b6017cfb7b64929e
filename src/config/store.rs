//! JSON-file backed configuration store.
use std::io::Write as _;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::ConfigError;

/// Handle on the config file.
///
/// Edits are made on [`config_mut`](Self::config_mut) and only reach disk on
/// [`save`](Self::save). [`reload`](Self::reload) discards in-memory state
/// and re-reads the file.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    config: Config,
}

impl Store {
    /// Open the store at `path`, writing a default config first if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created, read, or parsed.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            write_atomic(path, &Config::default())?;
            tracing::debug!("created default config at {}", path.display());
        }
        let config = read(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            config,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current in-memory configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable access to the in-memory configuration.
    pub const fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Persist the in-memory configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        write_atomic(&self.path, &self.config)
    }

    /// Re-read the backing file, replacing the in-memory configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed; the in-memory
    /// configuration is left unchanged in that case.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.config = read(&self.path)?;
        Ok(())
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `config` next to `path` and rename it into place.
fn write_atomic(path: &Path, config: &Config) -> Result<(), ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(io_err)?;

    let mut json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(json.as_bytes()).map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
