//! Filesystem side of the capability layer: path resolution, endpoint
//! validation, deep comparison and metadata-preserving copy.
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use crate::vcs::Vcs;

/// Chunk size for [`files_identical`].
const COMPARE_CHUNK: usize = 64 * 1024;

/// Where a destination stands relative to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationStatus {
    /// Parent directory missing, or not inside a repository.
    Invalid = 0,
    /// Inside a repository; the file would be created.
    WouldCreate = 1,
    /// Inside a repository; the file exists.
    Exists = 2,
}

/// Outcome of [`validate_destination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationCheck {
    /// Absolute, normalized destination path.
    pub path: PathBuf,
    /// Classification of the destination.
    pub status: DestinationStatus,
    /// Top-level directory of the enclosing repository.
    pub repo_root: Option<PathBuf>,
}

/// Resolve `~` and relative segments into an absolute path.
///
/// Normalization is lexical, symlinks are not followed. A leading `~` is
/// replaced by `$HOME` (`%USERPROFILE%` on Windows); when neither is set the
/// path is left as is.
#[must_use]
pub fn resolve(path: &str) -> PathBuf {
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir().map_or(expanded.clone(), |cwd| cwd.join(&expanded))
    };
    normalize(&absolute)
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
            .or_else(|| path.strip_prefix("~\\"))
    };
    match (rest, home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` at the root stays at the root
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve a source path and report whether it is an existing regular file.
#[must_use]
pub fn validate_source(path: &str) -> (PathBuf, bool) {
    let resolved = resolve(path);
    let exists = resolved.is_file();
    (resolved, exists)
}

/// Resolve a destination path and classify it against its enclosing
/// repository, as located by `vcs`.
#[must_use]
pub fn validate_destination(path: &str, vcs: &dyn Vcs) -> DestinationCheck {
    let resolved = resolve(path);
    let repo_root = resolved
        .parent()
        .filter(|parent| parent.is_dir())
        .and_then(|parent| vcs.locate_repo_root(parent));
    let status = match repo_root {
        None => DestinationStatus::Invalid,
        Some(_) if resolved.is_file() => DestinationStatus::Exists,
        Some(_) => DestinationStatus::WouldCreate,
    };
    DestinationCheck {
        path: resolved,
        status,
        repo_root,
    }
}

/// Compare two files byte for byte.
///
/// Any I/O error (including either file missing) counts as "not identical".
#[must_use]
pub fn files_identical(a: &Path, b: &Path) -> bool {
    compare_contents(a, b).unwrap_or(false)
}

fn compare_contents(a: &Path, b: &Path) -> io::Result<bool> {
    let (file_a, file_b) = (File::open(a)?, File::open(b)?);
    if file_a.metadata()?.len() != file_b.metadata()?.len() {
        return Ok(false);
    }
    let mut reader_a = BufReader::with_capacity(COMPARE_CHUNK, file_a);
    let mut reader_b = BufReader::with_capacity(COMPARE_CHUNK, file_b);
    let mut buf_a = vec![0u8; COMPARE_CHUNK];
    let mut buf_b = vec![0u8; COMPARE_CHUNK];
    loop {
        let n = read_full(&mut reader_a, &mut buf_a)?;
        let m = read_full(&mut reader_b, &mut buf_b)?;
        if n != m || buf_a.get(..n) != buf_b.get(..m) {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Fill `buf` as far as the reader allows, returning the byte count.
fn read_full(reader: &mut impl io::Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let Some(rest) = buf.get_mut(filled..) else {
            break;
        };
        match reader.read(rest) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Copy `from` over `to`, keeping permissions and the modification time.
///
/// # Errors
///
/// Returns an error if the content cannot be copied. Failing to carry over
/// the modification time is not an error.
pub fn copy_preserving(from: &Path, to: &Path) -> io::Result<()> {
    std::fs::copy(from, to)?;
    if let Ok(modified) = std::fs::metadata(from).and_then(|m| m.modified())
        && let Ok(file) = std::fs::OpenOptions::new().write(true).open(to)
    {
        file.set_modified(modified).ok();
    }
    Ok(())
}
