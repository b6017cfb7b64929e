//! Transactional apply: copy and stage every actionable plan item, or roll
//! the whole batch back.
use std::io;
use std::path::{Path, PathBuf};

use super::Context;
use super::plan::{Plan, PlanItem, PlanKind};
use crate::error::SyncError;
use crate::logging::OutcomeStatus;
use crate::paths;

/// Outcome of one applied item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    /// Source that was copied.
    pub source: PathBuf,
    /// Destination that now holds the source's content.
    pub destination: PathBuf,
    /// Whether the destination was created or overwritten.
    pub kind: PlanKind,
    /// Repository the destination was staged in.
    pub repo_root: PathBuf,
}

/// Everything needed to undo a partially applied batch.
#[derive(Debug, Default)]
struct Journal {
    /// `(destination, backup)`; `None` when the destination did not exist.
    backups: Vec<(PathBuf, Option<PathBuf>)>,
    /// `(repo_root, destination)` for every successful stage.
    staged: Vec<(PathBuf, PathBuf)>,
}

impl Journal {
    /// Undo recorded work, newest first. Problems are logged and skipped.
    fn rollback(&self, ctx: &Context) {
        ctx.log.warn("rolling back applied changes");

        for (destination, backup) in self.backups.iter().rev() {
            let restored = match backup {
                // the applied copy may carry a read-only mode from its source
                Some(backup) => remove_if_present(destination)
                    .and_then(|()| paths::copy_preserving(backup, destination)),
                None => remove_if_present(destination),
            };
            match restored {
                Ok(()) => ctx.log.debug(&format!("restored {}", destination.display())),
                Err(e) => {
                    let msg = format!("failed to restore {}: {e}", destination.display());
                    ctx.log.error(&msg);
                    ctx.log.record("Rollback", OutcomeStatus::Failed, Some(&msg));
                }
            }
        }

        for (repo, destination) in &self.staged {
            match ctx.vcs.unstage(repo, destination) {
                Ok(()) => ctx.log.debug(&format!("unstaged {}", destination.display())),
                Err(e) => {
                    let msg = format!("failed to unstage {}: {e}", destination.display());
                    ctx.log.error(&msg);
                    ctx.log.record("Rollback", OutcomeStatus::Failed, Some(&msg));
                }
            }
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Apply every new and modified item of `plan`, in plan order.
///
/// Existing destinations are backed up to a private temporary directory
/// first. If any step fails, restored destinations get their old content
/// back, newly created ones are removed, every staged path is unstaged, and
/// the original error is returned. The backup directory is gone when this
/// returns.
///
/// # Errors
///
/// Returns the [`SyncError`] that stopped the batch.
pub fn apply_plan(ctx: &Context, plan: &Plan) -> Result<Vec<ApplyResult>, SyncError> {
    let items: Vec<&PlanItem> = plan.actionable().collect();
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let backup_dir = tempfile::Builder::new()
        .prefix("synk-backup-")
        .tempdir()
        .map_err(SyncError::BackupDir)?;
    ctx.log
        .debug(&format!("backups in {}", backup_dir.path().display()));

    let mut journal = Journal::default();
    let mut results = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match apply_item(ctx, item, backup_dir.path(), index, &mut journal) {
            Ok(result) => {
                ctx.log.info(&format!(
                    "synced {} -> {}",
                    result.source.display(),
                    result.destination.display()
                ));
                results.push(result);
            }
            Err(e) => {
                ctx.log.error(&e.to_string());
                journal.rollback(ctx);
                return Err(e);
            }
        }
    }
    Ok(results)
}

fn apply_item(
    ctx: &Context,
    item: &PlanItem,
    backup_dir: &Path,
    index: usize,
    journal: &mut Journal,
) -> Result<ApplyResult, SyncError> {
    let repo_root = item
        .repo_root
        .clone()
        .ok_or_else(|| SyncError::MissingRepoRoot(item.destination.clone()))?;

    if item.destination.exists() {
        let name = item
            .destination
            .file_name()
            .map_or_else(|| "file".into(), |n| n.to_string_lossy());
        let backup = backup_dir.join(format!("{index}-{name}"));
        paths::copy_preserving(&item.destination, &backup).map_err(|source| SyncError::Backup {
            path: item.destination.clone(),
            source,
        })?;
        journal.backups.push((item.destination.clone(), Some(backup)));
    } else {
        journal.backups.push((item.destination.clone(), None));
    }

    paths::copy_preserving(&item.source, &item.destination).map_err(|source| SyncError::Copy {
        from: item.source.clone(),
        to: item.destination.clone(),
        source,
    })?;

    ctx.vcs
        .stage(&repo_root, &item.destination)
        .map_err(|source| SyncError::Stage {
            path: item.destination.clone(),
            source,
        })?;
    journal
        .staged
        .push((repo_root.clone(), item.destination.clone()));

    Ok(ApplyResult {
        source: item.source.clone(),
        destination: item.destination.clone(),
        kind: item.kind,
        repo_root,
    })
}
