//! Planning: classify every sync definition of a profile without modifying
//! the filesystem.
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use super::Context;
use crate::config::Profile;
use crate::paths::{self, DestinationStatus};

/// Reason attached to an item whose source file is missing.
pub const SOURCE_MISSING: &str = "source missing";

/// Reason attached to an item whose destination has no enclosing repository.
pub const NOT_IN_REPOSITORY: &str = "destination not in a repository";

/// What applying an item would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanKind {
    /// Destination does not exist yet.
    New,
    /// Destination exists with different content.
    Modified,
    /// Destination already matches the source.
    Skipped,
    /// The definition failed validation.
    Error,
}

impl PlanKind {
    /// Whether items of this kind are applied.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::New | Self::Modified)
    }

    const fn tag(self) -> &'static str {
        match self {
            Self::New => "[NEW]",
            Self::Modified => "[MODIFIED]",
            Self::Skipped => "[SKIPPED]",
            Self::Error => "[ERROR]",
        }
    }
}

/// One classified sync definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    /// Resolved source path.
    pub source: PathBuf,
    /// Resolved destination path.
    pub destination: PathBuf,
    /// Classification.
    pub kind: PlanKind,
    /// Repository owning the destination; set for every non-error item.
    pub repo_root: Option<PathBuf>,
    /// Why the definition failed validation; set only for [`PlanKind::Error`].
    pub reason: Option<String>,
}

impl PlanItem {
    fn error(source: PathBuf, destination: PathBuf, reason: &str) -> Self {
        Self {
            source,
            destination,
            kind: PlanKind::Error,
            repo_root: None,
            reason: Some(reason.to_string()),
        }
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {} -> {}",
            self.kind.tag(),
            self.source.display(),
            self.destination.display()
        )?;
        if let Some(reason) = &self.reason {
            write!(f, " ({reason})")?;
        }
        Ok(())
    }
}

/// Ordered list of plan items, one per definition of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    items: Vec<PlanItem>,
}

impl Plan {
    /// Build a plan from already classified items.
    #[must_use]
    pub const fn new(items: Vec<PlanItem>) -> Self {
        Self { items }
    }

    /// All items in profile order.
    #[must_use]
    pub fn items(&self) -> &[PlanItem] {
        &self.items
    }

    /// Items that apply would act on, in profile order.
    pub fn actionable(&self) -> impl Iterator<Item = &PlanItem> {
        self.items.iter().filter(|item| item.kind.is_actionable())
    }

    /// Number of new and modified items.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.actionable().count()
    }

    /// Distinct repository roots touched by actionable items, sorted.
    #[must_use]
    pub fn touched_repos(&self) -> BTreeSet<PathBuf> {
        self.actionable()
            .filter_map(|item| item.repo_root.clone())
            .collect()
    }

    /// The report as individual lines, ending with the change total.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.items.iter().map(ToString::to_string).collect();
        lines.push(format!("Total changes to apply: {}", self.change_count()));
        lines
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.report_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Classify every definition of `profile`.
///
/// Reads the filesystem and asks the VCS for repository roots but never
/// modifies anything, so planning twice gives the same result.
#[must_use]
pub fn plan_syncs(ctx: &Context, profile: &Profile) -> Plan {
    let items = profile
        .syncs
        .iter()
        .map(|sync| {
            let (source, source_exists) = paths::validate_source(&sync.source_file);
            if !source_exists {
                return PlanItem::error(source, paths::resolve(&sync.destination_repo_file), SOURCE_MISSING);
            }

            let check = paths::validate_destination(&sync.destination_repo_file, ctx.vcs.as_ref());
            let repo_root = match (check.status, check.repo_root) {
                (DestinationStatus::Invalid, _) | (_, None) => {
                    return PlanItem::error(source, check.path, NOT_IN_REPOSITORY);
                }
                (_, Some(root)) => root,
            };

            let kind = if check.status == DestinationStatus::WouldCreate {
                PlanKind::New
            } else if paths::files_identical(&source, &check.path) {
                PlanKind::Skipped
            } else {
                PlanKind::Modified
            };
            ctx.log.debug(&format!(
                "planned {kind:?}: {} -> {}",
                source.display(),
                check.path.display()
            ));
            PlanItem {
                source,
                destination: check.path,
                kind,
                repo_root: Some(repo_root),
                reason: None,
            }
        })
        .collect();
    Plan::new(items)
}

/// Write the plan report through the context's logger.
///
/// Error items go out as errors so they stand out from the rest.
pub fn report_plan(ctx: &Context, plan: &Plan) {
    for item in plan.items() {
        if item.kind == PlanKind::Error {
            ctx.log.error(&item.to_string());
        } else {
            ctx.log.info(&item.to_string());
        }
    }
    ctx.log
        .info(&format!("Total changes to apply: {}", plan.change_count()));
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SyncDefinition;
    use crate::sync::test_helpers::{context_with, write_file};
    use crate::vcs::test_helpers::RecordingVcs;

    fn profile(syncs: Vec<SyncDefinition>) -> Profile {
        Profile {
            name: "home".to_string(),
            syncs,
        }
    }

    #[test]
    fn empty_profile_gives_empty_plan() {
        let (ctx, _log) = context_with(Arc::new(RecordingVcs::new()));
        let plan = plan_syncs(&ctx, &profile(vec![]));
        assert!(plan.items().is_empty());
        assert_eq!(plan.change_count(), 0);
        assert_eq!(plan.report_lines(), vec!["Total changes to apply: 0"]);
    }

    #[test]
    fn classifies_new_modified_and_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        let a = write_file(tmp.path(), "src/a", "alpha");
        let b = write_file(tmp.path(), "src/b", "beta");
        let c = write_file(tmp.path(), "src/c", "gamma");
        write_file(&repo, "b", "stale");
        write_file(&repo, "c", "gamma");
        let (ctx, _log) = context_with(Arc::new(RecordingVcs::new().with_repo(&repo)));

        let plan = plan_syncs(
            &ctx,
            &profile(vec![
                SyncDefinition::new(a, repo.join("a").to_string_lossy()),
                SyncDefinition::new(b, repo.join("b").to_string_lossy()),
                SyncDefinition::new(c, repo.join("c").to_string_lossy()),
            ]),
        );

        let kinds: Vec<PlanKind> = plan.items().iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![PlanKind::New, PlanKind::Modified, PlanKind::Skipped]);
        assert_eq!(plan.change_count(), 2);
        assert!(plan.items().iter().all(|i| i.repo_root.as_deref() == Some(repo.as_path())));
    }

    #[test]
    fn missing_source_is_an_error_item() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        std::fs::create_dir_all(&repo).unwrap();
        let (ctx, _log) = context_with(Arc::new(RecordingVcs::new().with_repo(&repo)));

        let plan = plan_syncs(
            &ctx,
            &profile(vec![SyncDefinition::new(
                tmp.path().join("nope").to_string_lossy(),
                repo.join("x").to_string_lossy(),
            )]),
        );

        let item = &plan.items()[0];
        assert_eq!(item.kind, PlanKind::Error);
        assert_eq!(item.reason.as_deref(), Some(SOURCE_MISSING));
        assert_eq!(plan.change_count(), 0);
    }

    #[test]
    fn destination_outside_repository_is_an_error_item() {
        let tmp = tempfile::tempdir().unwrap();
        let src = write_file(tmp.path(), "a", "alpha");
        let (ctx, _log) = context_with(Arc::new(RecordingVcs::new()));

        let plan = plan_syncs(
            &ctx,
            &profile(vec![SyncDefinition::new(src, tmp.path().join("out/a").to_string_lossy())]),
        );

        let item = &plan.items()[0];
        assert_eq!(item.kind, PlanKind::Error);
        assert_eq!(item.reason.as_deref(), Some(NOT_IN_REPOSITORY));
        assert!(item.repo_root.is_none());
    }

    #[test]
    fn planning_is_idempotent_and_read_only() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        let a = write_file(tmp.path(), "a", "alpha");
        write_file(&repo, "keep", "");
        let vcs = Arc::new(RecordingVcs::new().with_repo(&repo));
        let (ctx, _log) = context_with(vcs.clone());
        let p = profile(vec![SyncDefinition::new(a, repo.join("a").to_string_lossy())]);

        let first = plan_syncs(&ctx, &p);
        let second = plan_syncs(&ctx, &p);

        assert_eq!(first, second);
        assert!(!repo.join("a").exists(), "planning must not create files");
        assert!(vcs.calls().is_empty(), "planning must not stage anything");
    }

    #[test]
    fn touched_repos_are_distinct_and_sorted() {
        let item = |dest: &str, root: &str, kind| PlanItem {
            source: PathBuf::from("/s"),
            destination: PathBuf::from(dest),
            kind,
            repo_root: Some(PathBuf::from(root)),
            reason: None,
        };
        let plan = Plan::new(vec![
            item("/z/1", "/z", PlanKind::New),
            item("/a/1", "/a", PlanKind::Modified),
            item("/z/2", "/z", PlanKind::Modified),
            item("/m/1", "/m", PlanKind::Skipped),
        ]);
        let repos: Vec<PathBuf> = plan.touched_repos().into_iter().collect();
        assert_eq!(repos, vec![PathBuf::from("/a"), PathBuf::from("/z")]);
    }

    #[test]
    fn report_tags_every_item() {
        let plan = Plan::new(vec![
            PlanItem {
                source: PathBuf::from("/s/a"),
                destination: PathBuf::from("/r/a"),
                kind: PlanKind::New,
                repo_root: Some(PathBuf::from("/r")),
                reason: None,
            },
            PlanItem::error(PathBuf::from("/s/b"), PathBuf::from("/x/b"), NOT_IN_REPOSITORY),
        ]);
        assert_eq!(
            plan.report_lines(),
            vec![
                "[NEW]      /s/a -> /r/a",
                "[ERROR]    /s/b -> /x/b (destination not in a repository)",
                "Total changes to apply: 1",
            ]
        );
    }

    #[test]
    fn report_plan_logs_errors_at_error_level() {
        let (ctx, log) = context_with(Arc::new(RecordingVcs::new()));
        let plan = Plan::new(vec![PlanItem::error(
            PathBuf::from("/s"),
            PathBuf::from("/d"),
            SOURCE_MISSING,
        )]);
        report_plan(&ctx, &plan);
        assert_eq!(log.messages("error"), vec!["[ERROR]    /s -> /d (source missing)"]);
        assert_eq!(log.messages("info"), vec!["Total changes to apply: 0"]);
    }
}
