// Shared helpers for integration tests.
//
// Provides a temporary workspace holding source files, scratch git
// repositories and a config file, so each integration test can set up an
// isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use synk::cli::GlobalOpts;
use synk::logging::Logger;
use synk::prompt::Confirm;

/// Whether a `git` binary is available for end-to-end tests.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// A logger that only collects outcomes; no subscriber is installed, so
/// nothing is printed.
pub fn quiet_logger() -> Arc<Logger> {
    Arc::new(Logger::with_log_file(None))
}

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// The directory is deleted when the workspace is dropped.
pub struct Workspace {
    /// Temporary directory containing everything the test touches.
    pub root: tempfile::TempDir,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the workspace root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `content` to `rel` under the workspace, creating parents.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Read `rel` under the workspace.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).expect("read file")
    }

    /// Initialise a git repository at `rel` with a local identity and an
    /// empty initial commit, returning its canonical root.
    pub fn init_repo(&self, rel: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(&path).expect("create repo dir");
        let repo = git2::Repository::init(&path).expect("init repo");
        {
            let mut config = repo.config().expect("repo config");
            config.set_str("user.name", "Synk Test").expect("set name");
            config
                .set_str("user.email", "synk@example.invalid")
                .expect("set email");
            config.set_bool("commit.gpgsign", false).expect("set gpgsign");
        }
        let signature = repo.signature().expect("signature");
        let tree_id = repo.index().expect("index").write_tree().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");
        repo.commit(Some("HEAD"), &signature, &signature, "init", &tree, &[])
            .expect("initial commit");
        dunce::canonicalize(&path).expect("canonicalize repo")
    }

    /// Create a bare repository at `rel` and make it the upstream of the
    /// current branch of `repo`.
    pub fn add_remote(&self, repo: &Path, rel: &str) -> PathBuf {
        let remote_path = self.path().join(rel);
        git2::Repository::init_bare(&remote_path).expect("init bare");
        let local = git2::Repository::open(repo).expect("open repo");
        local
            .remote("origin", &remote_path.to_string_lossy())
            .expect("add remote");
        let branch = current_branch(repo);
        let mut config = local.config().expect("repo config");
        config
            .set_str(&format!("branch.{branch}.remote"), "origin")
            .expect("set branch remote");
        config
            .set_str(&format!("branch.{branch}.merge"), &format!("refs/heads/{branch}"))
            .expect("set branch merge");
        remote_path
    }

    /// Config file path inside the workspace.
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config").join("config.json")
    }

    /// Global options pointing at this workspace's config file.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            config: Some(self.config_path()),
            yes: false,
        }
    }

    /// Replace the workspace path in `text` with `<tmp>`.
    pub fn redact(&self, text: &str) -> String {
        text.replace(&self.path().to_string_lossy().into_owned(), "<tmp>")
    }
}

/// Short name of the branch `HEAD` points at.
pub fn current_branch(repo: &Path) -> String {
    let repo = git2::Repository::open(repo).expect("open repo");
    let head = repo.head().expect("head");
    head.shorthand().expect("branch name").to_string()
}

/// Number of commits reachable from `HEAD`.
pub fn commit_count(repo: &Path) -> usize {
    let repo = git2::Repository::open(repo).expect("open repo");
    let mut walk = repo.revwalk().expect("revwalk");
    walk.push_head().expect("push head");
    walk.count()
}

/// Whether `rel` is present in the index of `repo`.
pub fn is_staged(repo: &Path, rel: &str) -> bool {
    let repo = git2::Repository::open(repo).expect("open repo");
    let index = repo.index().expect("index");
    index.get_path(Path::new(rel), 0).is_some()
}

/// A [`Confirm`] that replays scripted answers and then says no.
#[derive(Debug, Default)]
pub struct Answers {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl Answers {
    /// Answer `answers` in order.
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::default(),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

impl Confirm for Answers {
    fn confirm(&self, question: &str) -> bool {
        self.asked.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }
}
