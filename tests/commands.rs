#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the profile and sync-definition commands.
//!
//! Each test points `--config` at a file inside its own workspace.

mod common;

use synk::cli::{AddOpts, GlobalOpts, ProfileCommand, ProfileName, RemoveOpts};
use synk::commands::{profile, syncs};
use synk::config::{Store, SyncDefinition};
use synk::error::ConfigError;
use synk::vcs::GitCli;

use common::{Answers, Workspace, quiet_logger};

fn create_profile(ws: &Workspace, name: &str) -> anyhow::Result<()> {
    profile::run(
        &ws.global(),
        &ProfileCommand::Create(ProfileName {
            name: name.to_string(),
        }),
        &quiet_logger(),
    )
}

fn add_opts(ws: &Workspace, profile: &str, source: &str, destination: &str) -> AddOpts {
    AddOpts {
        profile: profile.to_string(),
        source: ws.path().join(source).to_string_lossy().into_owned(),
        destination: ws.path().join(destination).to_string_lossy().into_owned(),
    }
}

fn add_answering(
    ws: &Workspace,
    answers: &Answers,
    profile: &str,
    source: &str,
    destination: &str,
) -> anyhow::Result<()> {
    syncs::add_with(
        &ws.global(),
        &add_opts(ws, profile, source, destination),
        &GitCli::default(),
        answers,
        &quiet_logger(),
    )
}

fn add(ws: &Workspace, profile: &str, source: &str, destination: &str) -> anyhow::Result<()> {
    add_answering(ws, &Answers::new(&[true]), profile, source, destination)
}

fn stored_syncs(ws: &Workspace, profile: &str) -> Vec<SyncDefinition> {
    Store::open(&ws.config_path())
        .unwrap()
        .config()
        .profile(profile)
        .unwrap()
        .syncs
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

#[test]
fn first_command_creates_default_config() {
    let ws = Workspace::new();
    profile::run(&ws.global(), &ProfileCommand::List, &quiet_logger()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(ws.config_path()).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({"settings": {}, "profiles": {}}));
}

#[test]
fn create_profile_persists() {
    let ws = Workspace::new();
    create_profile(&ws, "work").unwrap();

    assert!(stored_syncs(&ws, "work").is_empty());
}

#[test]
fn create_profile_rejects_bad_and_duplicate_names() {
    let ws = Workspace::new();
    create_profile(&ws, "work").unwrap();

    let bad = create_profile(&ws, "two words").unwrap_err();
    assert!(matches!(
        bad.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidProfileName(_))
    ));
    let dup = create_profile(&ws, "work").unwrap_err();
    assert!(matches!(
        dup.downcast_ref::<ConfigError>(),
        Some(ConfigError::DuplicateProfile(_))
    ));
}

#[test]
fn show_unknown_profile_fails() {
    let ws = Workspace::new();
    let err = profile::run(
        &ws.global(),
        &ProfileCommand::Show(ProfileName {
            name: "ghost".to_string(),
        }),
        &quiet_logger(),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownProfile(name)) if name == "ghost"
    ));
}

// ---------------------------------------------------------------------------
// add / remove
// ---------------------------------------------------------------------------

#[test]
fn add_stores_absolute_paths() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");
    create_profile(&ws, "home").unwrap();

    add(&ws, "home", "home/./bashrc", "dots/../dots/bashrc").unwrap();

    let stored = stored_syncs(&ws, "home");
    assert_eq!(
        stored,
        vec![SyncDefinition::new(
            ws.path().join("home/bashrc").to_string_lossy(),
            ws.path().join("dots/bashrc").to_string_lossy(),
        )]
    );
}

#[test]
fn add_asks_before_saving() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");
    create_profile(&ws, "home").unwrap();
    let answers = Answers::new(&[true]);

    add_answering(&ws, &answers, "home", "home/bashrc", "dots/bashrc").unwrap();

    assert_eq!(answers.asked(), vec![syncs::ADD_QUESTION]);
    assert_eq!(stored_syncs(&ws, "home").len(), 1);
}

#[test]
fn declined_add_leaves_profile_unchanged() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");
    create_profile(&ws, "home").unwrap();

    add_answering(&ws, &Answers::new(&[false]), "home", "home/bashrc", "dots/bashrc").unwrap();

    assert!(stored_syncs(&ws, "home").is_empty());
}

#[test]
fn add_with_yes_flag_does_not_prompt() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");
    create_profile(&ws, "home").unwrap();
    let global = GlobalOpts {
        yes: true,
        ..ws.global()
    };

    syncs::add(
        &global,
        &add_opts(&ws, "home", "home/bashrc", "dots/bashrc"),
        &quiet_logger(),
    )
    .unwrap();

    assert_eq!(stored_syncs(&ws, "home").len(), 1);
}

#[test]
fn add_rejects_missing_source() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    create_profile(&ws, "home").unwrap();

    let err = add(&ws, "home", "home/nope", "dots/nope").unwrap_err();

    assert!(err.to_string().contains("source file does not exist"), "got {err}");
    assert!(stored_syncs(&ws, "home").is_empty());
}

#[test]
fn add_rejects_destination_outside_repository() {
    let ws = Workspace::new();
    ws.write("home/bashrc", "x");
    std::fs::create_dir_all(ws.path().join("plain")).unwrap();
    create_profile(&ws, "home").unwrap();

    let err = add(&ws, "home", "home/bashrc", "plain/bashrc").unwrap_err();

    assert!(err.to_string().contains("not inside a git repository"), "got {err}");
}

#[test]
fn add_rejects_duplicate_pair() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");
    create_profile(&ws, "home").unwrap();
    add(&ws, "home", "home/bashrc", "dots/bashrc").unwrap();

    let err = add(&ws, "home", "home/bashrc", "dots/bashrc").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::DuplicateSync { .. })
    ));
}

#[test]
fn add_to_unknown_profile_fails() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/bashrc", "x");

    let err = add(&ws, "ghost", "home/bashrc", "dots/bashrc").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::UnknownProfile(_))
    ));
}

#[test]
fn remove_is_one_based() {
    let ws = Workspace::new();
    ws.init_repo("dots");
    ws.write("home/a", "a");
    ws.write("home/b", "b");
    create_profile(&ws, "home").unwrap();
    add(&ws, "home", "home/a", "dots/a").unwrap();
    add(&ws, "home", "home/b", "dots/b").unwrap();

    syncs::remove(
        &ws.global(),
        &RemoveOpts {
            profile: "home".to_string(),
            number: 1,
        },
        &quiet_logger(),
    )
    .unwrap();

    let stored = stored_syncs(&ws, "home");
    assert_eq!(stored.len(), 1);
    assert!(stored[0].source_file.ends_with("b"));
}

#[test]
fn remove_out_of_range_fails() {
    let ws = Workspace::new();
    create_profile(&ws, "home").unwrap();

    for number in [0, 1] {
        let err = syncs::remove(
            &ws.global(),
            &RemoveOpts {
                profile: "home".to_string(),
                number,
            },
            &quiet_logger(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::SyncIndexOutOfRange { .. })
        ));
    }
}
