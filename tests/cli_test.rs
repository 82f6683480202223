mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn chorus(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("agent-chorus").unwrap();
    cmd.env("AGENT_CHORUS_HOME", home).env("PATH", "");
    cmd
}

#[test]
fn config_show_merges_partial_file() {
    let (dir, paths) = common::temp_home();
    fs::write(&paths.config_file, r#"{"volume":0.2}"#).unwrap();

    chorus(dir.path())
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"volume\": 0.2"))
        .stdout(predicate::str::contains("\"active_pack\": \"peon\""))
        .stdout(predicate::str::contains("\"user.spam\": true"));
}

#[test]
fn config_validate_reports_issues() {
    let (dir, paths) = common::temp_home();
    fs::write(&paths.config_file, r#"{"spam_threshold":0}"#).unwrap();

    chorus(dir.path())
        .args(["config", "--validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spam_threshold"));
}

#[test]
fn pause_resume_and_toggle_flip_the_marker() {
    let (dir, paths) = common::temp_home();

    chorus(dir.path()).arg("pause").assert().success().stdout("paused\n");
    assert!(paths.pause_marker.exists());

    chorus(dir.path())
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"paused\": true"));

    chorus(dir.path()).arg("toggle").assert().success().stdout("resumed\n");
    assert!(!paths.pause_marker.exists());

    chorus(dir.path()).arg("resume").assert().success().stdout("resumed\n");
}

#[test]
fn handle_survives_unknown_and_malformed_events() {
    let (dir, _paths) = common::temp_home();

    chorus(dir.path())
        .args(["handle", "--source", "opencode", r#"{"type":"file.edited"}"#])
        .assert()
        .success();

    chorus(dir.path())
        .args(["handle", "--source", "claude", "not json"])
        .assert()
        .success();
}

#[test]
fn handle_records_rotation_assignment() {
    let (dir, paths) = common::temp_home();
    common::write_current_pack(&paths.packs_dir, "a", &[("task.complete", &["sounds/x.wav"])]);
    fs::write(&paths.config_file, r#"{"pack_rotation":["a"]}"#).unwrap();

    chorus(dir.path())
        .args([
            "handle",
            "--source",
            "opencode",
            "--session",
            "s-1",
            r#"{"type":"session.idle"}"#,
        ])
        .assert()
        .success();

    let state = fs::read_to_string(&paths.state_file).unwrap();
    assert!(state.contains("\"s-1\": \"a\""));
    assert!(state.contains("sounds/x.wav"));
}

#[test]
fn listen_processes_every_line() {
    let (dir, paths) = common::temp_home();
    common::write_current_pack(
        &paths.packs_dir,
        "peon",
        &[
            ("session.start", &["sounds/hi.wav"]),
            ("task.error", &["sounds/err.wav"]),
        ],
    );

    chorus(dir.path())
        .args(["listen", "--source", "opencode"])
        .write_stdin("{\"type\":\"session.error\"}\n\nnot json\n")
        .assert()
        .success();

    let state = fs::read_to_string(&paths.state_file).unwrap();
    assert!(state.contains("sounds/hi.wav"));
    assert!(state.contains("sounds/err.wav"));
}

#[test]
fn listen_skips_lines_that_are_not_utf8() {
    let (dir, paths) = common::temp_home();
    common::write_current_pack(&paths.packs_dir, "peon", &[("task.error", &["sounds/err.wav"])]);

    chorus(dir.path())
        .args(["listen", "--source", "opencode"])
        .write_stdin(&b"\xff\xfe garbage\n{\"type\":\"session.error\"}\n"[..])
        .assert()
        .success();

    let state = fs::read_to_string(&paths.state_file).unwrap();
    assert!(state.contains("sounds/err.wav"));
}

#[test]
fn one_shot_claude_prompts_never_reach_the_burst_threshold() {
    let (dir, paths) = common::temp_home();
    common::write_current_pack(&paths.packs_dir, "peon", &[("user.spam", &["sounds/stop.wav"])]);

    for _ in 0..4 {
        chorus(dir.path())
            .args([
                "handle",
                "--source",
                "claude",
                r#"{"hook_event_name":"UserPromptSubmit","session_id":"c-1"}"#,
            ])
            .assert()
            .success();
    }

    assert!(!paths.state_file.exists());
}

#[test]
fn packs_lists_installed_packs() {
    let (dir, paths) = common::temp_home();
    common::write_legacy_pack(&paths.packs_dir, "classic", &[("greeting", &["hi.wav"])]);

    chorus(dir.path())
        .args(["packs", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"classic\""))
        .stdout(predicate::str::contains("\"schema\": \"legacy\""));
}
