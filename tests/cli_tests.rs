//! CLI-level tests that run the binary without a container engine.
//!
//! Host probing happens before any engine call, so argument handling and the
//! mandatory display check are observable from exit codes alone.

use assert_cmd::Command;
use predicates::prelude::*;

fn playlutris() -> Command {
    Command::cargo_bin("playlutris").expect("binary built")
}

#[test]
fn test_missing_display_dir_exits_with_status_1() {
    playlutris()
        .args(["--xorg", "/nonexistent/.X11-unix"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Display socket directory not found"));
}

#[test]
fn test_missing_wayland_dir_exits_with_status_1() {
    playlutris()
        .args(["--wayland", "/nonexistent/wayland-0"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_xorg_and_wayland_are_mutually_exclusive() {
    playlutris()
        .args([
            "--xorg",
            "/tmp/.X11-unix",
            "--wayland",
            "/run/user/1000/wayland-0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_rejects_unknown_log_level() {
    playlutris()
        .args(["-l", "VERBOSE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_help_lists_all_flags() {
    playlutris()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--log")
                .and(predicate::str::contains("--detach"))
                .and(predicate::str::contains("--pulse"))
                .and(predicate::str::contains("--xorg"))
                .and(predicate::str::contains("--wayland")),
        );
}
