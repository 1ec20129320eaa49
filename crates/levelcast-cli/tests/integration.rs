//! Integration tests for levelcast-cli.
//!
//! Tests invoke the built binary and check its output.

use std::net::UdpSocket;
use std::path::Path;
use std::process::{Command, Output};
use std::time::Duration;

/// Helper to get the path to the `levelcast` binary built by cargo.
fn levelcast_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_levelcast"))
}

fn run_with(args: &[&str], settings: &Path) -> Output {
    levelcast_bin()
        .args(args)
        .arg("--settings")
        .arg(settings)
        .output()
        .expect("failed to run levelcast")
}

fn parameter_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| l.contains(" = "))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// `levelcast run`
// ---------------------------------------------------------------------------

#[test]
fn cli_run_dry_run_solo_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with(
        &["run", "--dry-run", "--cycles", "3"],
        &dir.path().join("missing.toml"),
    );
    assert!(output.status.success(), "levelcast run failed: {output:?}");

    let lines = parameter_lines(&output);
    assert_eq!(lines.len(), 6);
    for pair in lines.chunks(2) {
        assert!(pair[0].starts_with("Voicemeeter/Virt/1/Level = "));
        assert!(pair[1].starts_with("Voicemeeter/Selected/Level = "));
    }
}

#[test]
fn cli_run_dry_run_broadcast_potato() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "edition = \"potato\"\nsolo = false\nselected = \"a5\"\n").unwrap();

    let output = run_with(&["run", "--dry-run", "--cycles", "1"], &path);
    assert!(output.status.success());

    let lines = parameter_lines(&output);
    // Every slot of the largest edition plus the selected mirror
    assert_eq!(lines.len(), 17);
    assert!(lines[0].starts_with("Voicemeeter/Phys/1/Level"));
    assert!(lines.iter().any(|l| l.starts_with("Voicemeeter/Bus/A5/Level")));
    assert!(lines.iter().any(|l| l.starts_with("Voicemeeter/Selected/Level")));
}

#[test]
fn cli_run_sends_osc() {
    let listener = UdpSocket::bind("127.0.0.1:0").unwrap();
    listener.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let target = listener.local_addr().unwrap().to_string();

    let dir = tempfile::tempdir().unwrap();
    let output = run_with(
        &["run", "--target", &target, "--cycles", "2"],
        &dir.path().join("missing.toml"),
    );
    assert!(output.status.success());

    let mut buf = [0u8; 1024];
    for _ in 0..4 {
        let (size, _) = listener.recv_from(&mut buf).unwrap();
        let packet = &buf[..size];
        assert!(packet.starts_with(b"/avatar/parameters/VRCOSC/Voicemeeter/"));
    }
}

#[test]
fn cli_run_rejects_invalid_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "poll_rate = \"3hz\"\n").unwrap();

    let output = run_with(&["run", "--dry-run", "--cycles", "1"], &path);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load settings"));
    assert!(stderr.contains("poll_rate"));
}

#[test]
fn cli_run_rejects_zero_cycles() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with(
        &["run", "--dry-run", "--cycles", "0"],
        &dir.path().join("missing.toml"),
    );
    assert!(!output.status.success());
    assert!(parameter_lines(&output).is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--cycles"));
}

// ---------------------------------------------------------------------------
// `levelcast slots` / `levelcast topology`
// ---------------------------------------------------------------------------

#[test]
fn cli_slots_lists_addresses() {
    let output = levelcast_bin()
        .args(["slots", "--prefix", "/levels/"])
        .output()
        .expect("failed to run levelcast slots");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/levels/Voicemeeter/Phys/1/Level"));
    assert!(stdout.contains("/levels/Voicemeeter/Bus/B3/Level"));
    assert!(stdout.contains("/levels/Voicemeeter/Selected/Level"));
    assert!(stdout.contains("Total: 17 parameters"));
}

#[test]
fn cli_topology_standard() {
    let output = levelcast_bin()
        .args(["topology", "--edition", "standard"])
        .output()
        .expect("failed to run levelcast topology");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Edition: standard"));
    assert!(stdout.contains("2 physical, 1 virtual"));
    let virt = stdout.lines().find(|l| l.trim_start().starts_with("virt1")).unwrap();
    assert!(virt.ends_with("4, 5"));
    let b1 = stdout.lines().find(|l| l.trim_start().starts_with("b1")).unwrap();
    assert!(b1.ends_with("8, 9"));
}

#[test]
fn cli_topology_unknown_edition() {
    let output = levelcast_bin()
        .args(["topology", "--edition", "mango"])
        .output()
        .expect("failed to run levelcast topology");
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `levelcast config`
// ---------------------------------------------------------------------------

#[test]
fn cli_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let output = run_with(&["config", "init"], &path);
    assert!(output.status.success());
    assert!(path.exists());

    // Refuses to overwrite without --force
    let output = run_with(&["config", "init"], &path);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));

    let output = run_with(&["config", "init", "--force"], &path);
    assert!(output.status.success());

    let output = run_with(&["config", "show", "--json"], &path);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"edition\": \"banana\""));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("warning"));
}

#[test]
fn cli_config_show_reports_problems() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "edition = \"mango\"\nattack = 4.0\n").unwrap();

    let output = run_with(&["config", "show"], &path);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("edition = \"mango\""));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown edition 'mango'"));
    assert!(stderr.contains("attack"));
}
