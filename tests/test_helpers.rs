#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub const TEST_SESSION: &str = "integration-session";

/// Creates a `Command` for the `moodlens` binary with a clean environment and
/// its database inside `dir`.
pub fn base_moodlens_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("moodlens").expect("moodlens binary not built");
    configure_moodlens_command(&mut cmd, dir);
    cmd
}

/// Applies the standard non-interactive environment to an existing `Command`.
pub fn configure_moodlens_command(cmd: &mut Command, dir: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd.env("HOME", dir)
        .env("MOODLENS_DB", dir.join("moodlens.db"))
        .env("MOODLENS_SESSION", TEST_SESSION)
        // Nothing listens here, so chat requests fail fast.
        .env("MOODLENS_OLLAMA_URL", "http://127.0.0.1:9");
}

/// Runs `moodlens checkin` with the given values and asserts success.
pub fn checkin(dir: &Path, routine: &str, stress: u8, dejected_notes: Option<&str>) {
    let mut cmd = base_moodlens_command(dir);
    cmd.args(["checkin", "--routine", routine, "--stress", &stress.to_string()]);
    if let Some(notes) = dejected_notes {
        cmd.args(["--dejected", "--notes", notes]);
    }
    cmd.assert().success();
}
