//! Shared helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the tsf CLI and capture output.
pub fn run_tsf(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_tsf"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute tsf");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Write a config file into `dir` and return its path.
pub fn write_config(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

/// A config enabling every stage, with no decorations.
pub const FULL_CONFIG: &str = r#"
[basic]
chapter_label = "chapter"

[features]
preprocess = true
decorations = true
panels = true
nonlatin = true
speakers = true
tildes = true
ellipses = true
blanklines = true
"#;
