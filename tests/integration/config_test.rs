//! Integration tests for config subcommands and completions (CLI)

use tempfile::TempDir;

use crate::helpers::{run_tsf, write_config, FULL_CONFIG};

#[test]
fn config_help_lists_actions() {
    let (stdout, _stderr, exit_code) = run_tsf(&["config", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("show"));
    assert!(stdout.contains("edit"));
    assert!(stdout.contains("migrate"));
}

#[test]
fn config_show_prints_effective_toml() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), FULL_CONFIG);

    let (stdout, _stderr, exit_code) = run_tsf(&[
        "config",
        "show",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[features]"));
    assert!(stdout.contains("chapter_label = \"chapter\""));
    assert!(stdout.contains("speakers = true"));
}

#[test]
fn config_show_follows_series_override() {
    let dir = TempDir::new().unwrap();
    let series = dir.path().join("series.toml");
    std::fs::write(
        &series,
        "[basic]\nchapter_label = \"kapitel\"\n",
    )
    .unwrap();
    let main = dir.path().join("config.toml");
    std::fs::write(
        &main,
        format!("[basic]\nseries_config = \"{}\"\n", series.display()),
    )
    .unwrap();

    let (stdout, _stderr, exit_code) =
        run_tsf(&["config", "show", "--config", main.to_str().unwrap()]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("chapter_label = \"kapitel\""));
}

#[test]
fn config_show_fails_on_malformed_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "not = [valid");

    let (_stdout, stderr, exit_code) = run_tsf(&[
        "config",
        "show",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("failed to parse config file"));
}

#[test]
fn completions_generate_for_bash() {
    let (stdout, _stderr, exit_code) = run_tsf(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("tsf"));
}
