//! Integration tests for the format command (CLI)

use std::fs;
use tempfile::TempDir;

use crate::helpers::{run_tsf, write_config, FULL_CONFIG};

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn format_help_exits_0_and_shows_usage() {
    let (stdout, _stderr, exit_code) = run_tsf(&["format", "--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Run the formatting pipeline"));
    assert!(stdout.contains("[INPUT]"));
}

#[test]
fn top_level_help_describes_the_tool() {
    let (stdout, _stderr, exit_code) = run_tsf(&["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Format dialogue scripts"));
    assert!(stdout.contains("config"));
    assert!(stdout.contains("completions"));
}

// ============================================================================
// End-To-End Formatting Tests
// ============================================================================

#[test]
fn formats_script_end_to_end_with_crlf_output() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"
[basic]
chapter_label = "chapter"

[advanced]
decorations = ["\\[deco\\]"]

[features]
preprocess = true
decorations = true
panels = true
nonlatin = true
speakers = true
tildes = true
ellipses = true
blanklines = true
"#,
    );
    let input = dir.path().join("raw.txt");
    let output = dir.path().join("clean.txt");
    fs::write(
        &input,
        "Panel 1\n[deco]Tom: hi there~~~\nSFX: crash\nこんにちは\n\nChapter: One\nWait\u{2026}\u{2026}\n",
    )
    .unwrap();

    let (stdout, stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0, "stdout: {stdout}\nstderr: {stderr}");
    assert!(stdout.contains("1 panel labels have been removed."));
    assert!(stdout.contains("1 speaker labels have been removed."));
    assert!(stdout.contains("1 non-Latin lines have been removed."));

    // Exact bytes: UTF-8, CRLF per line, protected lines verbatim.
    let written = fs::read(&output).unwrap();
    assert_eq!(
        written,
        b"hi there~\r\nSFX: crash\r\nChapter: One\r\nWait...\r\n"
    );
}

#[test]
fn disabled_stages_leave_lines_alone() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"
[features]
blanklines = true
"#,
    );
    let input = dir.path().join("raw.txt");
    let output = dir.path().join("clean.txt");
    fs::write(&input, "Panel 1\nTom: hi\n\n").unwrap();

    let (_stdout, _stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    let written = fs::read(&output).unwrap();
    assert_eq!(written, b"Panel 1\r\nTom: hi\r\n");
}

#[test]
fn ambiguous_speaker_is_kept_when_not_interactive() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), FULL_CONFIG);
    let input = dir.path().join("raw.txt");
    let output = dir.path().join("clean.txt");
    fs::write(&input, "The quick brown fox: jumped\n").unwrap();

    let (_stdout, stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    // Default policy: keep the line, exit cleanly, surface a warning.
    assert_eq!(exit_code, 0);
    assert_eq!(
        fs::read(&output).unwrap(),
        b"The quick brown fox: jumped\r\n"
    );
    assert!(stderr.contains("cannot confirm ambiguous speaker label"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn invalid_decoration_pattern_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"
[advanced]
decorations = ["[unclosed"]
"#,
    );
    let input = dir.path().join("raw.txt");
    let output = dir.path().join("clean.txt");
    fs::write(&input, "Tom: hi\n").unwrap();

    let (_stdout, stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("invalid decoration pattern"));
    assert!(!output.exists());
}

#[test]
fn non_utf8_input_fails_before_processing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), FULL_CONFIG);
    let input = dir.path().join("raw.txt");
    let output = dir.path().join("clean.txt");
    fs::write(&input, [0x68u8, 0x69, 0xff, 0xfe]).unwrap();

    let (_stdout, stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("not valid UTF-8"));
    assert!(!output.exists());
}

#[test]
fn missing_input_fails_in_non_interactive_mode() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), FULL_CONFIG);

    let (_stdout, stderr, exit_code) = run_tsf(&[
        "format",
        dir.path().join("missing.txt").to_str().unwrap(),
        dir.path().join("clean.txt").to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("not a terminal"));
}

// ============================================================================
// Output Name Derivation Tests
// ============================================================================

#[test]
fn bare_output_name_derives_from_input_stem() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), FULL_CONFIG);
    let input = dir.path().join("script.txt");
    fs::write(&input, "Tom: hi\n").unwrap();

    let (_stdout, _stderr, exit_code) = run_tsf(&[
        "format",
        input.to_str().unwrap(),
        "clean",
        "--config",
        config.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    let derived = dir.path().join("scriptclean.txt");
    assert_eq!(fs::read(&derived).unwrap(), b"hi\r\n");
}
