//! Config subcommands handler

use anyhow::Result;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tsf::config::migrate_config;
use tsf::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<PathBuf>) -> Result<()> {
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

/// Open the configuration file in the default editor.
///
/// Uses $EDITOR environment variable (defaults to 'vi').
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;

    // Ensure config exists
    if !config_path.exists() {
        let config = Config::default();
        config.save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());

    println!("Opening {} with {}", config_path.display(), editor);

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;

    Ok(())
}

/// Migrate the config file by adding missing fields.
///
/// Reads the existing config file (or empty if it doesn't exist), adds any
/// missing fields from the current default config, shows a preview of the
/// changes, and prompts for confirmation unless `--yes` was given.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(assume_yes: bool) -> Result<()> {
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;

    // Case 1: No changes needed
    if !result.has_changes() {
        println!("Config is already up to date.");
        return Ok(());
    }

    // Case 2: Config file doesn't exist - create with full defaults
    if !file_exists {
        println!("Config file does not exist. Will create with default settings.");
        println!();
        print_preview(&result.content);
        println!();

        if !assume_yes && !prompt_confirmation(&format!("Create {}?", config_path.display()))? {
            println!("No changes made.");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, &result.content)?;
        println!("Config file created successfully.");
        return Ok(());
    }

    // Case 3: Config exists but has missing fields - show them and confirm
    let total_fields = result.added_fields.len();
    let total_sections = result.sections_added.len();
    if total_sections > 0 {
        println!(
            "Found {} missing field(s) in {} new section(s):",
            total_fields, total_sections
        );
    } else {
        println!("Found {} missing field(s):", total_fields);
    }
    println!();
    for field in &result.added_fields {
        println!("+ {field}");
    }
    println!();

    if !assume_yes
        && !prompt_confirmation(&format!("Apply these changes to {}?", config_path.display()))?
    {
        println!("No changes made.");
        return Ok(());
    }

    fs::write(&config_path, &result.content)?;
    println!("Config updated successfully.");

    Ok(())
}

/// Print new file content with a `+` prefix per line.
fn print_preview(content: &str) {
    for line in content.lines() {
        println!("+ {line}");
    }
}

/// Prompt user for yes/no confirmation.
///
/// Returns true if user confirms (y/yes), false otherwise.
/// If stdin is not a TTY (non-interactive), returns false.
#[cfg(not(tarpaulin_include))]
fn prompt_confirmation(message: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        println!("Non-interactive mode: use --yes to apply changes automatically");
        return Ok(false);
    }

    print!("{message} [y/N] ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
