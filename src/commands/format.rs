//! Format command: run the normalization pipeline over a script file.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use tsf::files;
use tsf::pipeline::{Confirm, ConfirmError, Pipeline, StageReport};
use tsf::Config;

/// Resolve config and files, run the pipeline, write the output.
#[cfg(not(tarpaulin_include))]
pub fn run(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    print_header("Typesetter Formatter");

    print_header("Parsing config");
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    let decorations = config.compiled_decorations()?;

    print_header("Obtaining file names");
    let (input, output) = resolve_files(&config, input, output)?;
    println!("Input file is {}.", input.display());
    println!("Output file is {}.\n", output.display());

    let lines = files::read_script(&input)?;
    println!("{} lines to process.\n", lines.len());

    let pipeline = Pipeline::new(
        config.features.clone(),
        &config.basic.chapter_label,
        decorations,
    );
    let mut confirm = StdinConfirm;
    let result = pipeline.run(lines, &mut confirm);

    for line in &result.rejected {
        debug!(line = line.as_str(), "rejected non-Latin line");
    }
    print_report(&result.report);

    let written = files::write_script(&output, &result.lines)?;
    println!(
        "{} lines have been written to {}.\n",
        written,
        output.display()
    );
    print_header("Complete");
    Ok(())
}

/// Resolve the input and output paths from arguments, config, or an
/// interactive prompt, in that order.
///
/// This is the only place `input_is_output` is honored: it bypasses output
/// resolution entirely and writes back to the input path.
fn resolve_files(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(PathBuf, PathBuf)> {
    let input = resolve_input(config, input)?;

    if config.features.input_is_output {
        return Ok((input.clone(), input));
    }

    let output = match output {
        Some(path) => resolve_output_name(&input, &path),
        None if !config.basic.output.is_empty() => {
            files::derive_output_path(&input, &config.basic.output)
        }
        None => {
            let raw = prompt_path("Enter output filename")?;
            files::derive_output_path(&input, &raw)
        }
    };
    Ok((input, output))
}

fn resolve_input(config: &Config, input: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = input {
        if path.exists() {
            return Ok(path);
        }
        println!("Input path {} is not recognized.", path.display());
    } else if !config.basic.input.is_empty() {
        let path = PathBuf::from(&config.basic.input);
        if path.exists() {
            return Ok(path);
        }
        println!("Configured input {} is not recognized.", path.display());
    }

    loop {
        let raw = prompt_path("Enter input filename")?;
        let path = PathBuf::from(raw);
        if path.exists() {
            return Ok(path);
        }
        println!("Input path {} is not recognized.", path.display());
    }
}

fn resolve_output_name(input: &Path, output: &Path) -> PathBuf {
    match output.to_str() {
        Some(raw) => files::derive_output_path(input, raw),
        None => output.to_path_buf(),
    }
}

/// One status line per stage, mirroring the classic console output.
fn print_report(report: &StageReport) {
    for (stage, count) in report.entries() {
        let message = match stage {
            "preprocess" => format!("{count} lines have been normalized."),
            "decorations" => format!("{count} decorations have been removed."),
            "panels" => format!("{count} panel labels have been removed."),
            "nonlatin" => format!("{count} non-Latin lines have been removed."),
            "speakers" => format!("{count} speaker labels have been removed."),
            "tildes" => format!("{count} lines have had tildes truncated."),
            "ellipses" => format!("{count} lines have had ellipses truncated."),
            "blanklines" => format!("{count} blank lines have been removed."),
            other => format!("{count} lines affected by {other}."),
        };
        println!("{message}");
    }
    println!();
}

fn print_header(title: &str) {
    let line = "===========================================================";
    println!("{line}\n{title:^59}\n{line}");
}

/// Ask for a file path on stdin. Refuses in non-interactive mode so scripted
/// runs fail loudly instead of hanging.
fn prompt_path(message: &str) -> Result<String> {
    if !atty::is(atty::Stream::Stdin) {
        bail!("{message}: standard input is not a terminal; pass file paths as arguments");
    }
    print!("{message}: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("failed to read file name")?;
    Ok(input.trim().to_string())
}

/// Interactive yes/no prompt for ambiguous speaker lines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, line: &str) -> Result<bool, ConfirmError> {
        if !atty::is(atty::Stream::Stdin) {
            return Err(ConfirmError::NonInteractive);
        }
        println!("{line}");
        print!("Is this speaker text? [y/N] ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        let response = input.trim().to_lowercase();
        Ok(response == "y" || response == "yes")
    }
}
