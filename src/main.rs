//! Typesetter Formatter CLI entry point.

mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tsf",
    version,
    about = "Format dialogue scripts into typesetter-ready text",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Input script file
    input: Option<PathBuf>,

    /// Output file; a bare name without an extension is appended to the
    /// input file's stem
    output: Option<PathBuf>,

    /// Use an alternate config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the formatting pipeline over a script file
    Format {
        /// Input script file
        input: Option<PathBuf>,
        /// Output file
        output: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration as TOML
    Show,
    /// Open the configuration file in the default editor
    Edit,
    /// Add missing fields to the configuration file
    Migrate {
        /// Apply changes without prompting
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => commands::format::run(cli.input, cli.output, cli.config),
        Some(Commands::Format { input, output }) => commands::format::run(input, output, cli.config),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::handle_show(cli.config),
            ConfigAction::Edit => commands::config::handle_edit(),
            ConfigAction::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "tsf", &mut io::stdout());
            Ok(())
        }
    }
}
