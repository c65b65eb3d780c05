//! Abridge CLI - summarise text through a remote service
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use abridge::logging::{self, LogDestination};
use abridge::view_model::SUMMARY_HEADING;
use abridge::{runner, ui, Config, FormState, HttpSummaryService, Outcome};
use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "abridge")]
#[command(author, version, about = "Summarise text through a remote summarisation service", long_about = None)]
struct Cli {
    /// Path to abridge.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the service base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise text once and print the result
    Summarise {
        /// Text to summarise; read from stdin when omitted and piped
        text: Option<String>,
        /// Read the text from a file
        #[arg(long, conflicts_with_all = ["text", "edit"])]
        file: Option<PathBuf>,
        /// Compose the text in $EDITOR
        #[arg(long, conflicts_with = "text")]
        edit: bool,
    },
    /// Check that the summarisation service is reachable
    Ping,
    /// Generate shell completions
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "abridge", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref(), cli.base_url.as_deref())?;

    let level = logging::level_for_verbosity(cli.verbose);
    match cli.command {
        None => logging::initialize(LogDestination::File(&config.logging.path), level),
        Some(_) => logging::initialize(LogDestination::Terminal, level),
    }
    match &config.source {
        Some(path) => log::info!("loaded configuration from {}", path.display()),
        None => log::info!("no configuration file found, using defaults"),
    }

    let service = HttpSummaryService::new(&config.service)?;

    match cli.command {
        Some(Commands::Summarise { text, file, edit }) => {
            let text = read_text(text, file, edit)?;
            let state = FormState::new(config.limits);
            let state = runner::summarize_once(&service, state, text).await;

            match state.view().outcome {
                Outcome::Summary(summary) => {
                    println!("{}\n", SUMMARY_HEADING.bold());
                    println!("{}", summary);
                }
                Outcome::Failed(message) => bail!(message),
                Outcome::Idle | Outcome::Loading => bail!("no summary was produced"),
            }
        }
        Some(Commands::Ping) => match service.health().await {
            Ok(message) => println!("{} {}", "✓".green(), message),
            Err(e) => bail!("{} unreachable: {}", config.service.base_url, e),
        },
        Some(Commands::Completions { .. }) => {}
        None => {
            // Default: Launch the TUI
            ui::run(Arc::new(service), config.limits).await?;
        }
    }

    Ok(())
}

/// Pick the text source: argument, file, editor, or piped stdin
fn read_text(text: Option<String>, file: Option<PathBuf>, edit: bool) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    if edit {
        return edit::edit("").context("failed to open editor");
    }
    if let Some(text) = text {
        return Ok(text);
    }
    if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    Ok(String::new())
}
