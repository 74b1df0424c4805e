//! commitgen - CLI entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commitgen::generator::build_prompt;
use commitgen::{CommitGen, ContextError, GitRepository, MessageStyle, Options};

/// Generate a commit message for staged changes using Gemini.
#[derive(Parser, Debug)]
#[command(name = "commitgen")]
#[command(about = "Generate a conventional commit message for staged changes")]
#[command(version)]
struct Cli {
    /// Repository directory (defaults to the current directory)
    #[arg(short = 'C', long = "dir")]
    dir: Option<PathBuf>,

    /// API key for the Gemini API
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model to use for generation
    #[arg(long)]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Generate only a subject line
    #[arg(short, long)]
    short: bool,

    /// Print the prompt that would be sent, without calling the API
    #[arg(long)]
    show_prompt: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.show_prompt {
        return show_prompt(cli.dir).await;
    }

    let options = Options {
        working_dir: cli.dir,
        api_key: cli.api_key,
        model: cli.model,
        timeout: cli.timeout.map(Duration::from_secs),
        style: MessageStyle::from_short_flag(cli.short),
        ..Default::default()
    };

    let mut commit_gen = CommitGen::new(options).context("Failed to set up commit generator")?;
    let config = commit_gen.generator().config();
    debug!(model = %config.model, timeout = ?config.timeout, "generating commit message");
    let result = commit_gen.generate().await;
    commit_gen.close();

    match result {
        Ok(message) => {
            println!("{}", message);
            Ok(())
        }
        Err(e) if e.is_no_staged_changes() => {
            println!("No staged changes found. Please stage your changes with 'git add' first.");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to generate commit message"),
    }
}

/// Print the assembled prompt for the staged changes.
async fn show_prompt(dir: Option<PathBuf>) -> Result<()> {
    let repo = GitRepository::open(dir);
    match repo.gather_context().await {
        Ok(context) => {
            print!("{}", build_prompt(&context));
            Ok(())
        }
        Err(ContextError::NoStagedChanges) => {
            println!("No staged changes found. Please stage your changes with 'git add' first.");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to read repository"),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
