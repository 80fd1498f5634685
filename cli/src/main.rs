//! # Resilient Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the `resilient` CLI, which provisions a local CMS project
//! (Drupal 8 or WordPress) inside a containerized development environment.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - `core`: configuration, project context, errors
//! - `plugins`: turn the context into task lists (one plugin per concern)
//! - `tasks`: task model, ordered builder and executor
//! - `commands`: `download` and `install`, wiring the above together
//! - `common`: filesystem and process helpers used by the executor
//!
//! ## Examples
//!
//! ```bash
//! # Fetch code and configuration, then install the site
//! resilient download
//! resilient install
//!
//! # Show what would run, with debug logging
//! resilient -vv --dry-run download
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // download / install
mod common; // fs and process helpers
mod core; // config, context, errors
mod plugins; // task producers
mod tasks; // task model and execution

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "resilient",
    about = "Provision a local Drupal or WordPress project",
    long_about = "Downloads framework code, quality tools and local configuration for a CMS project,\n\
                  then installs the site. Settings are read from the project's resilient.yml.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(flatten)]
    opts: commands::GlobalOpts,
}

/// All available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "d")]
    Download(commands::download::DownloadArgs),
    #[command(alias = "i")]
    Install(commands::install::InstallArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Download(args) => commands::download::handle_download(args, &cli.opts),
        Commands::Install(args) => commands::install::handle_install(args, &cli.opts),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
