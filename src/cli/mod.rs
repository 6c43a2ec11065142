//! Command-line interface for gitsieve
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing; each subcommand lives in [`commands`].

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

pub mod commands;
mod output;

pub use output::Output;

/// gitsieve - select commits by diff size
#[derive(Parser)]
#[command(name = "gitsieve", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find commits matching diff-size filters
    Find(commands::find::FindArgs),
    /// Show per-file diff statistics for one commit
    Stat(commands::stat::StatArgs),
    /// Print the merged configuration
    Config,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        // Change directory if specified
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {dir}"))?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        match self.command {
            Commands::Find(args) => commands::find::execute(args, self.config.as_deref(), &output),
            Commands::Stat(args) => commands::stat::execute(args, self.config.as_deref(), &output),
            Commands::Config => commands::config::execute(self.config.as_deref(), &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    });

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
