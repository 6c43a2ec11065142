use anyhow::Result;
use clap::Parser;
use gitsieve::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
