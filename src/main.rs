mod catalog;
mod cli;
mod error;
mod handoff;
mod tags;
mod tui;
mod workflow;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli_args = cli::Cli::parse();

    // Delegate the main application logic to the workflow module
    workflow::run_notepick(cli_args)
}
