//! Autoref CLI Binary
//!
//! Command-line interface for archival reference generation.

use anyhow::Context;
use autoref::logging::init_logging;
use autoref::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.options_file.clone()).context("Error loading options")?;
    let logging = context.config().logging.clone().with_env_overrides();
    init_logging(&cli.logging_config(&logging))
        .context("Error initializing logging")?;
    let output = context.execute(cli)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
