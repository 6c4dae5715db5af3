//! Cyber Academy: gamified cybersecurity training in the terminal

use anyhow::Context;
use clap::Parser;
use cyber_academy::cli::{self, Cli};
use cyber_academy::logging::init_logging;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    let config = cli::load_config(&cli).context("loading configuration")?;
    config.validate()?;
    tracing::info!(version = cyber_academy::VERSION, "Cyber Academy starting");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(&cli, &config, &mut input, &mut out)?;
    out.flush()?;
    Ok(())
}
