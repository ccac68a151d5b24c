use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use caret::cli::args::{CliArgs, ColorChoice};
use caret::cli::config::resolve_config;
use caret::cli::driver;
use caret::cli::reporter::Reporter;

fn main() -> Result<()> {
    // Initialize tracing if CARET_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports CARET_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    caret::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let config = resolve_config(args.config.as_deref(), &cwd)?;

    let color = match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
            true
        }
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stdout().is_terminal(),
    };
    let reporter = Reporter::new(color);

    let output = driver::run(&args, &config, &reporter)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    Ok(())
}
