//! kubeboot - scaffold Kubernetes-style aggregated API resources.
//!
//! Exit codes:
//! - 0: Completed
//! - 1: Aborted (validation, render or I/O failure)
//! - 2: Completed, but a primary artifact already existed

mod commands;
mod config;
mod ops;
mod reports;

use std::process::ExitCode;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli.run()
}

fn init_logging(verbose: bool) {
    let default = if verbose { "kubeboot=debug" } else { "kubeboot=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Reports own stdout
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
