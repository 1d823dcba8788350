mod cli;
mod commands;
mod domain;
mod presentation;
mod utils;

use clap::Parser;
use cli::Cli;
use commands::{InvalidBasePath, Runnable};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.report.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(bad) = e.downcast_ref::<InvalidBasePath>() {
                tracing::warn!("not a directory: {}", bad.0.display());
                println!("{bad}");
                return ExitCode::from(2);
            }
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "reflog_report=debug"
    } else {
        "reflog_report=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
