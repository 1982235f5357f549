use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;
mod store;

use cli::{Cli, Commands};
use output::OutputFormat;

fn main() -> ExitCode {
    // Logs go to stderr so JSON output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("todokv=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    match run(&cli, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let store = store::open_store(&cli.store)?;

    match &cli.command {
        Commands::Signup(args) => commands::user::signup(&store, args, format),
        Commands::Whoami(args) => commands::user::whoami(&store, args, format),
        Commands::Todo(args) => commands::todo::run(&store, args, format),
        Commands::Info => commands::info::run(&store, format),
    }
}
