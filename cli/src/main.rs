#![deny(missing_docs)]

//! # Architect CLI
//!
//! Command Line Interface for managing an API specification stored as
//! `api.yaml` + `project.md`.
//!
//! Supported Commands:
//! - `import`: OpenAPI / Postman / native YAML -> `api.yaml`.
//! - `export`: `api.yaml` -> OpenAPI, Markdown or Postman.
//! - `show`: Prints the project description and endpoint table.

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::Context;
use crate::error::CliResult;

mod context;
mod error;
mod export;
mod import;
mod show;

#[derive(Parser, Debug)]
#[clap(author, version, about = "API specification manager")]
struct Cli {
    /// Directory holding api.yaml and project.md.
    #[clap(long, global = true, env = "ARCHITECT_DIR", default_value = ".architect")]
    spec_dir: PathBuf,

    /// Suppress summary output.
    #[clap(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import an API description into api.yaml.
    Import(import::ImportArgs),
    /// Export api.yaml to another format.
    Export(export::ExportArgs),
    /// Display the current specification.
    Show(show::ShowArgs),
}

/// Installs a stderr subscriber. Without `-v` nothing is logged.
fn init_tracing(verbose: u8) {
    if verbose == 0 {
        return;
    }

    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            1 => "warn,architect=info,architect_core=info".to_string(),
            2 => "info,architect=debug,architect_core=debug".to_string(),
            _ => "debug,architect=trace,architect_core=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> CliResult<()> {
    let ctx = Context::new(&cli.spec_dir, cli.quiet);
    let mut out = io::stdout().lock();

    match &cli.command {
        Commands::Import(args) => import::execute(args, &ctx, &mut out),
        Commands::Export(args) => export::execute(args, &ctx, &mut out),
        Commands::Show(args) => show::execute(args, &ctx, &mut out),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
