#![deny(missing_docs)]

//! # Show Command
//!
//! Prints `project.md` and a table of the stored endpoints.

use crate::context::Context;
use crate::error::{CliError, CliResult};
use std::io::Write;

const RULE: &str = "────────────────────────────────────────────────────────────────";

/// Arguments for the show command. With neither flag both sections print.
#[derive(clap::Args, Debug, Clone)]
pub struct ShowArgs {
    /// Show only endpoints.
    #[clap(long)]
    pub endpoints: bool,

    /// Show only the project description.
    #[clap(long)]
    pub project: bool,
}

/// Executes the show command.
pub fn execute(args: &ShowArgs, ctx: &Context, out: &mut impl Write) -> CliResult<()> {
    let both = !args.endpoints && !args.project;

    if args.project || both {
        writeln!(out, "📁 {}", ctx.store.project_path().display())?;
        writeln!(out, "────────────────────────")?;
        match ctx.store.read_project() {
            Ok(content) => writeln!(out, "{}", content)?,
            Err(_) => writeln!(out, "No project.md found")?,
        }
        writeln!(out)?;
    }

    if args.endpoints || both {
        let api = ctx.store.load_api().map_err(CliError::Load)?;
        writeln!(out, "API Endpoints:\n")?;
        writeln!(out, "{:<4} {:<8} {:<30} {}", "Auth", "Method", "Path", "Description")?;
        writeln!(out, "{}", RULE)?;
        for endpoint in &api.endpoints {
            let marker = if endpoint.auth { "🔒" } else { "🔓" };
            writeln!(
                out,
                "{:<4} {:<8} {:<30} {}",
                marker, endpoint.method, endpoint.path, endpoint.description
            )?;
        }
        writeln!(out, "\n🔒 = Requires authentication")?;
        writeln!(out, "🔓 = Public endpoint")?;
    }

    Ok(())
}
