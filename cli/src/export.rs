#![deny(missing_docs)]

//! # Export Command
//!
//! Renders the stored `api.yaml` as OpenAPI, Markdown or a Postman collection.

use crate::context::Context;
use crate::error::{CliError, CliResult};
use architect_core::{AppError, ExportFormat};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Arguments for the export command.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output format (openapi, markdown, postman).
    #[clap(short, long, default_value = "openapi")]
    pub format: ExportFormat,

    /// Destination file; `-` writes to stdout. Defaults to a per-format name.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// Executes the export.
pub fn execute(args: &ExportArgs, ctx: &Context, out: &mut impl Write) -> CliResult<()> {
    let api = ctx.store.load_api().map_err(CliError::Load)?;
    let rendered = args.format.export(&api);

    let target = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(args.format.default_file_name()));

    if target.as_os_str() == "-" {
        out.write_all(rendered.as_bytes())?;
        if !rendered.ends_with('\n') {
            writeln!(out)?;
        }
        return Ok(());
    }

    fs::write(&target, &rendered)
        .map_err(|e| CliError::Export(AppError::write_file(&target, e)))?;
    info!(path = ?target, format = %args.format, "Exported API");

    if !ctx.quiet {
        writeln!(
            out,
            "Exported {} endpoints as {} to {}",
            api.endpoints.len(),
            args.format,
            target.display()
        )?;
    }
    Ok(())
}
