#![deny(missing_docs)]

//! # Import Command
//!
//! Converts an external API description into the native `api.yaml`:
//!
//! 1. **Detect**: guess the format from extension and content (unless forced).
//! 2. **Import & Validate**: run the selected importer.
//! 3. **Merge**: optionally combine with the existing specification.
//! 4. **Write**: persist `api.yaml` and, if missing, a basic `project.md`.

use crate::context::Context;
use crate::error::{CliError, CliResult};
use architect_core::{create_importer, detect_format, merge, project_markdown, ImportFormat};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Arguments for the import command.
#[derive(clap::Args, Debug, Clone)]
pub struct ImportArgs {
    /// File to import (OpenAPI JSON/YAML, Postman collection, native YAML).
    pub file: PathBuf,

    /// Force a format instead of detecting it (openapi, postman, architect).
    #[clap(short, long)]
    pub format: Option<ImportFormat>,

    /// Merge with the existing specification instead of replacing it.
    #[clap(short, long)]
    pub merge: bool,

    /// Replace an existing specification.
    #[clap(short, long)]
    pub overwrite: bool,
}

/// Executes the import.
///
/// Nothing is written unless every stage before `Write` succeeds.
pub fn execute(args: &ImportArgs, ctx: &Context, out: &mut impl Write) -> CliResult<()> {
    if !args.file.exists() {
        return Err(CliError::FileNotFound(args.file.clone()));
    }

    let format = match args.format {
        Some(format) => format,
        None => {
            let format = detect_format(&args.file).map_err(CliError::Detect)?;
            if !ctx.quiet {
                writeln!(out, "Detected format: {}", format)?;
            }
            format
        }
    };

    let importer = create_importer(format);
    if !ctx.quiet {
        writeln!(out, "Importing from {}...", args.file.display())?;
    }
    let imported = importer.import(&args.file).map_err(CliError::Import)?;
    importer.validate(&imported).map_err(CliError::Validate)?;

    let api = if args.merge {
        let existing = ctx.store.load_or_default().map_err(CliError::Merge)?;
        info!(
            existing = existing.endpoints.len(),
            imported = imported.endpoints.len(),
            "Merging with existing specification"
        );
        merge(&existing, &imported)
    } else {
        imported
    };

    if !args.merge && !args.overwrite && ctx.store.has_api() {
        return Err(CliError::FileExists(ctx.store.api_path()));
    }

    ctx.store.save_api(&api).map_err(CliError::Write)?;

    if !ctx.store.has_project() {
        match ctx.store.write_project(&project_markdown(&api)) {
            Ok(()) if !ctx.quiet => writeln!(out, "Created basic project.md")?,
            Ok(()) => {}
            Err(e) => warn!(error = %e, "Failed to create project.md"),
        }
    }

    if !ctx.quiet {
        writeln!(
            out,
            "Successfully imported {} endpoints from {}",
            api.endpoints.len(),
            args.file.display()
        )?;
        if !api.endpoints.is_empty() {
            writeln!(out, "\nImported endpoints:")?;
            for endpoint in &api.endpoints {
                let lock = if endpoint.auth { " 🔒" } else { "" };
                writeln!(out, "  {} {}{}", endpoint.method, endpoint.path, lock)?;
            }
        }
    }

    Ok(())
}
