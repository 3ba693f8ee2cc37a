use crate::commands::{print_json, Context};
use anyhow::{anyhow, Context as _, Result};
use clap::{ArgAction, Args};
use serde::Serialize;
use std::path::PathBuf;
use tokio::runtime::Builder;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Directory to write the export file into
    #[arg(long, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,
    /// Print the export to stdout instead of writing a file
    #[arg(long, action = ArgAction::SetTrue)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file produced by `export`
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct ExportReport {
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ImportReport {
    imported: usize,
}

pub fn export_contacts(ctx: &Context<'_>, args: ExportArgs) -> Result<()> {
    if args.stdout {
        let export = ctx.facade.export_contacts()?;
        println!("{}", export.json);
        return Ok(());
    }

    let dir = args
        .out
        .or_else(|| ctx.config.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = ctx.facade.write_export(&dir)?;
    if ctx.json {
        print_json(&ExportReport { path })?;
    } else {
        println!("exported to {}", path.display());
    }
    Ok(())
}

pub fn import_contacts(ctx: &Context<'_>, args: ImportArgs) -> Result<()> {
    let timeout = ctx.config.import.timeout();
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .with_context(|| "start async runtime")?;
    debug!(file = %args.file.display(), ?timeout, "importing contacts");

    let imported = runtime
        .block_on(async {
            tokio::time::timeout(timeout, ctx.facade.import_contacts(&args.file)).await
        })
        .map_err(|_| anyhow!("import timed out after {}s", timeout.as_secs()))??;

    if ctx.json {
        print_json(&ImportReport { imported })?;
    } else {
        println!("imported {} contact(s)", imported);
    }
    Ok(())
}
