mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, contacts, reports, transfer, Context};
use crate::error::{exit_code_for, report_error};
use formbox_config as config;
use formbox_facade::ContactFacade;
use formbox_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "formbox", version, about = "formbox CLI")]
struct Cli {
    #[arg(long, global = true)]
    storage_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Save a new contact request
    Add(contacts::ContactFormArgs),
    /// Check contact data without saving it
    Validate(contacts::ContactFormArgs),
    List,
    Summary,
    Show(contacts::ShowArgs),
    Edit(contacts::EditArgs),
    Delete(contacts::DeleteArgs),
    Clear(contacts::ClearArgs),
    Search(contacts::SearchArgs),
    /// Contacts created in the last 7 days
    Recent,
    #[command(name = "by-reason")]
    ByReason(contacts::ByReasonArgs),
    Range(contacts::RangeArgs),
    Stats,
    Status,
    Export(transfer::ExportArgs),
    Import(transfer::ImportArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        storage_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => run_with_facade(command, storage_path, config_path, json, verbose),
    }
}

fn run_with_facade(
    command: Command,
    storage_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) => {
                if path.exists() {
                    debug!(path = %path.display(), "config resolved");
                } else {
                    debug!(path = %path.display(), "config missing, using defaults");
                }
            }
            Err(err) => {
                debug!(error = %err, "config unavailable");
            }
        }
    }

    let storage_path = paths::resolve_storage_path(
        storage_path.or_else(|| app_config.storage_path.clone()),
    )
    .with_context(|| "resolve storage path")?;
    if verbose {
        debug!(path = %storage_path.display(), key = %app_config.storage_key, "storage resolved");
    }

    let store = Store::open(&storage_path)
        .with_context(|| format!("open storage {}", storage_path.display()))?
        .with_key(app_config.storage_key.clone());
    let facade = ContactFacade::new(store);

    let ctx = Context {
        facade: &facade,
        json,
        config: &app_config,
    };

    match command {
        Command::Add(args) => contacts::add_contact(&ctx, args),
        Command::Validate(args) => contacts::validate_contact(&ctx, args),
        Command::List => contacts::list_contacts(&ctx),
        Command::Summary => contacts::summarize_contacts(&ctx),
        Command::Show(args) => contacts::show_contact(&ctx, args),
        Command::Edit(args) => contacts::edit_contact(&ctx, args),
        Command::Delete(args) => contacts::delete_contact(&ctx, args),
        Command::Clear(args) => contacts::clear_contacts(&ctx, args),
        Command::Search(args) => contacts::search_contacts(&ctx, args),
        Command::Recent => contacts::recent_contacts(&ctx),
        Command::ByReason(args) => contacts::contacts_by_reason(&ctx, args),
        Command::Range(args) => contacts::contacts_in_range(&ctx, args),
        Command::Stats => reports::stats(&ctx),
        Command::Status => reports::status(&ctx),
        Command::Export(args) => transfer::export_contacts(&ctx, args),
        Command::Import(args) => transfer::import_contacts(&ctx, args),
        Command::Completions(_) => {
            unreachable!("completions command handled before storage initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
