use anyhow::Result;
use formbox_config::AppConfig;
use formbox_facade::ContactFacade;
use serde::Serialize;
use std::io::{self, Write};

pub mod completions;
pub mod contacts;
pub mod reports;
pub mod transfer;

pub struct Context<'a> {
    pub facade: &'a ContactFacade,
    pub json: bool,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
