use crate::commands::{print_json, Context};
use anyhow::Result;
use formbox_core::ContactStats;

pub fn stats(ctx: &Context<'_>) -> Result<()> {
    let stats = ctx.facade.stats()?;
    if ctx.json {
        return print_json(&stats);
    }
    print_stats(&stats);
    Ok(())
}

pub fn status(ctx: &Context<'_>) -> Result<()> {
    let status = ctx.facade.system_status();
    if ctx.json {
        return print_json(&status);
    }

    let available = if status.storage_available { "yes" } else { "no" };
    println!("storage_available: {}", available);
    println!("storage_key: {}", ctx.facade.store().key());
    println!("storage_size_bytes: {}", status.storage_size_bytes);
    println!("total_contacts: {}", status.total_contacts);
    print_stats(&status.stats);
    Ok(())
}

fn print_stats(stats: &ContactStats) {
    println!("total: {}", stats.total);
    println!("recent: {}", stats.recent);
    if !stats.by_reason.is_empty() {
        println!("by reason:");
        for (reason, count) in &stats.by_reason {
            println!("  {}: {}", reason, count);
        }
    }
    if !stats.by_month.is_empty() {
        println!("by month:");
        for (month, count) in &stats.by_month {
            println!("  {}: {}", month, count);
        }
    }
}
