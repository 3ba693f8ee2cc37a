use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    contact_line, parse_contact_id, parse_range_end, parse_range_start, summary_line,
};
use anyhow::Result;
use clap::{ArgAction, Args, ValueEnum};
use formbox_core::time::format_datetime;
use formbox_core::{Contact, ContactForm, ContactPatch};

/// Options the form offers for how to reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ContactPreference {
    Email,
    Phone,
    Whatsapp,
}

impl ContactPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPreference::Email => "email",
            ContactPreference::Phone => "phone",
            ContactPreference::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Args)]
pub struct ContactFormArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub reason: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub accept_terms: bool,
    #[arg(long, value_enum)]
    pub preference: Option<ContactPreference>,
}

impl From<ContactFormArgs> for ContactForm {
    fn from(args: ContactFormArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            reason: args.reason,
            message: args.message,
            accepts_terms: Some(args.accept_terms),
            contact_preference: args.preference.map(|pref| pref.as_str().to_string()),
        }
    }
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub reason: Option<String>,
    #[arg(long)]
    pub message: Option<String>,
    #[arg(long)]
    pub accept_terms: Option<bool>,
    #[arg(long, value_enum)]
    pub preference: Option<ContactPreference>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Confirm removal of every stored contact
    #[arg(long, action = ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub term: String,
}

#[derive(Debug, Args)]
pub struct ByReasonArgs {
    pub reason: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Start of the range (YYYY-MM-DD or YYYY-MM-DD HH:MM, local time)
    #[arg(long)]
    pub from: String,
    /// End of the range, inclusive; a bare date covers the whole day
    #[arg(long)]
    pub to: String,
}

pub fn add_contact(ctx: &Context<'_>, args: ContactFormArgs) -> Result<()> {
    let contact = ctx.facade.save(args.into())?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("saved {} {}", contact.id, contact.name);
    }
    Ok(())
}

pub fn validate_contact(ctx: &Context<'_>, args: ContactFormArgs) -> Result<()> {
    let report = ctx.facade.validate_contact_data(&args.into());
    if ctx.json {
        print_json(&report)?;
    } else if report.valid {
        println!("contact data is valid");
    } else {
        for error in &report.errors {
            println!("- {}", error);
        }
    }
    if report.valid {
        Ok(())
    } else {
        Err(invalid_input(format!(
            "{} validation error(s)",
            report.errors.len()
        )))
    }
}

pub fn list_contacts(ctx: &Context<'_>) -> Result<()> {
    print_contacts(ctx, &ctx.facade.list()?)
}

pub fn summarize_contacts(ctx: &Context<'_>) -> Result<()> {
    let summaries = ctx.facade.summaries()?;
    if ctx.json {
        return print_json(&summaries);
    }
    for summary in &summaries {
        println!("{}", summary_line(summary));
    }
    println!("{} contact(s)", summaries.len());
    Ok(())
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contact = ctx
        .facade
        .get_by_id(id)?
        .ok_or_else(|| not_found("contact not found"))?;

    if ctx.json {
        return print_json(&contact);
    }

    println!("id: {}", contact.id);
    println!("name: {}", contact.name);
    println!("email: {}", contact.email);
    println!("phone: {}", contact.phone);
    println!("reason: {}", contact.reason);
    println!("preference: {}", contact.contact_preference);
    println!("accepts_terms: {}", contact.accepts_terms);
    println!("created_at: {}", format_datetime(contact.created_at));
    println!("updated_at: {}", format_datetime(contact.updated_at));
    println!("days_elapsed: {}", contact.days_elapsed());
    println!("message:");
    for line in contact.message.lines() {
        println!("  {}", line);
    }
    Ok(())
}

pub fn edit_contact(ctx: &Context<'_>, args: EditArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let patch = ContactPatch {
        name: args.name,
        email: args.email,
        phone: args.phone,
        reason: args.reason,
        message: args.message,
        accepts_terms: args.accept_terms,
        contact_preference: args.preference.map(|pref| pref.as_str().to_string()),
    };
    if patch.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let contact = ctx.facade.update_contact(id, &patch)?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("updated {} {}", contact.id, contact.name);
    }
    Ok(())
}

pub fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    ctx.facade.remove(id)?;
    if !ctx.json {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn clear_contacts(ctx: &Context<'_>, args: ClearArgs) -> Result<()> {
    if !args.yes {
        return Err(invalid_input("refusing to delete every contact without --yes"));
    }
    ctx.facade.clear_all()?;
    if !ctx.json {
        println!("all contacts deleted");
    }
    Ok(())
}

pub fn search_contacts(ctx: &Context<'_>, args: SearchArgs) -> Result<()> {
    print_contacts(ctx, &ctx.facade.search(&args.term)?)
}

pub fn recent_contacts(ctx: &Context<'_>) -> Result<()> {
    print_contacts(ctx, &ctx.facade.recent()?)
}

pub fn contacts_by_reason(ctx: &Context<'_>, args: ByReasonArgs) -> Result<()> {
    print_contacts(ctx, &ctx.facade.by_reason(&args.reason)?)
}

pub fn contacts_in_range(ctx: &Context<'_>, args: RangeArgs) -> Result<()> {
    let start = parse_range_start(&args.from)?;
    let end = parse_range_end(&args.to)?;
    if end < start {
        return Err(invalid_input("--to must not be before --from"));
    }
    print_contacts(ctx, &ctx.facade.by_date_range(start, end)?)
}

fn print_contacts(ctx: &Context<'_>, contacts: &[Contact]) -> Result<()> {
    if ctx.json {
        return print_json(&contacts);
    }
    if contacts.is_empty() {
        println!("no contacts");
        return Ok(());
    }
    for contact in contacts {
        println!("{}", contact_line(contact));
    }
    Ok(())
}
