//! One-shot inquiry commands: list, show, status, memo, delete, submit.
//!
//! Each command drives the same [`Console`] the interactive mode uses, so
//! status changes and deletes re-fetch the list just as they do there.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use inquire::Confirm;
use leasedesk_core::{InquiryStatus, NewInquiry, StatusFilter};

use super::{OutputFormat, ServerArgs};
use crate::console::{render, Console, ConsoleError, InquiryApi};
use crate::ui;

pub(crate) fn parse_filter(raw: &str) -> Result<StatusFilter, String> {
    StatusFilter::parse(Some(raw)).map_err(|e| e.to_string())
}

pub(crate) fn parse_status(raw: &str) -> Result<InquiryStatus, String> {
    raw.parse().map_err(|e: leasedesk_core::ValidationError| e.to_string())
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Status filter: all, pending, contacted or completed
    #[arg(long, short, default_value = "all", value_parser = parse_filter)]
    pub status: StatusFilter,

    /// Page to show (1-based, 100 rows per page)
    #[arg(long, short, default_value_t = 1)]
    pub page: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Inquiry ID
    pub id: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Inquiry ID
    pub id: i64,

    /// New status: pending, contacted or completed
    #[arg(value_parser = parse_status)]
    pub status: InquiryStatus,
}

#[derive(Parser, Debug)]
pub struct MemoArgs {
    /// Inquiry ID
    pub id: i64,

    /// Memo text (surrounding whitespace is trimmed)
    #[arg(required_unless_present = "clear")]
    pub text: Option<String>,

    /// Remove the memo
    #[arg(long, conflicts_with = "text")]
    pub clear: bool,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Inquiry ID
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

/// Record an inquiry taken by phone or in person
#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Customer name
    #[arg(long)]
    pub name: String,

    /// Phone number as three dash-separated parts, e.g. 010-1234-5678
    #[arg(long, value_parser = parse_phone)]
    pub phone: [String; 3],

    /// Car model the customer asked about
    #[arg(long)]
    pub car: Option<String>,

    /// Contract kind, e.g. lease or rent
    #[arg(long)]
    pub rent_type: String,

    /// Contract length in months
    #[arg(long)]
    pub months: String,

    /// Customer kind, e.g. individual or corporate
    #[arg(long)]
    pub business_type: String,
}

fn parse_phone(raw: &str) -> Result<[String; 3], String> {
    let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [a, b, c] if !a.is_empty() && !b.is_empty() && !c.is_empty() => {
            Ok([a.to_string(), b.to_string(), c.to_string()])
        }
        _ => Err(format!("expected three dash-separated parts, got '{raw}'")),
    }
}

async fn load_all<A: InquiryApi>(console: &mut Console<A>, filter: StatusFilter) -> Result<()> {
    ui::while_loading("Loading inquiries...", console.load(filter))
        .await
        .context("Failed to load inquiries")
}

pub async fn run_list(server: &ServerArgs, args: ListArgs) -> Result<()> {
    let mut console = Console::new(server.client());
    load_all(&mut console, args.status).await?;
    console.state_mut().go_to_page(args.page);

    let state = console.state();
    match args.format {
        OutputFormat::Human => print!("{}", render::list(state)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(state.current_page())?),
        OutputFormat::Quiet => {
            for inquiry in state.current_page() {
                println!("{}", inquiry.id);
            }
        }
    }
    Ok(())
}

pub async fn run_show(server: &ServerArgs, args: ShowArgs) -> Result<()> {
    let mut console = Console::new(server.client());
    load_all(&mut console, StatusFilter::All).await?;

    let inquiry = console
        .state_mut()
        .open_detail(args.id)
        .ok_or_else(|| anyhow!(ConsoleError::NotLoaded(args.id)))?;

    match args.format {
        OutputFormat::Human => print!("{}", render::detail(inquiry)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(inquiry)?),
        OutputFormat::Quiet => println!("{}", inquiry.id),
    }
    Ok(())
}

pub async fn run_status(server: &ServerArgs, args: StatusArgs) -> Result<()> {
    let mut console = Console::new(server.client());
    let applied = console
        .change_status(args.id, args.status)
        .await
        .with_context(|| format!("Failed to update inquiry {}", args.id))?;

    println!("✓ {}: #{} → {}", applied.message, args.id, args.status.label());
    if let Some(err) = applied.reload_error {
        eprintln!("✗ Failed to reload inquiries: {err}");
    }
    Ok(())
}

pub async fn run_memo(server: &ServerArgs, args: MemoArgs) -> Result<()> {
    let mut console = Console::new(server.client());
    load_all(&mut console, StatusFilter::All).await?;

    let text = if args.clear {
        String::new()
    } else {
        args.text.unwrap_or_default()
    };
    let saved = console
        .set_memo(args.id, text)
        .await
        .with_context(|| format!("Failed to save memo for inquiry {}", args.id))?;

    match saved {
        Some(memo) => println!("✓ Memo saved for #{}: {memo}", args.id),
        None => println!("✓ Memo cleared for #{}", args.id),
    }
    Ok(())
}

pub async fn run_delete(server: &ServerArgs, args: DeleteArgs) -> Result<()> {
    if !args.yes {
        let confirmed = Confirm::new(&format!(
            "Delete inquiry #{}? This cannot be undone.",
            args.id
        ))
        .with_default(false)
        .prompt()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(());
        }
    }

    let mut console = Console::new(server.client());
    let applied = console
        .delete(args.id)
        .await
        .with_context(|| format!("Failed to delete inquiry {}", args.id))?;

    match applied.reload_error {
        None => println!(
            "✓ {} (#{}, {} remaining)",
            applied.message,
            args.id,
            console.state().total()
        ),
        Some(err) => {
            println!("✓ {} (#{})", applied.message, args.id);
            eprintln!("✗ Failed to reload inquiries: {err}");
        }
    }
    Ok(())
}

pub async fn run_submit(server: &ServerArgs, args: SubmitArgs) -> Result<()> {
    let [phone1, phone2, phone3] = args.phone;
    let inquiry = NewInquiry {
        name: args.name,
        phone1,
        phone2,
        phone3,
        car_name: args.car.filter(|c| !c.trim().is_empty()),
        rent_type: args.rent_type,
        months: args.months,
        business_type: args.business_type,
    };
    if inquiry.name.trim().is_empty() {
        bail!("name must not be empty");
    }

    let message = server
        .client()
        .create(&inquiry)
        .await
        .context("Failed to submit inquiry")?;
    println!("✓ {message}");
    Ok(())
}
