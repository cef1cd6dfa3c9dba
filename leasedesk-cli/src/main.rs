//! leasedesk CLI - lease/rent inquiry back-office
//!
//! This is the main entry point for the leasedesk command-line tool, which provides:
//! - The inquiry HTTP service (`serve`)
//! - One-shot inquiry commands (`list`, `show`, `status`, `memo`, `delete`, `submit`)
//! - An interactive admin console (`console`)
//! - Admin account management (`admin`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod console;
mod tracing_setup;
mod ui;

use commands::ServerArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "leasedesk",
    author,
    version,
    about = "Back-office for car lease and rental inquiries",
    long_about = "Serve the inquiry API and manage submitted inquiries: filter, page through, \
                  annotate, change status and delete."
)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// List inquiries, newest first
    List(commands::inquiries::ListArgs),
    /// Show one inquiry in full
    Show(commands::inquiries::ShowArgs),
    /// Change an inquiry's status
    Status(commands::inquiries::StatusArgs),
    /// Set or clear an inquiry's memo
    Memo(commands::inquiries::MemoArgs),
    /// Delete an inquiry
    Delete(commands::inquiries::DeleteArgs),
    /// Record an inquiry taken by phone or in person
    Submit(commands::inquiries::SubmitArgs),
    /// Browse and manage inquiries interactively
    Console,
    /// Admin account operations (login, change-password, init)
    Admin(commands::admin::AdminArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The server logs request traffic; client commands only surface warnings
    let default_level = match cli.command {
        Commands::Serve(_) => None,
        _ => Some("warn"),
    };
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        default_level,
    })?;
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::List(args) => commands::inquiries::run_list(&cli.server, args).await?,
        Commands::Show(args) => commands::inquiries::run_show(&cli.server, args).await?,
        Commands::Status(args) => commands::inquiries::run_status(&cli.server, args).await?,
        Commands::Memo(args) => commands::inquiries::run_memo(&cli.server, args).await?,
        Commands::Delete(args) => commands::inquiries::run_delete(&cli.server, args).await?,
        Commands::Submit(args) => commands::inquiries::run_submit(&cli.server, args).await?,
        Commands::Console => commands::console::run_console(&cli.server).await?,
        Commands::Admin(args) => commands::admin::run_admin(&cli.server, args).await?,
    }

    Ok(())
}
