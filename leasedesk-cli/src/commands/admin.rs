//! Admin account commands: login check, password rotation and seeding.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use inquire::Password;
use leasedesk_server::auth::hash_password;
use leasedesk_server::db::AdminRepo;
use leasedesk_server::{create_pool, migrations};

use super::ServerArgs;

#[derive(Parser, Debug)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Check the admin password against the server
    Login,
    /// Change the admin password on the server
    ChangePassword,
    /// Create or reset the admin account directly in the database
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Database URL, e.g. sqlite://leasedesk.db
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Password to set (prompted when omitted)
    #[arg(long, env = "LEASEDESK_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn run_admin(server: &ServerArgs, args: AdminArgs) -> Result<()> {
    match args.command {
        AdminCommand::Login => run_login(server).await,
        AdminCommand::ChangePassword => run_change_password(server).await,
        AdminCommand::Init(args) => run_init(args).await,
    }
}

async fn run_login(server: &ServerArgs) -> Result<()> {
    let password = Password::new("Admin password:")
        .without_confirmation()
        .prompt()?;

    let message = server
        .client()
        .login(&password)
        .await
        .context("Login failed")?;
    println!("✓ {message}");
    Ok(())
}

async fn run_change_password(server: &ServerArgs) -> Result<()> {
    let current = Password::new("Current password:")
        .without_confirmation()
        .prompt()?;
    let new = Password::new("New password:")
        .with_custom_confirmation_message("Confirm new password:")
        .prompt()?;
    if new.is_empty() {
        bail!("new password must not be empty");
    }

    let message = server
        .client()
        .change_password(&current, &new)
        .await
        .context("Password change failed")?;
    println!("✓ {message}");
    Ok(())
}

async fn run_init(args: InitArgs) -> Result<()> {
    let password = match args.password {
        Some(password) => password,
        None => Password::new("Admin password:")
            .with_custom_confirmation_message("Confirm password:")
            .prompt()?,
    };
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let pool = create_pool(&args.database_url)
        .await
        .context("Failed to create database pool")?;
    migrations::run(&pool)
        .await
        .context("Failed to prepare schema")?;

    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("Password hashing task failed")??;
    AdminRepo::new(&pool)
        .seed(&hash)
        .await
        .context("Failed to store admin password")?;

    tracing::info!("admin account initialized");
    println!("✓ Admin account initialized");
    Ok(())
}
