//! CLI administration tool for shortlink.
//!
//! Manages links directly against PostgreSQL without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List links owned by an email
//! cargo run --bin admin -- links list --email a@b.com
//!
//! # Show a single link with its counters
//! cargo run --bin admin -- links show abc123
//!
//! # Create a link (code optional)
//! cargo run --bin admin -- links create https://example.com --email a@b.com --code abc123
//!
//! # Delete a link
//! cargo run --bin admin -- links delete abc123
//!
//! # Totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `CODE_LENGTH`, `MAX_ALLOCATION_ATTEMPTS`: same meaning as for the server

use shortlink::application::services::allocation_service::DEFAULT_MAX_ATTEMPTS;
use shortlink::application::services::{AllocationService, LinkService};
use shortlink::config::parse_env;
use shortlink::domain::entities::Link;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List links owned by an email, newest first
    List {
        #[arg(short, long)]
        email: String,
    },

    /// Show a single link
    Show { code: String },

    /// Create a link
    Create {
        /// Destination URL
        url: String,

        /// Owner email
        #[arg(short, long)]
        email: String,

        /// Requested code (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a link permanently
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let links = LinkService::new(repo.clone());

    match action {
        LinkAction::List { email } => {
            let owned = links
                .list_links(&email)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
            print_link_table(&email, &owned);
        }
        LinkAction::Show { code } => {
            let link = links
                .get_link(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            print_link(&link);
        }
        LinkAction::Create { url, email, code } => {
            let generator = CodeGenerator::new(parse_env("CODE_LENGTH", DEFAULT_CODE_LENGTH))
                .context("CODE_LENGTH must be between 6 and 8")?;
            let allocation = AllocationService::new(
                repo,
                generator,
                parse_env("MAX_ALLOCATION_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
            );

            let link = allocation
                .allocate(code, url, email)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

            println!("{}", "✅ Link created".green().bold());
            println!();
            print_link(&link);
        }
        LinkAction::Delete { code, yes } => {
            delete_link(&links, code, yes).await?;
        }
    }

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation.
async fn delete_link(
    links: &LinkService<PgLinkRepository>,
    code: String,
    skip_confirm: bool,
) -> Result<()> {
    let link = links
        .get_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link);

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link? Redirects will stop immediately.")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = links
        .delete_link(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }

    Ok(())
}

fn print_link(link: &Link) {
    let last_clicked = match link.last_clicked_at {
        Some(t) if link.was_visited() => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => "never".to_string(),
    };

    println!("  Code:         {}", link.code.cyan().bold());
    println!("  URL:          {}", link.destination_url.bright_white());
    println!("  Email:        {}", link.owner_email);
    println!(
        "  Clicks:       {}",
        link.total_clicks.to_string().bright_green().bold()
    );
    println!("  Last clicked: {}", last_clicked.bright_black());
    println!(
        "  Created:      {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    println!();
}

/// Prints links as a table.
///
/// ```text
///   Code      Clicks   Created            URL
///   ──────────────────────────────────────────────────────────────
///   abc123    42       2025-01-15 10:30   https://example.com
/// ```
fn print_link_table(email: &str, links: &[Link]) {
    println!("{} {}", "📋 Links for".bright_blue().bold(), email.cyan());
    println!();

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return;
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            link.total_clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.destination_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(total_clicks), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    let owners_count: i64 = sqlx::query_scalar("SELECT COUNT(DISTINCT owner_email) FROM links")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:  {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!(
        "  Owners:  {}",
        owners_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
