//! CLI administration tool for link-shortener.
//!
//! Issues and inspects short links and checks the database directly, without
//! going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts for the URL when omitted)
//! cargo run --bin admin -- link shorten https://example.com/page?x=1
//! cargo run --bin admin -- link shorten --owner user_2a9 --ttl 3600
//!
//! # Show a link without counting a click
//! cargo run --bin admin -- link show k3x9ab
//!
//! # Statistics and database checks
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `BASE_URL`, `SHORT_CODE_*`, `MAX_*` - same meaning as for the server
//!
//! Pending schema migrations are applied on connect, so the tool works
//! against a fresh database.

use link_shortener::config::{self, Config};
use link_shortener::domain::entities::Link;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use link_shortener::server::{build_link_service, connect_pool, run_migrations};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing link-shortener.
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
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
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
    /// Issue a new short link
    Shorten {
        /// Target URL (prompted for if omitted)
        url: Option<String>,

        /// Owner identifier stored with the link
        #[arg(short, long)]
        owner: Option<String>,

        /// Lifetime in seconds
        #[arg(short, long)]
        ttl: Option<i64>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a link's metadata (does not count as a click)
    Show {
        /// Short code
        code: String,
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

    let config = config::load_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    let pool = connect_pool(&config, &database_url).await?;
    run_migrations(&pool).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link commands through the same service the server uses.
async fn handle_link_action(action: LinkAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let service = build_link_service(config, repository)?;

    match action {
        LinkAction::Shorten {
            url,
            owner,
            ttl,
            yes,
        } => {
            println!("{}", "🔗 Shorten URL".bright_blue().bold());
            println!();

            let url = match url {
                Some(u) => u,
                None => Input::<String>::new()
                    .with_prompt("Target URL")
                    .with_initial_text("https://")
                    .interact_text()?,
            };

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Create short link for {}?", url))
                    .default(true)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let result = service
                .shorten(url, owner, ttl)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

            println!();
            println!("{}", "✅ Short link created!".green().bold());
            println!();
            println!("  Short URL: {}", result.short_url.bright_yellow().bold());
            print_link(&result.link);
        }
        LinkAction::Show { code } => {
            let link = service
                .get_link(&code)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;

            println!("{}", "🔎 Short link".bright_blue().bold());
            println!();
            println!("  Short URL: {}", service.short_url(&link.code).bright_yellow());
            print_link(&link);
        }
    }

    Ok(())
}

/// Prints link metadata in aligned columns.
fn print_link(link: &Link) {
    let status = if link.is_expired() {
        "EXPIRED".red()
    } else {
        "ACTIVE".green()
    };

    println!("  Code:      {}", link.code.cyan());
    println!("  Target:    {}", link.target_url.bright_white());
    println!(
        "  Owner:     {}",
        link.owner_id.as_deref().unwrap_or("-").bright_black()
    );
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .bright_black()
    );
    match link.expires_at() {
        Some(expires_at) => println!(
            "  Expires:   {}",
            expires_at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        ),
        None => println!("  Expires:   {}", "never".bright_black()),
    }
    println!("  Clicks:    {}", link.click_count.to_string().bright_green());
    println!("  Status:    {}", status);
    println!();
}

/// Displays link and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let (links_count, clicks_count): (i64, i64) =
        sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:  {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        clicks_count.to_string().bright_green().bold()
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
