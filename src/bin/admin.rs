//! CLI administration tool for tiny-url.
//!
//! Manages links directly against the database, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- link create https://example.com/some/long/path
//!
//! # Shorten with a custom code
//! cargo run --bin admin -- link create https://example.com --code promo
//!
//! # List links, newest first
//! cargo run --bin admin -- link list
//!
//! # Visit count and click log
//! cargo run --bin admin -- link stats promo
//!
//! # Delete a link and its clicks
//! cargo run --bin admin -- link delete promo
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same database variables as the server (`DATABASE_URL` or `DB_*`), plus
//! `BASE_URL` for printing short URLs.

use tiny_url::application::services::LinkService;
use tiny_url::config::Config;
use tiny_url::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use tiny_url::server::connect_pool;
use tiny_url::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing tiny-url.
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

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Create a short link
    Create {
        /// Absolute URL to shorten
        url: String,

        /// Custom short code (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// List all links
    List,

    /// Show visit count and click history for a link
    Stats {
        code: String,

        /// Maximum number of clicks to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete a link and its click history
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

    let mut config = Config::from_env()?;
    if config.database_url.is_none() {
        config.database_url =
            Some(Config::load_database_url().context("Database configuration is missing")?);
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn link_service(pool: &PgPool, config: &Config) -> LinkService {
    let pool = Arc::new(pool.clone());

    LinkService::new(
        Arc::new(PgLinkRepository::new(pool.clone())),
        Arc::new(PgClickRepository::new(pool)),
        Arc::new(RandomCodeGenerator),
        config.base_url.clone(),
    )
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, config: &Config) -> Result<()> {
    let service = link_service(pool, config);

    match action {
        LinkAction::Create { url, code } => create_link(&service, url, code).await,
        LinkAction::List => list_links(&service).await,
        LinkAction::Stats { code, limit } => show_stats(&service, &code, limit).await,
        LinkAction::Delete { code, yes } => delete_link(&service, &code, yes).await,
    }
}

async fn create_link(service: &LinkService, url: String, code: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let created = service
        .create_link(Some(url), code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Code:      {}", created.link.code.cyan());
    println!("  Short URL: {}", created.short_url.bright_yellow().bold());
    println!("  Target:    {}", created.link.url.bright_white());
    println!();

    Ok(())
}

/// Lists all links, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code         Visits   Created            URL
///   ─────────────────────────────────────────────────────────────────────
///   promo        12       2025-01-15 10:30   https://example.com/sale
/// ```
async fn list_links(service: &LinkService) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<12} {:<8} {:<18} {}",
            link.code.cyan(),
            link.visits.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn show_stats(service: &LinkService, code: &str, limit: usize) -> Result<()> {
    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();

    let stats = service
        .get_stats(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!("  Code:   {}", stats.link.code.cyan());
    println!("  URL:    {}", stats.link.url.bright_white());
    println!(
        "  Visits: {}",
        stats.link.visits.to_string().bright_green().bold()
    );
    println!();

    if stats.clicks.is_empty() {
        println!("{}", "  No clicks recorded".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<20} {:<16} {:<30} {}",
        "Time".bright_white().bold(),
        "IP".bright_white().bold(),
        "Referrer".bright_white().bold(),
        "User agent".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for click in stats.clicks.iter().take(limit) {
        println!(
            "  {:<20} {:<16} {:<30} {}",
            click
                .occurred_at
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            click.ip.as_deref().unwrap_or("-"),
            click.referrer.as_deref().unwrap_or("-"),
            click.user_agent.as_deref().unwrap_or("-")
        );
    }

    if stats.clicks.len() > limit {
        println!(
            "  {}",
            format!("... {} more", stats.clicks.len() - limit).bright_black()
        );
    }
    println!();

    Ok(())
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(service: &LinkService, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to find link: {}", e))?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.url.bright_white());
    println!("  Visits: {}", link.visits.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link and its click history?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
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
            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await?;
            let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clicks")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Links:      {}",
                links_count.to_string().bright_green().bold()
            );
            println!(
                "  Clicks:     {}",
                clicks_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
