//! CLI administration tool for url-shortener.
//!
//! Performs store maintenance and link operations without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten "https://example.com/a?b=1"
//!
//! # Show a record with its click count
//! cargo run --bin admin -- show aB3xY9
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `BASE_URL`,
//! `STORAGE_TIMEOUT_SECS`, `CODE_MAX_ATTEMPTS`.

use url_shortener::application::services::{RedirectService, ShortenService};
use url_shortener::config::{self, Config};
use url_shortener::domain::repositories::ShortUrlRepository;
use url_shortener::error::AppError;
use url_shortener::server::{Store, connect_store, open_store};
use url_shortener::utils::code_generator::RandomCodeGenerator;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing url-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Shorten a URL (returns the existing code if already stored)
    Shorten {
        /// The long URL to shorten
        url: String,
    },

    /// Show the record behind a short code
    Show {
        /// Short code to look up
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    // Database commands manage the schema themselves.
    let store = match cli.command {
        Commands::Db { .. } => connect_store(&config).await?,
        _ => open_store(&config).await?,
    };

    let outcome = match cli.command {
        Commands::Db { action } => handle_db_action(action, &store).await,
        Commands::Shorten { url } => handle_shorten(&config, &store, &url).await,
        Commands::Show { code } => handle_show(&store, &code).await,
    };

    store.close().await;
    outcome
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, store: &Store) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());
            store
                .repository()
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "📦 Applying migrations...".bright_blue());
            let applied = store.migrate().await?;
            if applied == 0 {
                println!("{}", "✅ Migrations are up to date".green().bold());
            } else {
                println!(
                    "{}",
                    format!("✅ Applied {applied} migration(s)").green().bold()
                );
            }
        }
    }

    Ok(())
}

/// Shortens a URL and prints the resulting short link.
async fn handle_shorten(config: &Config, store: &Store, url: &str) -> Result<()> {
    let service = ShortenService::with_generator(
        store.repository(),
        Arc::new(RandomCodeGenerator),
        config.code_max_attempts,
    );

    match service.shorten(url).await {
        Ok(record) => {
            println!("{}", "✂️  Short URL".bright_blue().bold());
            println!();
            println!("  Code:     {}", record.short_code.bright_yellow().bold());
            println!("  Long URL: {}", record.long_url.cyan());
            if let Some(ref base_url) = config.base_url {
                println!(
                    "  Link:     {}",
                    ShortenService::short_url(base_url, &record.short_code).bright_white()
                );
            }
            println!();
            Ok(())
        }
        Err(AppError::InvalidUrl) => {
            println!("{}", format!("❌ Invalid URL: {url}").red());
            anyhow::bail!("invalid URL")
        }
        Err(e) => Err(e.into()),
    }
}

/// Prints a record without counting a click.
async fn handle_show(store: &Store, code: &str) -> Result<()> {
    let service = RedirectService::new(store.repository());

    match service.lookup(code).await {
        Ok(record) => {
            println!("{}", "🔗 Short URL record".bright_blue().bold());
            println!();
            println!("  ID:       {}", record.id.to_string().bright_black());
            println!("  Code:     {}", record.short_code.bright_yellow().bold());
            println!("  Long URL: {}", record.long_url.cyan());
            println!("  Clicks:   {}", record.clicks.to_string().bright_white());
            println!(
                "  Created:  {}",
                record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!();
            Ok(())
        }
        Err(AppError::NotFound) => {
            println!("{}", format!("⚠️  No record for code '{code}'").yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
