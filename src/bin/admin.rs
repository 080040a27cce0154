//! CLI administration tool for keyhop.
//!
//! Works directly against the configured storage tiers, without going
//! through the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List every key across seed, memory and Redis
//! cargo run --bin admin -- keys
//!
//! # Resolve a key and show which tier answered
//! cargo run --bin admin -- get k3x9a0
//!
//! # Create short links
//! cargo run --bin admin -- shorten example.com https://example.org --password abc
//!
//! # Check the remote store
//! cargo run --bin admin -- check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (`REDIS_URL`, `SEED_FILE`, ...). Without a remote store
//! the tool only sees the seed table, and created links live only as long as
//! the process.

use keyhop::application::services::{KeyGenerator, ShortenService, Tier};
use keyhop::config::{self, Config};
use keyhop::domain::short_key::ShortKey;
use keyhop::server::build_cache;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing keyhop links.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all keys known to any tier
    Keys {
        /// Only show password-protected keys
        #[arg(short, long)]
        secure: bool,
    },

    /// Look up a key
    Get {
        /// Full storage key (use `key$password` for protected links)
        key: String,
    },

    /// Create short links
    Shorten {
        /// Destination URLs
        #[arg(required = true)]
        urls: Vec<String>,

        /// Protect the links with a password
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check the remote store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Keys { secure } => list_keys(&config, secure).await?,
        Commands::Get { key } => get_key(&config, &key).await?,
        Commands::Shorten { urls, password } => shorten(&config, &urls, password).await?,
        Commands::Check => check(&config).await?,
    }

    Ok(())
}

/// Prints every key. Protected keys show their bare token and a lock.
async fn list_keys(config: &Config, secure_only: bool) -> Result<()> {
    let cache = build_cache(config)?;
    let keys = cache.keys().await;

    println!("{}", "🔗 Keys".bright_blue().bold());
    println!();

    let mut shown = 0;
    for key in &keys {
        let parsed = ShortKey::parse(key);
        if secure_only && !parsed.is_secure() {
            continue;
        }

        if parsed.is_secure() {
            println!("  {} {}", parsed.bare().bright_white(), "🔒".yellow());
        } else {
            println!("  {}", parsed.bare().bright_white());
        }
        shown += 1;
    }

    println!();
    println!("{} {}", "Total:".bright_black(), shown.to_string().bold());

    Ok(())
}

async fn get_key(config: &Config, key: &str) -> Result<()> {
    let cache = build_cache(config)?;

    match cache.get_with_tier(key).await {
        Some((url, tier)) => {
            let tier = match tier {
                Tier::Memory => "memory",
                Tier::StaticSeed => "seed",
                Tier::Remote => "remote",
            };
            println!("{} {} {}", key.bright_white(), "→".bright_black(), url.green());
            println!("{} {}", "Tier:".bright_black(), tier);
        }
        None => {
            println!("{} {}", "❌ Not found:".red(), key);
        }
    }

    Ok(())
}

async fn shorten(config: &Config, urls: &[String], password: Option<String>) -> Result<()> {
    if !config.is_remote_enabled() {
        println!(
            "{}",
            "⚠️  No remote store configured; links will be lost when this command exits".yellow()
        );
    }

    let cache = build_cache(config)?;
    let generator = Arc::new(KeyGenerator::new(cache.clone(), config.keygen_batch_size));
    let service = ShortenService::new(cache, generator);

    let links = service
        .shorten(&urls.join("\n"), password.as_deref())
        .await?;

    for link in links {
        println!(
            "{} {} {}",
            link.key.bright_white().bold(),
            "→".bright_black(),
            link.url
        );
    }

    Ok(())
}

async fn check(config: &Config) -> Result<()> {
    let cache = build_cache(config)?;

    if !cache.remote_enabled() {
        println!("{}", "ℹ️  Remote store disabled".bright_black());
        return Ok(());
    }

    if cache.remote_health().await {
        println!("{}", "✓ Remote store reachable".green());
        Ok(())
    } else {
        println!("{}", "✗ Remote store unreachable".red());
        anyhow::bail!("Remote store health check failed")
    }
}
