//! Reservo CLI - Room reservation management
//!
//! Thin client over the Reservo HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use dialoguer::Password;

use api::{ReservationRequest, ReservationResponse, ReservoClient, SearchQuery};
use config::Config;

#[derive(Parser)]
#[command(name = "reservo")]
#[command(about = "Reservo CLI - Room reservation management", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// Server URL (defaults to the configured one)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Show a reservation
    Get {
        /// Reservation ID
        id: i64,
    },

    /// Search reservations
    Search {
        /// Only this room
        #[arg(short, long)]
        room: Option<i64>,
        /// Only this user
        #[arg(short, long)]
        user: Option<i64>,
        /// Page size
        #[arg(long)]
        page_size: Option<i64>,
        /// Zero-based page number
        #[arg(long)]
        page: Option<i64>,
    },

    /// Request a reservation (created as PENDING)
    Create {
        #[command(flatten)]
        booking: BookingArgs,
    },

    /// Change the dates of a pending reservation
    Update {
        /// Reservation ID
        id: i64,
        #[command(flatten)]
        booking: BookingArgs,
    },

    /// Approve a pending reservation
    Approve {
        /// Reservation ID
        id: i64,
    },

    /// Cancel a pending reservation
    Cancel {
        /// Reservation ID
        id: i64,
    },
}

#[derive(clap::Args)]
struct BookingArgs {
    /// User ID
    #[arg(short, long)]
    user: i64,
    /// Room ID
    #[arg(short, long)]
    room: i64,
    /// First night (YYYY-MM-DD)
    #[arg(short, long)]
    start: NaiveDate,
    /// Check-out day (YYYY-MM-DD), exclusive
    #[arg(short, long)]
    end: NaiveDate,
}

impl From<BookingArgs> for ReservationRequest {
    fn from(args: BookingArgs) -> Self {
        Self {
            user_id: args.user,
            room_id: args.room,
            start_date: args.start,
            end_date: args.end,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Config => cmd_config(),
        Commands::Get { id } => cmd_get(id).await,
        Commands::Search {
            room,
            user,
            page_size,
            page,
        } => {
            let query = SearchQuery {
                room_id: room,
                user_id: user,
                page_size,
                page_number: page,
            };
            cmd_search(query).await
        }
        Commands::Create { booking } => cmd_create(booking).await,
        Commands::Update { id, booking } => cmd_update(id, booking).await,
        Commands::Approve { id } => cmd_approve(id).await,
        Commands::Cancel { id } => cmd_cancel(id).await,
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = url {
        config.set_base_url(url);
    }

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection
    let client = ReservoClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Reservo API at {}", config.base_url);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);
    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Config file: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() {
            "configured".green()
        } else {
            "not set".red()
        }
    );

    Ok(())
}

fn client() -> Result<ReservoClient> {
    let config = Config::load()?;
    Ok(ReservoClient::new(&config.base_url, config.api_key.as_deref()))
}

async fn cmd_get(id: i64) -> Result<()> {
    let rsvp = client()?.get(id).await?;
    print_reservation(&rsvp);
    Ok(())
}

async fn cmd_search(query: SearchQuery) -> Result<()> {
    let reservations = client()?.search(&query).await?;

    if reservations.is_empty() {
        println!("No reservations found.");
        return Ok(());
    }

    println!("{}", "Reservations:".bold());
    for rsvp in &reservations {
        print_reservation(rsvp);
    }
    Ok(())
}

async fn cmd_create(booking: BookingArgs) -> Result<()> {
    let rsvp = client()?.create(&booking.into()).await?;
    println!("{} Reservation {} requested", "✓".green(), rsvp.id);
    print_reservation(&rsvp);
    Ok(())
}

async fn cmd_update(id: i64, booking: BookingArgs) -> Result<()> {
    let rsvp = client()?.update(id, &booking.into()).await?;
    println!("{} Reservation {} updated", "✓".green(), rsvp.id);
    print_reservation(&rsvp);
    Ok(())
}

async fn cmd_approve(id: i64) -> Result<()> {
    let rsvp = client()?.approve(id).await?;
    println!("{} Reservation {} approved", "✓".green(), rsvp.id);
    Ok(())
}

async fn cmd_cancel(id: i64) -> Result<()> {
    client()?.cancel(id).await?;
    println!("{} Reservation {} cancelled", "✓".green(), id);
    Ok(())
}

fn status_badge(status: &str) -> ColoredString {
    match status {
        "APPROVED" => status.green(),
        "PENDING" => status.yellow(),
        _ => status.dimmed(),
    }
}

fn print_reservation(rsvp: &ReservationResponse) {
    println!(
        "  {} room {} user {} {} → {} [{}]",
        format!("#{}", rsvp.id).cyan().bold(),
        rsvp.room_id,
        rsvp.user_id,
        rsvp.start_date,
        rsvp.end_date,
        status_badge(&rsvp.status)
    );
}
