//! Velvet Loom CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront (shop schema) migrations
//! vl-cli migrate storefront
//!
//! # Run admin schema migrations
//! vl-cli migrate admin
//!
//! # Run all migrations
//! vl-cli migrate all
//!
//! # Create an admin user (subject comes from the identity provider)
//! vl-cli admin create -s idp_8Xp2kQ -e ops@velvetloom.in -n "Ops Admin" -r super_admin
//!
//! # Seed sample catalog and homepage sections for development
//! vl-cli seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vl-cli")]
#[command(author, version, about = "Velvet Loom CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        target: MigrateTarget,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed sample catalog and content for development
    Seed,
}

#[derive(Subcommand)]
enum MigrateTarget {
    /// Run storefront (shop schema) migrations
    Storefront,
    /// Run admin schema migrations
    Admin,
    /// Run all migrations
    All,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Identity provider subject for the admin
        #[arg(short, long)]
        subject: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Admin role (`super_admin`, `admin`, `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate { target } => match target {
            MigrateTarget::Storefront => commands::migrate::storefront().await?,
            MigrateTarget::Admin => commands::migrate::admin().await?,
            MigrateTarget::All => {
                commands::migrate::storefront().await?;
                commands::migrate::admin().await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                subject,
                email,
                name,
                role,
            } => {
                commands::admin::create_user(&subject, &email, &name, &role).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
