//! Rigsmith CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Write the default config file
//! - `serve`     — Start the HTTP API server
//! - `optimize`  — Pick a build for a budget
//! - `check`     — Check a saved build for compatibility issues
//! - `catalog`   — Browse the component catalog
//! - `status`    — Show configuration and catalog status

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "rigsmith",
    about = "Rigsmith — PC build budget optimizer and compatibility checker",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Pick the best build for a budget
    Optimize {
        /// Total budget in dollars
        #[arg(short, long)]
        budget: f64,

        /// Usage hint: gaming, workstation or general
        #[arg(short, long, default_value = "general")]
        usage: String,

        /// Category to evaluate earlier (repeatable; the last one goes first)
        #[arg(short, long = "priority")]
        priority: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a build JSON file for compatibility issues
    Check {
        /// Path to a build file (`{"components": {...}}`)
        file: std::path::PathBuf,
    },

    /// Browse the component catalog
    Catalog {
        /// Category to list (omit to list categories)
        category: Option<String>,

        /// Minimum price
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<f64>,
    },

    /// Show configuration and catalog status
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Serve { port } => commands::serve::run(port).await?,
        Commands::Optimize {
            budget,
            usage,
            priority,
            json,
        } => commands::optimize::run(budget, &usage, &priority, json).await?,
        Commands::Check { file } => commands::check::run(&file).await?,
        Commands::Catalog {
            category,
            min_price,
            max_price,
        } => commands::catalog::run(category.as_deref(), min_price, max_price).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
