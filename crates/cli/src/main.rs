//! Folio CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Create the config directory and a default config
//! - `serve`    — Start the HTTP chat gateway
//! - `ask`      — Ask the assistant from the terminal
//! - `profile`  — Print the active knowledge base
//! - `status`   — Show configuration status
//! - `config`   — Validate, show, or locate the config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio — portfolio chat assistant",
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
    /// Initialize configuration
    Init,

    /// Start the HTTP chat gateway
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,

        /// Reply immediately instead of simulating model latency
        #[arg(long)]
        no_delay: bool,
    },

    /// Ask the assistant a question
    Ask {
        /// Send a single message instead of reading from stdin
        #[arg(short, long)]
        message: Option<String>,

        /// Print the raw reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the active knowledge base
    Profile {
        /// Emit TOML instead of JSON (usable as a knowledge_path file)
        #[arg(long)]
        toml: bool,
    },

    /// Show configuration status
    Status,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate the config file
    Validate,
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
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
        Commands::Serve { port, no_delay } => commands::serve::run(port, no_delay).await?,
        Commands::Ask { message, json } => commands::ask::run(message, json).await?,
        Commands::Profile { toml } => commands::profile::run(toml).await?,
        Commands::Status => commands::status::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
        },
    }

    Ok(())
}
