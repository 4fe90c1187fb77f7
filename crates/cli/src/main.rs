//! InboxPilot CLI — the main entry point.
//!
//! Commands:
//! - `gateway` — Start the HTTP agent service
//! - `skills`  — List registered skill names
//! - `respond` — Run one request through the runtime in-process

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "inboxpilot",
    about = "InboxPilot — skill-routed assistant platform",
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
    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List registered skills
    Skills,

    /// Send a single message to a skill and print the JSON response
    Respond {
        /// Skill to route to (e.g. "auth", "inbox")
        #[arg(short, long, default_value = "auth")]
        skill: String,

        /// The user message
        #[arg(short, long)]
        message: String,
    },
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
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Skills => commands::skills::run()?,
        Commands::Respond { skill, message } => commands::respond::run(&skill, &message)?,
    }

    Ok(())
}
