//! Subgate CLI - open the gated web app from a terminal.

mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use subgate::prelude::ViewKey;
use tracing::Level;

use crate::commands::IdentityArgs;
use crate::config::Config;

#[derive(Parser)]
#[command(name = "subgate")]
#[command(
    author,
    version,
    about = "Subgate - subscription-gated web app client",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Host launch context as JSON, e.g. '{"user": {"id": 42, "username": "alice"}}'
    #[arg(long, global = true, env = "SUBGATE_INIT_DATA")]
    init_data: Option<String>,

    /// User id, when no launch context is given
    #[arg(long, global = true)]
    user_id: Option<i64>,

    /// User handle, when no launch context is given
    #[arg(long, global = true)]
    username: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default subgate.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Check that the backend is reachable
    Ping,

    /// Run the subscription gate and print the decision
    Check {
        /// Print the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the app: gate, load views, then navigate interactively
    Open {
        /// View to show first (tasks, profile, news)
        #[arg(long)]
        view: Option<ViewKey>,

        /// Print every view and exit instead of reading commands
        #[arg(long)]
        once: bool,

        /// Print the page as JSON and exit
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let identity = IdentityArgs {
        init_data: cli.init_data,
        user_id: cli.user_id,
        username: cli.username,
    };

    let ok = match cli.command {
        Commands::Init { path } => {
            commands::init::run(path)?;
            true
        }
        Commands::Ping => commands::ping::run(&Config::load()?).await?,
        Commands::Check { json } => commands::check::run(&Config::load()?, &identity, json).await?,
        Commands::Open { view, once, json } => {
            commands::open::run(&Config::load()?, &identity, view, once, json).await?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
