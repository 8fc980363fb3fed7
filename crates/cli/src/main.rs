//! KRIXO CLI - review service orders and worker applications from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List service orders
//! krixo commands list
//!
//! # Approve a service order
//! krixo commands approve cmd-001
//!
//! # Approve a worker application with an initial password
//! krixo workers approve worker-001 --password 'initial-password'
//!
//! # See what a login resolves to
//! krixo login -u admin -p password
//! ```
//!
//! # Commands
//!
//! - `commands` - List and decide service orders
//! - `workers` - List and decide worker applications
//! - `login` - Check credentials against the login gate

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use krixo_core::Decision;
use secrecy::SecretString;

mod commands;

#[derive(Parser)]
#[command(name = "krixo")]
#[command(author, version, about = "KRIXO admin review tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Review service orders
    #[command(name = "commands")]
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Review worker applications
    Workers {
        #[command(subcommand)]
        action: WorkerAction,
    },
    /// Check a username/password pair
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List service orders
    List,
    /// Approve a pending order
    Approve { id: String },
    /// Reject a pending order
    Reject { id: String },
}

#[derive(Subcommand)]
enum WorkerAction {
    /// List worker applications
    List,
    /// Approve a pending application
    Approve {
        id: String,

        /// Initial password for the worker account
        #[arg(short, long)]
        password: String,
    },
    /// Reject a pending application
    Reject { id: String },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
        Commands::Orders { action } => match action {
            OrderAction::List => commands::orders::list().await?,
            OrderAction::Approve { id } => {
                commands::orders::decide(&id, Decision::Approve).await?;
            }
            OrderAction::Reject { id } => commands::orders::decide(&id, Decision::Reject).await?,
        },
        Commands::Workers { action } => match action {
            WorkerAction::List => commands::workers::list().await?,
            WorkerAction::Approve { id, password } => {
                commands::workers::decide(&id, Decision::Approve, Some(SecretString::from(password)))
                    .await?;
            }
            WorkerAction::Reject { id } => {
                commands::workers::decide(&id, Decision::Reject, None).await?;
            }
        },
        Commands::Login { username, password } => {
            commands::login::check(&username, &SecretString::from(password))?;
        }
    }
    Ok(())
}
