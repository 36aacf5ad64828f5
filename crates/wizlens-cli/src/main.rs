//! Wizlens CLI - MoneyWiz snapshot analytics
//!
//! Usage:
//!   wizlens serve                 Run the MCP server on stdio (default)
//!   wizlens accounts              List accounts with balances
//!   wizlens trends --kind income  Income by month
//!   wizlens savings --months 12   Savings recommendations

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    // Logs go to stderr; stdout carries the MCP protocol when serving
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();

    let db_path = cli.db.as_deref();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::cmd_serve(db_path).await,
        Commands::Accounts => {
            let db = commands::open_db(db_path)?;
            commands::cmd_accounts(&db, cli.json)
        }
        Commands::Balance { account_id } => {
            let db = commands::open_db(db_path)?;
            commands::cmd_balance(&db, account_id, cli.json)
        }
        Commands::Transactions { account, limit } => {
            let db = commands::open_db(db_path)?;
            commands::cmd_transactions(&db, account, limit, cli.json)
        }
        Commands::Categories => {
            let db = commands::open_db(db_path)?;
            commands::cmd_categories(&db, cli.json)
        }
        Commands::Trends {
            kind,
            group_by,
            months,
        } => {
            let db = commands::open_db(db_path)?;
            commands::cmd_trends(&db, &kind, &group_by, months, cli.json)
        }
        Commands::Savings { months } => {
            let db = commands::open_db(db_path)?;
            commands::cmd_savings(&db, months, cli.json)
        }
        Commands::NetWorth => {
            let db = commands::open_db(db_path)?;
            commands::cmd_net_worth(&db, cli.json)
        }
        Commands::Stats => {
            let db = commands::open_db(db_path)?;
            commands::cmd_stats(&db, cli.json)
        }
    }
}
