//! Development tasks for the monster AI
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Decide, Field};

/// Development tasks for the monster AI
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for the monster AI", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to the platform log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Decide one or more ticks over a recorded snapshot
    Decide(Decide),

    /// Dump a monster's distance and visibility field
    Field(Field),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (RUST_LOG, DUNGEON_AI_LOG_DIR)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_file)?;

    match cli.command {
        Command::Decide(cmd) => cmd.execute().await,
        Command::Field(cmd) => cmd.execute(),
    }
}
