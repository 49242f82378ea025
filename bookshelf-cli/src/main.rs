//! bookshelf CLI - runs the book records GraphQL server
//!
//! Subcommands:
//! - `serve`: initialize the database, then serve GraphQL over HTTP
//! - `init`: initialize the database (migrate + seed) and exit

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "GraphQL API for managing book records",
    long_about = "Serve a GraphQL API (create, read, update, soft-delete) over a PostgreSQL \
                  books table. DATABASE_URL may be set in the environment or a .env file."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the GraphQL HTTP server
    Serve(commands::serve::ServeArgs),
    /// Create the books table and seed it, then exit
    Init(commands::init::InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; DATABASE_URL may come from the real environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Init(args) => commands::run_init(args).await?,
    }
    Ok(())
}
