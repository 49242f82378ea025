//! Database initialization command

use anyhow::{Context, Result};
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the init command
#[derive(Parser, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Migrate and seed the database, then exit
pub async fn run_init(args: InitArgs) -> Result<()> {
    let database_url = args.database.url()?;

    let pool = bookshelf_server::initialize(database_url, args.database.max_connections)
        .await
        .context("Failed to initialize database")?;
    pool.close().await;

    println!("Database ready");
    Ok(())
}
