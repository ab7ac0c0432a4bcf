//! shopcart CLI
//!
//! Command-line front end for the shopping cart.

use clap::{Parser, Subcommand};
use log::error;
use shopcart_core::db::open_db;
use shopcart_core::{
    flush_logging, init_logging, Cart, FileAuditSink, LogAuditSink, SqliteCartStore,
};
use std::error::Error;
use std::io::{self, Write};

mod commands;
mod config;

/// File inside the log directory that keeps the audit trail between runs.
const AUDIT_FILE_NAME: &str = "audit.log";

#[derive(Debug, Parser)]
#[command(name = "shopcart", version)]
#[command(about = "Shopping cart manager backed by SQLite", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: config::ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Add an item with its price, e.g. `add Apple 1.2`
    Add(commands::cart::AddArgs),
    /// Remove every item with this name
    Remove(commands::cart::NameArgs),
    /// List all items
    List,
    /// Rename and/or reprice an item
    Update(commands::cart::UpdateArgs),
    /// Show the total price of all items
    Total,
    /// Show the number of items
    Count,
    /// Show one item by name
    Get(commands::cart::NameArgs),
    /// Reload items from the database
    Refresh,
    /// Export the cart or the audit log to a file
    Export(commands::export::ExportArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = &result {
        error!("event=cli_run module=cli status=error error={}", e);
    }
    flush_logging();

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.config.resolve()?;
    init_logging(&config.log_level, &config.log_dir)?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteCartStore::try_new(&conn)?;
    let audit = (
        LogAuditSink,
        FileAuditSink::new(config.log_dir.join(AUDIT_FILE_NAME)),
    );
    let mut cart = Cart::load(store, audit)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Add(args) => commands::cart::add(&mut cart, args, &mut out)?,
        Commands::Remove(args) => commands::cart::remove(&mut cart, args, &mut out)?,
        Commands::List => commands::cart::list(&cart, &mut out)?,
        Commands::Update(args) => commands::cart::update(&mut cart, args, &mut out)?,
        Commands::Total => commands::cart::total(&cart, &mut out)?,
        Commands::Count => commands::cart::count(&cart, &mut out)?,
        Commands::Get(args) => commands::cart::get(&cart, args, &mut out)?,
        Commands::Refresh => commands::cart::refresh(&mut cart, &mut out)?,
        Commands::Export(args) => commands::export::execute(&cart, args, &mut out)?,
    }
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["shopcart", "list", "--db", "/tmp/cart.db"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(
            cli.config.db.as_deref(),
            Some(std::path::Path::new("/tmp/cart.db"))
        );
    }

    #[test]
    fn update_price_is_validated_while_parsing() {
        let err = Cli::try_parse_from(["shopcart", "update", "Apple", "--price", "abc"])
            .unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }
}
