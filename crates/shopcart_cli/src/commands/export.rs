//! Export commands.
//!
//! Usage: shopcart export <list|cart|logs> <FILE>
//!
//! Export failures are logged and reported on stdout; the process still
//! exits successfully.

use super::CommandResult;
use clap::{Args, Subcommand};
use shopcart_core::{AuditSink, Cart, CartStore};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Plain-text shopping list, one `<item>, <price>` line per item
    List { file: PathBuf },
    /// JSON array of `{id, item, price}` objects
    Cart { file: PathBuf },
    /// Audit trail of cart changes
    Logs { file: PathBuf },
}

pub fn execute<S: CartStore, A: AuditSink>(
    cart: &Cart<S, A>,
    args: ExportArgs,
    out: &mut impl Write,
) -> CommandResult {
    match args.command {
        ExportCommand::List { file } => {
            if cart.export_shopping_list(&file) {
                writeln!(out, "Shopping list exported to {}.", file.display())?;
            } else {
                writeln!(out, "Failed to export shopping list to {}.", file.display())?;
            }
        }
        ExportCommand::Cart { file } => {
            if cart.export_json(&file) {
                writeln!(out, "Shopping cart exported to {}", file.display())?;
            } else {
                writeln!(out, "Failed to export shopping cart to {}.", file.display())?;
            }
        }
        ExportCommand::Logs { file } => {
            if cart.export_audit_log(&file) {
                writeln!(out, "Logs exported to {}", file.display())?;
            } else {
                writeln!(out, "Failed to export logs to {}.", file.display())?;
            }
        }
    }
    Ok(())
}
