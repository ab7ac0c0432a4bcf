//! Subcommand implementations. Each writes its user-facing output to `out`.

pub mod cart;
pub mod export;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;
