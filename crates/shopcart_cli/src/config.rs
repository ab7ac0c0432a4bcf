//! Runtime configuration: flag, then environment variable, then default.
//!
//! Defaults live under `~/.shopcart/`.

use clap::Args;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = ".shopcart";
const DB_FILE_NAME: &str = "shopping_cart.db";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// SQLite database file [default: ~/.shopcart/shopping_cart.db]
    #[arg(long, global = true, env = "SHOPCART_DB")]
    pub db: Option<PathBuf>,

    /// Directory for rolling logs and the audit trail [default: ~/.shopcart/logs]
    #[arg(long, global = true, env = "SHOPCART_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error [default: debug in debug builds, info otherwise]
    #[arg(long, global = true, env = "SHOPCART_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved settings; `log_dir` is always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl ConfigArgs {
    pub fn resolve(self) -> io::Result<Config> {
        let app_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME);

        let db_path = self.db.unwrap_or_else(|| app_dir.join(DB_FILE_NAME));
        let log_dir = absolutize(&self.log_dir.unwrap_or_else(|| app_dir.join(LOG_DIR_NAME)))?;
        let log_level = self
            .log_level
            .unwrap_or_else(|| shopcart_core::default_log_level().to_string());

        Ok(Config {
            db_path,
            log_dir,
            log_level,
        })
    }
}

fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
