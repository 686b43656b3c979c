//! # Application Configuration
//!
//! Resolved once at startup, read-only afterwards.
//!
//! ## Database Path (Priority Order)
//! 1. `--db <PATH>` flag
//! 2. `MASA_DB_PATH` environment variable
//! 3. `customers.db` in the working directory

use masa_db::DbConfig;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment override for the database file.
pub const DB_PATH_ENV: &str = "MASA_DB_PATH";

/// Same file name the counter has always used.
pub const DEFAULT_DB_PATH: &str = "customers.db";

/// Quiet by default so log lines don't land in the middle of a prompt.
const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "info,masa_db=debug,sqlx=warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub verbose: bool,
}

impl AppConfig {
    /// Resolves the configuration from the flag and the process environment.
    pub fn from_env(db_flag: Option<PathBuf>, verbose: bool) -> Self {
        AppConfig::resolve(db_flag, std::env::var_os(DB_PATH_ENV), verbose)
    }

    fn resolve(db_flag: Option<PathBuf>, db_env: Option<OsString>, verbose: bool) -> Self {
        let db_path = db_flag
            .or_else(|| db_env.filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        AppConfig { db_path, verbose }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path)
    }

    /// Used when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_FILTER
        } else {
            DEFAULT_LOG_FILTER
        }
    }
}
