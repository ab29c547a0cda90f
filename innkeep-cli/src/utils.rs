//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, database management and result
//! reporting.

use crate::error::CliError;
use innkeep::database::{resolve_data_dir, DATABASE_FILE};
use innkeep::{
    Config, ConfigBuilder, Database, DatabaseConfig, ExecutionResult, FrontDesk, RoomId,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// The data directory: `--data-dir`, then `INNKEEP_DATA_DIR`, then `~/.innkeep`.
pub fn data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(expand_home(dir)),
        None => resolve_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `<data_dir>/config.yaml`
/// 3. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .with_data_dir(data_dir(global)?)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is
/// disabled by flag or configuration.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = data_dir(global)?.join(DATABASE_FILE);

    if !db_path.exists() && (global.disable_autoinit || config.autoinit_disabled()) {
        return Err(CliError::NoDataDirectory);
    }

    let timeout = match global.busy_timeout {
        Some(seconds) => Duration::from_secs(seconds.into()),
        None => config.lock_wait(),
    };
    log::debug!(
        "opening {} (busy timeout {}s)",
        db_path.display(),
        timeout.as_secs()
    );

    Database::open(DatabaseConfig::new(db_path).with_busy_timeout(timeout)).map_err(CliError::from)
}

/// Opens the desk over the configured database.
pub fn open_desk(global: &GlobalOptions, dry_run: bool) -> Result<(Config, FrontDesk), CliError> {
    let config = load_configuration(global)?;
    let db = open_database(global, &config)?;
    let desk = FrontDesk::new(db, &config)
        .map_err(|e| CliError::Config(e.to_string()))?
        .dry_run(dry_run);
    Ok((config, desk))
}

/// Looks up a live room by its number.
pub fn room_id(desk: &FrontDesk, number: &str) -> Result<RoomId, CliError> {
    Ok(desk.room_by_number(number)?.id)
}

/// Prints the dry-run action list and any plan warnings to stderr.
pub fn report(result: &ExecutionResult, global: &GlobalOptions) {
    if global.quiet {
        return;
    }

    if result.dry_run {
        eprintln!("Dry run - would perform the following actions:");
        for (i, action) in result.actions_taken.iter().enumerate() {
            eprintln!("  {}. {}", i + 1, action);
        }
    } else if global.verbose {
        for action in &result.actions_taken {
            eprintln!("  - {action}");
        }
    }

    for warning in &result.warnings {
        eprintln!("Warning: {warning}");
    }
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}
