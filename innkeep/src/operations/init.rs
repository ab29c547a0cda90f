//! Property initialisation: data directory, database and starter config.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};

/// Options for initialising a property.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialise.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write a commented starter `config.yaml`.
    pub create_config: bool,
}

impl InitOptions {
    /// Creates options for `data_dir` that refuse to overwrite.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether a starter config file is written.
    #[must_use]
    pub const fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }
}

/// What [`init_database`] did.
#[derive(Debug, Clone)]
pub struct InitResult {
    /// The data directory did not exist before.
    pub data_dir_created: bool,
    /// A fresh database was written.
    pub database_created: bool,
    /// A starter config file was written.
    pub config_created: bool,
    /// The initialised directory.
    pub data_dir: PathBuf,
}

const CONFIG_TEMPLATE: &str = r#"# innkeep property configuration

# Shown in listings and the tape chart header.
# property_name: "Thamalakane River Lodge"

# Cap discounted amounts at the base price (default: false).
# strict_discounts: false

# Days shown by `innkeep chart` when no end date is given (default: 14).
# chart_days: 14

# Seconds to wait for the database write lock (default: 5).
# maximum_lock_wait_seconds: 5

# Default list output: table, json, csv or tsv.
# output_format: table

# Replaces the built-in rate table as a whole. Rates are in major units.
# room_types:
#   - { category: standard, name: Kalahari, rate: 250 }
#   - { category: standard, name: Makgadikgadi, rate: 280 }
#   - { category: superior, name: Tuli, rate: 320 }
#   - { category: deluxe, name: Savuti, rate: 360 }
#   - { category: premium, name: Moremi, rate: 400 }
#   - { category: premium, name: Linyanti, rate: 450 }
#   - { category: executive, name: Okavango, rate: 550 }
#   - { category: kings, name: Chobe, rate: 750 }
"#;

/// Removes a database file together with its WAL side files.
fn remove_database(path: &Path) -> Result<()> {
    fs::remove_file(path)?;
    for suffix in ["-wal", "-shm"] {
        let mut side = path.as_os_str().to_owned();
        side.push(suffix);
        let side = PathBuf::from(side);
        if side.exists() {
            fs::remove_file(side)?;
        }
    }
    Ok(())
}

/// Creates the data directory and an empty database at the current schema.
///
/// # Errors
///
/// Returns a validation error if a database already exists and
/// `overwrite` is off, `DatabaseCorruption` if the new database fails its
/// integrity check, or an I/O or database error.
///
/// # Examples
///
/// ```no_run
/// use innkeep::operations::{init_database, InitOptions};
///
/// let result = init_database(&InitOptions::new("/tmp/lodge").with_create_config(true)).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let mut result = InitResult {
        data_dir_created: false,
        database_created: false,
        config_created: false,
        data_dir: options.data_dir.clone(),
    };

    if !options.data_dir.exists() {
        fs::create_dir_all(&options.data_dir)?;
        result.data_dir_created = true;
    }

    let db_path = options.data_dir.join(DATABASE_FILE);
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::validation(
                "database",
                format!(
                    "a database already exists at {}; use --overwrite to replace it",
                    db_path.display()
                ),
            ));
        }
        log::warn!("replacing database at {}", db_path.display());
        remove_database(&db_path)?;
    }

    let db = Database::open(DatabaseConfig::new(&db_path))?;
    db.verify_integrity()?;
    result.database_created = true;

    if options.create_config {
        let config_path = options.data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            fs::write(&config_path, CONFIG_TEMPLATE)?;
            result.config_created = true;
        }
    }

    Ok(result)
}
