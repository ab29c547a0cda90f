//! Configuration schema definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{RateCatalog, RoomTypeRate};
use crate::error::Result;

/// Days shown by a tape chart when no length is given.
pub const DEFAULT_CHART_DAYS: u32 = 14;

/// Longest tape chart accepted.
pub const MAX_CHART_DAYS: u32 = 366;

/// Seconds to wait for the write lock when not configured.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// Every field is optional so that sources can be layered; accessors supply
/// the defaults.
///
/// # Examples
///
/// ```
/// use innkeep::config::Config;
///
/// let config: Config = serde_yaml::from_str("strict_discounts: true\nchart_days: 7\n").unwrap();
/// assert!(config.strict_discounts());
/// assert_eq!(config.chart_days(), 7);
/// assert_eq!(Config::default().chart_days(), 14);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Display name of the property.
    pub property_name: Option<String>,

    /// Replacement rate table.
    pub room_types: Option<Vec<RoomTypeRate>>,

    /// Cap discounted amounts at the base price.
    pub strict_discounts: Option<bool>,

    /// Default tape chart length in days.
    pub chart_days: Option<u32>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Refuse to create the database implicitly.
    pub disable_autoinit: Option<bool>,

    /// Output format for list commands.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Builds the rate catalog, falling back to the built-in table.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configured table is unusable.
    pub fn rate_catalog(&self) -> Result<RateCatalog> {
        match &self.room_types {
            Some(entries) => RateCatalog::new(entries.clone()),
            None => Ok(RateCatalog::default()),
        }
    }

    /// Whether discounts are capped at the base price.
    #[must_use]
    pub fn strict_discounts(&self) -> bool {
        self.strict_discounts.unwrap_or(false)
    }

    /// Default tape chart length.
    #[must_use]
    pub fn chart_days(&self) -> u32 {
        self.chart_days.unwrap_or(DEFAULT_CHART_DAYS)
    }

    /// How long to wait for a competing writer.
    #[must_use]
    pub fn lock_wait(&self) -> Duration {
        Duration::from_secs(
            self.maximum_lock_wait_seconds
                .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS),
        )
    }

    /// Whether implicit database creation is disabled.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }
}

/// Output format for list commands.
///
/// ```
/// use innkeep::config::OutputFormat;
///
/// assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
/// assert_eq!(OutputFormat::Tsv.to_string(), "tsv");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output format.
    Json,
    /// CSV output format.
    Csv,
    /// TSV output format.
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            other => Err(format!(
                "unknown output format '{other}' (expected table, json, csv or tsv)"
            )),
        }
    }
}
