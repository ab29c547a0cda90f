//! Configuration system for innkeep.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from these sources, highest first:
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`INNKEEP_*`)
//! 3. Property config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let catalog = config.rate_catalog().unwrap();
//! println!("{} room types", catalog.entries().len());
//! ```
//!
//! A property config file:
//!
//! ```yaml
//! property_name: Thamalakane River Lodge
//! strict_discounts: true
//! chart_days: 21
//! room_types:
//!   - { category: standard, name: Kalahari, rate: 250 }
//!   - { category: kings, name: Chobe, rate: "780.50" }
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_CHART_DAYS, MAX_CHART_DAYS};
pub use validator::ConfigValidator;
