//! Configuration validation.

use crate::config::schema::{Config, MAX_CHART_DAYS};
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { chart_days: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Checks every field that has a value.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first bad field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref name) = config.property_name {
            Self::validate_identifier("property_name", name)?;
        }

        // Builds (and discards) the catalog to run its checks.
        if config.room_types.is_some() {
            config.rate_catalog()?;
        }

        if let Some(days) = config.chart_days {
            if days == 0 || days > MAX_CHART_DAYS {
                return Err(Error::validation(
                    "chart_days",
                    format!("must be between 1 and {MAX_CHART_DAYS}"),
                ));
            }
        }

        if let Some(timeout) = config.maximum_lock_wait_seconds {
            if timeout == 0 {
                return Err(Error::validation(
                    "maximum_lock_wait_seconds",
                    "timeout must be greater than 0",
                ));
            }
        }

        Ok(())
    }

    fn validate_identifier(field: &str, value: &str) -> Result<()> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::validation(field, "cannot be empty or only whitespace"));
        }
        if trimmed.contains('\0') {
            return Err(Error::validation(field, "cannot contain null bytes"));
        }
        if trimmed.len() > 255 {
            return Err(Error::validation(field, "cannot exceed 255 characters"));
        }
        Ok(())
    }
}
