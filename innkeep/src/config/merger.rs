//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger};
///
/// let low = Config { chart_days: Some(7), strict_discounts: Some(true), ..Default::default() };
/// let high = Config { chart_days: Some(21), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.chart_days, Some(21));
/// assert_eq!(result.strict_discounts, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merges `source` over `target`: every field set in `source` wins.
    ///
    /// The rate table is replaced as a whole, never combined entry by entry.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.property_name.is_some() {
            target.property_name.clone_from(&source.property_name);
        }

        if source.room_types.is_some() {
            target.room_types.clone_from(&source.room_types);
        }

        if source.strict_discounts.is_some() {
            target.strict_discounts = source.strict_discounts;
        }

        if source.chart_days.is_some() {
            target.chart_days = source.chart_days;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }
    }
}
