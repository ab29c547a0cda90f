//! `INNKEEP_*` environment variable overrides.

use std::env;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Overrides the property name.
pub const PROPERTY_NAME_ENV: &str = "INNKEEP_PROPERTY_NAME";
/// Caps discounts at the base price.
pub const STRICT_DISCOUNTS_ENV: &str = "INNKEEP_STRICT_DISCOUNTS";
/// Default tape chart length.
pub const CHART_DAYS_ENV: &str = "INNKEEP_CHART_DAYS";
/// Lock wait in seconds.
pub const LOCK_WAIT_ENV: &str = "INNKEEP_MAXIMUM_LOCK_WAIT_SECONDS";
/// Disables implicit database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";
/// List output format.
pub const OUTPUT_FORMAT_ENV: &str = "INNKEEP_OUTPUT_FORMAT";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_from(&mut config, |name| {
///     (name == "INNKEEP_CHART_DAYS").then(|| "30".to_string())
/// })
/// .unwrap();
/// assert_eq!(config.chart_days, Some(30));
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an unparseable value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_from(config, |name| env::var(name).ok())
    }

    /// Applies overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an unparseable value.
    pub fn apply_from<F>(config: &mut Config, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(PROPERTY_NAME_ENV) {
            config.property_name = Some(name);
        }

        if let Some(val) = lookup(STRICT_DISCOUNTS_ENV) {
            config.strict_discounts = Some(parse_bool(STRICT_DISCOUNTS_ENV, &val)?);
        }

        if let Some(val) = lookup(CHART_DAYS_ENV) {
            config.chart_days = Some(val.trim().parse().map_err(|_| {
                Error::validation(CHART_DAYS_ENV, "must be a positive integer")
            })?);
        }

        if let Some(val) = lookup(LOCK_WAIT_ENV) {
            config.maximum_lock_wait_seconds = Some(val.trim().parse().map_err(|_| {
                Error::validation(LOCK_WAIT_ENV, "must be a positive integer")
            })?);
        }

        if let Some(val) = lookup(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        if let Some(val) = lookup(OUTPUT_FORMAT_ENV) {
            config.output_format = Some(
                val.parse()
                    .map_err(|message: String| Error::validation(OUTPUT_FORMAT_ENV, message))?,
            );
        }

        Ok(())
    }
}

/// Parses a boolean: true/1/yes/on or false/0/no/off, case-insensitive.
pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::validation(
            field,
            format!("invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::OutputFormat;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        EnvironmentConfig::apply_from(&mut config, |name| vars.get(name).cloned())?;
        Ok(config)
    }

    #[test]
    fn test_no_variables_no_change() {
        assert_eq!(apply(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_all_variables() {
        let config = apply(&[
            (PROPERTY_NAME_ENV, "Delta Camp"),
            (STRICT_DISCOUNTS_ENV, "yes"),
            (CHART_DAYS_ENV, "10"),
            (LOCK_WAIT_ENV, "3"),
            (DISABLE_AUTOINIT_ENV, "off"),
            (OUTPUT_FORMAT_ENV, "json"),
        ])
        .unwrap();
        assert_eq!(config.property_name.as_deref(), Some("Delta Camp"));
        assert_eq!(config.strict_discounts, Some(true));
        assert_eq!(config.chart_days, Some(10));
        assert_eq!(config.maximum_lock_wait_seconds, Some(3));
        assert_eq!(config.disable_autoinit, Some(false));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = apply(&[(CHART_DAYS_ENV, "fortnight")]).unwrap_err();
        assert!(err.to_string().contains(CHART_DAYS_ENV));

        let err = apply(&[(STRICT_DISCOUNTS_ENV, "maybe")]).unwrap_err();
        assert!(err.to_string().contains(STRICT_DISCOUNTS_ENV));

        assert!(apply(&[(OUTPUT_FORMAT_ENV, "yaml")]).is_err());
    }

    #[test]
    fn test_parse_bool_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(parse_bool("x", s).unwrap(), "{s}");
        }
        for s in ["false", "0", "no", "OFF", " false "] {
            assert!(!parse_bool("x", s).unwrap(), "{s}");
        }
        assert!(parse_bool("x", "").is_err());
    }

    #[cfg(feature = "property-tests")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_parse_bool_never_panics(s in ".*") {
                let _ = parse_bool("field", &s);
            }

            #[test]
            fn prop_parse_bool_case_insensitive(
                word in prop::sample::select(vec!["true", "false", "yes", "no", "on", "off"]),
                upper in any::<bool>(),
            ) {
                let input = if upper { word.to_uppercase() } else { word.to_string() };
                prop_assert_eq!(
                    parse_bool("field", &input).unwrap(),
                    matches!(word, "true" | "yes" | "on")
                );
            }

            #[test]
            fn prop_chart_days_round_trip(days in 1u32..=366) {
                let text = days.to_string();
                let config = apply(&[(CHART_DAYS_ENV, text.as_str())]).unwrap();
                prop_assert_eq!(config.chart_days, Some(days));
            }
        }
    }
}
