//! Room-types command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use innkeep::Category;

/// List the room types and nightly rates.
#[derive(Args)]
pub struct RoomTypesCommand {
    /// Only this category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl RoomTypesCommand {
    /// Execute the room-types command.
    ///
    /// Reads only the configuration; no database is opened.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let catalog = config
            .rate_catalog()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let entries: Vec<_> = catalog
            .entries()
            .iter()
            .filter(|e| self.category.map_or(true, |c| c == e.category))
            .collect();

        let mut listing = Listing::new(&["category", "name", "rate"]);
        for entry in &entries {
            listing.push(vec![
                entry.category.to_string(),
                entry.name.clone(),
                entry.rate.to_string(),
            ]);
        }
        listing.print(resolve_format(self.format, &config), &entries)
    }
}
