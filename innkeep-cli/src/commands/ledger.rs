//! Ledger command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{format_timestamp, open_desk, GlobalOptions};
use clap::Args;

/// Show the revenue ledger.
#[derive(Args)]
pub struct LedgerCommand {
    /// Print only the entry count and total
    #[arg(long)]
    pub summary: bool,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl LedgerCommand {
    /// Execute the ledger command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, desk) = open_desk(global, false)?;
        let format = resolve_format(self.format, &config);

        if self.summary {
            let summary = desk.ledger_summary()?;
            let mut listing = Listing::new(&["entries", "total"]);
            listing.push(vec![summary.entries.to_string(), summary.total.to_string()]);
            return listing.print(format, &summary);
        }

        let entries = desk.ledger()?;
        let mut listing = Listing::new(&[
            "id",
            "reservation",
            "room",
            "amount",
            "description",
            "created",
        ]);
        for entry in &entries {
            listing.push(vec![
                entry.id.to_string(),
                entry.reservation_id.to_string(),
                entry.room_id.to_string(),
                entry.amount.to_string(),
                entry.description.clone(),
                format_timestamp(entry.created_at),
            ]);
        }
        listing.print(format, &entries)
    }
}
