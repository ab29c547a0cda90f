//! Check-in command implementation.
//!
//! Check-in posts the stay's final amount to the revenue ledger. The room
//! flip, the status change and the ledger row commit together or not at all.

use crate::error::CliError;
use crate::utils::{open_desk, report, GlobalOptions};
use clap::Args;
use innkeep::{Money, ReservationId};

/// Check a guest in.
#[derive(Args)]
pub struct CheckInCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Final amount; defaults to the reservation's agreed total
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckInCommand {
    /// Execute the check-in command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let result = desk.check_in(self.id, self.amount)?;
        report(&result, global);

        if let Some(entry) = result.revenue_entry_id {
            if !global.quiet {
                println!("Checked in reservation {} (ledger entry {entry})", self.id);
            }
        }
        Ok(())
    }
}
