//! Check-out command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, GlobalOptions};
use clap::Args;
use innkeep::ReservationId;

/// Check a guest out; the room is left vacant and dirty.
#[derive(Args)]
pub struct CheckOutCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckOutCommand {
    /// Execute the check-out command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let result = desk.check_out(self.id)?;
        report(&result, global);

        if !result.dry_run && !global.quiet {
            println!("Checked out reservation {}", self.id);
        }
        Ok(())
    }
}
