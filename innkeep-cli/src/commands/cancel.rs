//! Cancel command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, GlobalOptions};
use clap::Args;
use innkeep::ReservationId;

/// Cancel a reservation and release its room.
#[derive(Args)]
pub struct CancelCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl CancelCommand {
    /// Execute the cancel command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let result = desk.cancel_reservation(self.id)?;
        report(&result, global);
        Ok(())
    }
}
