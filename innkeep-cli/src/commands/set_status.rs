//! Set-status command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use clap::Args;
use innkeep::HousekeepingStatus;

/// Set a room's housekeeping status.
#[derive(Args)]
pub struct SetStatusCommand {
    /// Room number
    #[arg(value_name = "ROOM")]
    pub room: String,

    /// clean, dirty, inspect or out_of_order
    #[arg(value_name = "STATUS")]
    pub status: HousekeepingStatus,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl SetStatusCommand {
    /// Execute the set-status command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let id = room_id(&desk, &self.room)?;
        let result = desk.set_housekeeping_status(id, self.status)?;
        report(&result, global);
        Ok(())
    }
}
