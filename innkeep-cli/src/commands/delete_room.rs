//! Delete-room command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use clap::Args;
use innkeep::DeleteOutcome;

/// Remove a room from the inventory.
///
/// A room with past stays is retired so its history stays readable; a room
/// with bookings still to come is refused.
#[derive(Args)]
pub struct DeleteRoomCommand {
    /// Room number
    #[arg(value_name = "ROOM")]
    pub room: String,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl DeleteRoomCommand {
    /// Execute the delete-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let id = room_id(&desk, &self.room)?;
        let result = desk.delete_room(id)?;
        report(&result, global);

        if result.dry_run || global.quiet {
            return Ok(());
        }
        match result.deleted {
            Some(DeleteOutcome::Removed) => println!("Removed room {}", self.room),
            Some(DeleteOutcome::Retired) => {
                println!("Retired room {} (history kept)", self.room);
            }
            None => {}
        }
        Ok(())
    }
}
