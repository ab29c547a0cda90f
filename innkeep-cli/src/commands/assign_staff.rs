//! Assign-staff command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use clap::Args;

/// Assign a staff member to a room, or clear the assignment.
#[derive(Args)]
pub struct AssignStaffCommand {
    /// Room number
    #[arg(value_name = "ROOM")]
    pub room: String,

    /// Staff identifier
    #[arg(value_name = "STAFF", required_unless_present = "clear")]
    pub staff: Option<String>,

    /// Clear the current assignment
    #[arg(long, conflicts_with = "staff")]
    pub clear: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl AssignStaffCommand {
    /// Execute the assign-staff command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let id = room_id(&desk, &self.room)?;
        let staff = if self.clear { None } else { self.staff };
        let result = desk.assign_staff(id, staff)?;
        report(&result, global);
        Ok(())
    }
}
