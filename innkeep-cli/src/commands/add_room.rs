//! Add-room command implementation.
//!
//! The nightly rate is never given here; it comes from the rate table for
//! the room's category and type.

use crate::error::CliError;
use crate::utils::{open_desk, report, GlobalOptions};
use clap::Args;
use innkeep::{Category, HousekeepingStatus, NewRoom};

/// Add a room to the inventory.
#[derive(Args)]
pub struct AddRoomCommand {
    /// Room number
    #[arg(long, value_name = "NUMBER")]
    pub number: String,

    /// Room category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Category,

    /// Room type within the category
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: String,

    /// Initial housekeeping status
    #[arg(long, value_name = "STATUS", default_value = "clean")]
    pub status: HousekeepingStatus,

    /// Staff member responsible for the room
    #[arg(long, value_name = "STAFF")]
    pub staff: Option<String>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl AddRoomCommand {
    /// Execute the add-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let room = NewRoom::new(self.number, self.category, self.room_type)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?
            .with_housekeeping(self.status)
            .with_staff(self.staff);

        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let result = desk.create_room(room)?;
        report(&result, global);

        // Room id on stdout (shell-friendly)
        if let Some(id) = result.room_id() {
            println!("{id}");
        }
        Ok(())
    }
}
