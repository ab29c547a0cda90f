//! Update-room command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use clap::Args;
use innkeep::{Category, HousekeepingStatus, Money, RoomPatch};

/// Change a room's attributes.
///
/// The rate is re-derived from the rate table unless `--rate` is given.
#[derive(Args)]
pub struct UpdateRoomCommand {
    /// Room number
    #[arg(value_name = "ROOM")]
    pub room: String,

    /// New room number
    #[arg(long, value_name = "NUMBER")]
    pub number: Option<String>,

    /// New category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// New room type
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,

    /// New housekeeping status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<HousekeepingStatus>,

    /// Assign a staff member
    #[arg(long, value_name = "STAFF", conflicts_with = "clear_staff")]
    pub staff: Option<String>,

    /// Remove the staff assignment
    #[arg(long)]
    pub clear_staff: bool,

    /// Price the room at this rate instead of the rate table's
    #[arg(long, value_name = "AMOUNT")]
    pub rate: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl UpdateRoomCommand {
    fn patch(&self) -> RoomPatch {
        RoomPatch {
            number: self.number.clone(),
            category: self.category,
            room_type: self.room_type.clone(),
            housekeeping: self.status,
            assigned_staff: if self.clear_staff {
                Some(None)
            } else {
                self.staff.clone().map(Some)
            },
            nightly_rate: self.rate,
        }
    }

    /// Execute the update-room command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let patch = self.patch();
        if patch.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to update; pass at least one attribute".into(),
            ));
        }

        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let id = room_id(&desk, &self.room)?;
        let result = desk.patch_room(id, patch)?;
        report(&result, global);
        Ok(())
    }
}
