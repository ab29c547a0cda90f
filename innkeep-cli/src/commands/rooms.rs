//! Rooms command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{open_desk, GlobalOptions};
use clap::Args;
use innkeep::{Category, HousekeepingStatus, Room};

/// List rooms in the inventory.
#[derive(Args)]
pub struct RoomsCommand {
    /// Only this category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Only rooms with this housekeeping status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<HousekeepingStatus>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl RoomsCommand {
    fn keeps(&self, room: &Room) -> bool {
        self.category.map_or(true, |c| c == room.category)
            && self.status.map_or(true, |s| s == room.housekeeping)
    }

    /// Execute the rooms command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, desk) = open_desk(global, false)?;
        let rooms: Vec<Room> = desk
            .rooms()?
            .into_iter()
            .filter(|room| self.keeps(room))
            .collect();

        let mut listing = Listing::new(&[
            "id",
            "number",
            "category",
            "type",
            "rate",
            "housekeeping",
            "occupancy",
            "staff",
        ]);
        for room in &rooms {
            listing.push(vec![
                room.id.to_string(),
                room.number.clone(),
                room.category.to_string(),
                room.room_type.clone(),
                room.nightly_rate.to_string(),
                room.housekeeping.to_string(),
                room.occupancy.to_string(),
                room.assigned_staff.clone().unwrap_or_default(),
            ]);
        }
        listing.print(resolve_format(self.format, &config), &rooms)
    }
}
