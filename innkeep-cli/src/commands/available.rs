//! Available command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{open_desk, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{AvailabilityQuery, Category, ReservationId, StayDates};

/// List rooms that can be offered.
///
/// Only clean rooms are offered. With dates, rooms with an active booking
/// on any of those nights are left out.
#[derive(Args)]
pub struct AvailableCommand {
    /// Only this category
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<Category>,

    /// Only this room type
    #[arg(long = "type", value_name = "TYPE")]
    pub room_type: Option<String>,

    /// Arrival date
    #[arg(long, value_name = "DATE", requires = "check_out")]
    pub check_in: Option<NaiveDate>,

    /// Departure date
    #[arg(long, value_name = "DATE", requires = "check_in")]
    pub check_out: Option<NaiveDate>,

    /// Treat this reservation's own room as free (when moving it)
    #[arg(long, value_name = "ID")]
    pub exclude: Option<ReservationId>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl AvailableCommand {
    fn query(&self) -> Result<AvailabilityQuery, CliError> {
        let mut query = AvailabilityQuery::new();
        if let Some(category) = self.category {
            query = query.in_category(category);
        }
        if let Some(ref room_type) = self.room_type {
            query = query.of_type(room_type.clone());
        }
        if let Some(id) = self.exclude {
            query = query.excluding(id);
        }
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            let stay = StayDates::new(check_in, check_out)
                .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
            query = query.free_for(stay);
        }
        Ok(query)
    }

    /// Execute the available command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let query = self.query()?;
        let (config, desk) = open_desk(global, false)?;
        let rooms = desk.find_available_rooms(&query)?;

        let mut listing = Listing::new(&["number", "category", "type", "rate", "housekeeping"]);
        for room in &rooms {
            listing.push(vec![
                room.number.clone(),
                room.category.to_string(),
                room.room_type.clone(),
                room.nightly_rate.to_string(),
                room.housekeeping.to_string(),
            ]);
        }
        listing.print(resolve_format(self.format, &config), &rooms)
    }
}
