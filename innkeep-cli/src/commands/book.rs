//! Book command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{BookingOptions, Money, StayDates};

/// Book a room for a guest.
#[derive(Args)]
pub struct BookCommand {
    /// Guest name
    #[arg(long, value_name = "NAME")]
    pub guest: String,

    /// Room number
    #[arg(long, value_name = "ROOM")]
    pub room: String,

    /// Arrival date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: NaiveDate,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: NaiveDate,

    /// Agreed total; defaults to the nightly rate times the nights
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl BookCommand {
    /// Execute the book command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let stay = StayDates::new(self.check_in, self.check_out)
            .map_err(|e| CliError::InvalidArguments(e.to_string()))?;

        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let room = room_id(&desk, &self.room)?;
        let options = BookingOptions::new(self.guest, room, stay).with_amount(self.amount);
        let result = desk.create_reservation(options)?;
        report(&result, global);

        if let Some(id) = result.reservation_id {
            println!("{id}");
        }
        Ok(())
    }
}
