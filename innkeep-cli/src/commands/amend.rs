//! Amend command implementation.

use crate::error::CliError;
use crate::utils::{open_desk, report, room_id, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{AmendOptions, Money, ReservationId};

/// Change a reservation's guest, room, dates or amount.
///
/// Only Confirmed and CheckedIn reservations can be amended, and the new
/// room and dates must be free.
#[derive(Args)]
pub struct AmendCommand {
    /// Reservation id
    #[arg(value_name = "ID")]
    pub id: ReservationId,

    /// New guest name
    #[arg(long, value_name = "NAME")]
    pub guest: Option<String>,

    /// Move to this room number
    #[arg(long, value_name = "ROOM")]
    pub room: Option<String>,

    /// New arrival date
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<NaiveDate>,

    /// New departure date
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<NaiveDate>,

    /// New agreed total
    #[arg(long, value_name = "AMOUNT")]
    pub amount: Option<Money>,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl AmendCommand {
    /// Execute the amend command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (_config, mut desk) = open_desk(global, self.dry_run)?;
        let room = self
            .room
            .as_deref()
            .map(|number| room_id(&desk, number))
            .transpose()?;

        let amendment = AmendOptions::new()
            .with_guest(self.guest)
            .with_room(room)
            .with_dates(self.check_in, self.check_out)
            .with_amount(self.amount);
        if amendment.is_empty() {
            return Err(CliError::InvalidArguments(
                "nothing to amend; pass at least one of --guest, --room, --check-in, \
                 --check-out or --amount"
                    .into(),
            ));
        }

        let result = desk.update_reservation(self.id, amendment)?;
        report(&result, global);
        Ok(())
    }
}
