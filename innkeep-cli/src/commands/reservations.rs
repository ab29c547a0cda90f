//! Reservations command implementation.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{format_timestamp, open_desk, room_id, GlobalOptions};
use chrono::NaiveDate;
use clap::Args;
use innkeep::{Reservation, ReservationFilter, ReservationStatus};

/// List reservations.
#[derive(Args)]
pub struct ReservationsCommand {
    /// Only reservations for this room number
    #[arg(long, value_name = "ROOM")]
    pub room: Option<String>,

    /// Only reservations in this status
    #[arg(long, value_name = "STATUS")]
    pub status: Option<ReservationStatus>,

    /// Only guests whose name contains this text
    #[arg(long, value_name = "TEXT")]
    pub guest: Option<String>,

    /// Only active reservations holding the room on this night
    #[arg(long, value_name = "DATE")]
    pub on: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ReservationsCommand {
    /// Execute the reservations command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, desk) = open_desk(global, false)?;

        let mut filter = ReservationFilter::default();
        if let Some(ref number) = self.room {
            filter = filter.with_room(room_id(&desk, number)?);
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        if let Some(guest) = self.guest {
            filter = filter.with_guest(guest);
        }
        if let Some(date) = self.on {
            filter = filter.active_on(date);
        }

        let reservations: Vec<Reservation> = desk.reservations(&filter)?;
        let mut listing = Listing::new(&[
            "id",
            "guest",
            "room",
            "check_in",
            "check_out",
            "nights",
            "status",
            "amount",
            "created",
        ]);
        for reservation in &reservations {
            let room = desk
                .room(reservation.room_id)
                .map_or_else(|_| reservation.room_id.to_string(), |r| r.number);
            listing.push(vec![
                reservation.id.to_string(),
                reservation.guest_name.clone(),
                room,
                reservation.stay.check_in().to_string(),
                reservation.stay.check_out().to_string(),
                reservation.stay.nights().to_string(),
                reservation.status.to_string(),
                reservation.total_amount.to_string(),
                format_timestamp(reservation.created_at),
            ]);
        }
        listing.print(resolve_format(self.format, &config), &reservations)
    }
}
