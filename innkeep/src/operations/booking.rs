//! Reservation lifecycle planning: booking, amending and cancelling.
//!
//! No two Confirmed or CheckedIn reservations on one room may share a night.
//! The plans check this against the store; the store's overlap trigger is
//! the backstop when two writers race.

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::database::Database;
use crate::dates::StayDates;
use crate::error::{Error, Result};
use crate::money::Money;
use crate::reservation::{
    validate_amount, NewReservation, Reservation, ReservationId, ReservationStatus,
};
use crate::room::{require_text, HousekeepingStatus, Occupancy, RoomId};

use super::inventory::require_room;
use super::plan::{OperationPlan, PlanAction};

/// Fetches a reservation or reports it missing.
pub(crate) fn require_reservation(conn: &Connection, id: ReservationId) -> Result<Reservation> {
    Database::get_reservation(conn, id)?
        .ok_or_else(|| Error::not_found(format!("reservation {id}")))
}

/// Fails with [`Error::Overlap`] if an active reservation other than
/// `exclude` holds any night of `stay` on `room`.
pub(crate) fn ensure_free(
    conn: &Connection,
    room: RoomId,
    stay: &StayDates,
    exclude: Option<ReservationId>,
) -> Result<()> {
    let clashes = Database::find_overlapping(conn, room, stay, exclude)?;
    match clashes.first() {
        None => Ok(()),
        Some(clash) => Err(Error::Overlap {
            room,
            details: format!(
                "reservation {} for {} holds {} ({})",
                clash.id, clash.guest_name, clash.stay, clash.status
            ),
        }),
    }
}

/// Options for a new booking.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::operations::BookingOptions;
/// use innkeep::{Money, RoomId, StayDates};
///
/// let stay = StayDates::new(
///     NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
/// ).unwrap();
/// let options = BookingOptions::new("Mma Ramotswe", RoomId::new(1), stay)
///     .with_amount(Some(Money::from_major(1800)));
/// assert_eq!(options.total_amount, Some(Money::from_major(1800)));
/// ```
#[derive(Debug, Clone)]
pub struct BookingOptions {
    /// Guest display name.
    pub guest_name: String,
    /// Room to book.
    pub room_id: RoomId,
    /// Requested stay.
    pub stay: StayDates,
    /// Agreed total; defaults to the room's rate times the nights.
    pub total_amount: Option<Money>,
}

impl BookingOptions {
    /// Creates booking options at the base price.
    #[must_use]
    pub fn new(guest_name: impl Into<String>, room_id: RoomId, stay: StayDates) -> Self {
        Self {
            guest_name: guest_name.into(),
            room_id,
            stay,
            total_amount: None,
        }
    }

    /// Sets the agreed total.
    #[must_use]
    pub const fn with_amount(mut self, amount: Option<Money>) -> Self {
        self.total_amount = amount;
        self
    }
}

/// Plans a new Confirmed reservation.
pub struct BookingPlan {
    options: BookingOptions,
}

impl BookingPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(options: BookingOptions) -> Self {
        Self { options }
    }

    /// Validates the booking against the room and its other reservations.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank guest or negative amount,
    /// `NotFound` for an unknown or retired room, or `Overlap`.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let options = &self.options;
        let room = require_room(conn, options.room_id)?;
        let amount = options
            .total_amount
            .unwrap_or_else(|| room.nightly_rate.times(options.stay.nights()));

        let booking = NewReservation::new(&options.guest_name, room.id, options.stay, amount)?;
        ensure_free(conn, room.id, &booking.stay, None)?;

        let mut plan = OperationPlan::new(format!(
            "Book room {} for {} ({})",
            room.number, booking.guest_name, booking.stay
        ));
        if !room.housekeeping.is_ready() {
            plan = plan.add_warning(format!(
                "room {} is currently {}",
                room.number, room.housekeeping
            ));
        }
        Ok(plan.add_action(PlanAction::CreateReservation(booking)))
    }
}

/// A patch to an existing reservation. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct AmendOptions {
    /// New guest name.
    pub guest_name: Option<String>,
    /// Move to another room.
    pub room_id: Option<RoomId>,
    /// New check-in date.
    pub check_in: Option<NaiveDate>,
    /// New check-out date.
    pub check_out: Option<NaiveDate>,
    /// New agreed total.
    pub total_amount: Option<Money>,
}

impl AmendOptions {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the guest name.
    #[must_use]
    pub fn with_guest(mut self, guest: Option<String>) -> Self {
        self.guest_name = guest;
        self
    }

    /// Sets the target room.
    #[must_use]
    pub const fn with_room(mut self, room: Option<RoomId>) -> Self {
        self.room_id = room;
        self
    }

    /// Sets either or both stay dates.
    #[must_use]
    pub const fn with_dates(
        mut self,
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
    ) -> Self {
        self.check_in = check_in;
        self.check_out = check_out;
        self
    }

    /// Sets the agreed total.
    #[must_use]
    pub const fn with_amount(mut self, amount: Option<Money>) -> Self {
        self.total_amount = amount;
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.guest_name.is_none()
            && self.room_id.is_none()
            && self.check_in.is_none()
            && self.check_out.is_none()
            && self.total_amount.is_none()
    }
}

/// Plans applying an [`AmendOptions`] patch.
pub struct AmendPlan {
    reservation: ReservationId,
    options: AmendOptions,
}

impl AmendPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(reservation: ReservationId, options: AmendOptions) -> Self {
        Self {
            reservation,
            options,
        }
    }

    /// Applies the patch and re-validates against the other reservations on
    /// the target room.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `InvalidTransition` for a terminal reservation,
    /// a validation error (including moving a checked-in stay to another
    /// room), or `Overlap`.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let current = require_reservation(conn, self.reservation)?;
        if current.status.is_terminal() {
            return Err(Error::InvalidTransition {
                reservation: current.id,
                from: current.status,
                action: "amend".into(),
            });
        }

        let options = &self.options;
        let mut updated = current.clone();

        if let Some(ref guest) = options.guest_name {
            updated.guest_name = require_text("guest_name", guest)?;
        }

        if let Some(room) = options.room_id {
            if room != current.room_id && current.status == ReservationStatus::CheckedIn {
                return Err(Error::validation(
                    "room_id",
                    format!(
                        "reservation {} is checked in; a checked-in stay cannot change room",
                        current.id
                    ),
                ));
            }
            updated.room_id = room;
        }
        let room = require_room(conn, updated.room_id)?;

        updated.stay = StayDates::new(
            options.check_in.unwrap_or(current.stay.check_in()),
            options.check_out.unwrap_or(current.stay.check_out()),
        )?;

        if let Some(amount) = options.total_amount {
            validate_amount("total_amount", amount)?;
            updated.total_amount = amount;
        }

        let plan = OperationPlan::new(format!("Amend reservation {}", current.id));
        if updated == current {
            return Ok(plan.add_warning(format!("reservation {} is unchanged", current.id)));
        }

        ensure_free(conn, room.id, &updated.stay, Some(current.id))?;
        Ok(plan.add_action(PlanAction::UpdateReservation(updated)))
    }
}

/// Plans cancelling a reservation.
///
/// Cancelling a checked-in stay also vacates the room and marks it Dirty.
/// Cancelling twice is a no-op with a warning. The ledger is never touched.
pub struct CancelPlan {
    reservation: ReservationId,
}

impl CancelPlan {
    /// Creates a planner.
    #[must_use]
    pub const fn new(reservation: ReservationId) -> Self {
        Self { reservation }
    }

    /// Builds the plan.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, or `InvalidTransition` for a checked-out stay.
    pub fn build_plan(&self, conn: &Connection) -> Result<OperationPlan> {
        let reservation = require_reservation(conn, self.reservation)?;
        let plan = OperationPlan::new(format!("Cancel reservation {}", reservation.id));

        match reservation.status {
            ReservationStatus::Cancelled => Ok(plan.add_warning(format!(
                "reservation {} is already cancelled",
                reservation.id
            ))),
            ReservationStatus::CheckedOut => Err(Error::InvalidTransition {
                reservation: reservation.id,
                from: reservation.status,
                action: "cancel".into(),
            }),
            ReservationStatus::Confirmed => Ok(plan.add_action(PlanAction::SetReservationStatus {
                reservation: reservation.id,
                status: ReservationStatus::Cancelled,
            })),
            ReservationStatus::CheckedIn => Ok(plan
                .add_action(PlanAction::SetReservationStatus {
                    reservation: reservation.id,
                    status: ReservationStatus::Cancelled,
                })
                .add_action(PlanAction::SetOccupancy {
                    room: reservation.room_id,
                    occupancy: Occupancy::Vacant,
                })
                .add_action(PlanAction::SetHousekeeping {
                    room: reservation.room_id,
                    status: HousekeepingStatus::Dirty,
                })),
        }
    }
}
