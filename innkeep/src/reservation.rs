//! Reservation types and the reservation status machine.
//!
//! ```text
//! Confirmed ──check in──▶ CheckedIn ──check out──▶ CheckedOut
//!     │                       │
//!     └──────cancel───────────┴──────────▶ Cancelled
//! ```
//!
//! `CheckedOut` and `Cancelled` are terminal. Reservations are never
//! deleted; the table is the stay history.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::dates::StayDates;
use crate::money::Money;
use crate::room::{require_text, RoomId, UnknownVariantError};

/// Opaque identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw row id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReservationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Lifecycle status of a reservation.
///
/// # Examples
///
/// ```
/// use innkeep::ReservationStatus;
///
/// assert!(ReservationStatus::Confirmed.can_transition_to(ReservationStatus::CheckedIn));
/// assert!(ReservationStatus::CheckedIn.can_transition_to(ReservationStatus::Cancelled));
/// assert!(!ReservationStatus::CheckedOut.can_transition_to(ReservationStatus::Cancelled));
/// assert!(!ReservationStatus::Confirmed.can_transition_to(ReservationStatus::CheckedOut));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked, guest not yet arrived.
    Confirmed,
    /// Guest in residence.
    CheckedIn,
    /// Guest departed.
    CheckedOut,
    /// Called off before departure.
    Cancelled,
}

impl ReservationStatus {
    /// All statuses.
    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::CheckedIn,
        Self::CheckedOut,
        Self::Cancelled,
    ];

    /// Statuses that hold the room and take part in overlap checks.
    pub const ACTIVE: [Self; 2] = [Self::Confirmed, Self::CheckedIn];

    /// Storage and display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::CheckedOut => "checked_out",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` while the reservation holds its room.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Returns `true` if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Returns `true` if moving from `self` to `next` is legal.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Confirmed, Self::CheckedIn | Self::Cancelled)
                | (Self::CheckedIn, Self::CheckedOut | Self::Cancelled)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        let wanted = match wanted.as_str() {
            "checkedin" => "checked_in",
            "checkedout" => "checked_out",
            "canceled" => "cancelled",
            other => other,
        };
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == wanted)
            .ok_or_else(|| UnknownVariantError {
                kind: "reservation status",
                value: s.to_string(),
            })
    }
}

/// A booking of one room for one stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Row id.
    pub id: ReservationId,
    /// Guest display name from the guest directory.
    pub guest_name: String,
    /// The booked room.
    pub room_id: RoomId,
    /// The stay interval.
    pub stay: StayDates,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Agreed total for the whole stay.
    pub total_amount: Money,
    /// When the booking was taken.
    pub created_at: SystemTime,
}

/// A validated reservation ready to insert; always starts Confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// Guest display name.
    pub guest_name: String,
    /// The booked room.
    pub room_id: RoomId,
    /// The stay interval.
    pub stay: StayDates,
    /// Agreed total.
    pub total_amount: Money,
}

impl NewReservation {
    /// Builds a reservation record.
    ///
    /// # Errors
    ///
    /// Returns an error if the guest name is blank or the amount is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::{Money, NewReservation, RoomId, StayDates};
    ///
    /// let stay = StayDates::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    /// ).unwrap();
    /// let booking = NewReservation::new("Ada Lovelace", RoomId::new(1), stay, Money::from_major(1600));
    /// assert!(booking.is_ok());
    ///
    /// let nameless = NewReservation::new(" ", RoomId::new(1), stay, Money::ZERO);
    /// assert!(nameless.is_err());
    /// ```
    pub fn new(
        guest_name: impl AsRef<str>,
        room_id: RoomId,
        stay: StayDates,
        total_amount: Money,
    ) -> Result<Self, ValidationError> {
        let guest_name = require_text("guest_name", guest_name.as_ref())?;
        validate_amount("total_amount", total_amount)?;
        Ok(Self {
            guest_name,
            room_id,
            stay,
            total_amount,
        })
    }
}

/// Rejects negative amounts.
pub(crate) fn validate_amount(field: &str, amount: Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        return Err(ValidationError {
            field: field.into(),
            message: format!("amount {amount} must not be negative"),
        });
    }
    Ok(())
}

/// Validation error for domain record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
